//! Insight bank: every atomic fact extracted during the interview,
//! indexed by category and by source question.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{ExchangeId, InsightId, QuestionId, Timestamp};

use super::status::Importance;

/// A single extracted fact, linked to the exchange it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: InsightId,
    pub content: String,

    pub source_question_id: QuestionId,
    pub source_exchange_id: ExchangeId,
    pub extracted_at: Timestamp,

    /// e.g. `"motivation"`, `"pain_point"`, `"preference"`.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub importance: Importance,

    /// Non-owning references into the same bank.
    #[serde(default)]
    pub related_insight_ids: Vec<InsightId>,
}

/// Append-only collection of insights with incrementally maintained indexes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightBank {
    #[serde(default)]
    pub insights: Vec<Insight>,

    #[serde(default)]
    pub by_category: BTreeMap<String, Vec<InsightId>>,
    #[serde(default)]
    pub by_question: BTreeMap<QuestionId, Vec<InsightId>>,

    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub last_summary_at: Option<Timestamp>,
}

impl InsightBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new insight and files its id under the category (if any)
    /// and the source question.
    pub fn add_insight(
        &mut self,
        content: impl Into<String>,
        source_question_id: QuestionId,
        source_exchange_id: ExchangeId,
        category: Option<String>,
        importance: Importance,
    ) -> &Insight {
        let category = category.filter(|c| !c.trim().is_empty());
        let insight = Insight {
            id: InsightId::new(),
            content: content.into(),
            source_question_id,
            source_exchange_id,
            extracted_at: Timestamp::now(),
            category,
            importance,
            related_insight_ids: Vec::new(),
        };

        if let Some(category) = &insight.category {
            self.by_category
                .entry(category.clone())
                .or_default()
                .push(insight.id);
        }
        self.by_question
            .entry(insight.source_question_id.clone())
            .or_default()
            .push(insight.id);

        self.insights.push(insight);
        &self.insights[self.insights.len() - 1]
    }

    /// High and critical insights in insertion order.
    pub fn get_high_importance(&self) -> Vec<&Insight> {
        self.insights
            .iter()
            .filter(|i| i.importance.is_high())
            .collect()
    }

    pub fn get(&self, id: InsightId) -> Option<&Insight> {
        self.insights.iter().find(|i| i.id == id)
    }

    pub fn insights_for_question(&self, question_id: &QuestionId) -> Vec<&Insight> {
        self.resolve(self.by_question.get(question_id))
    }

    pub fn insights_in_category(&self, category: &str) -> Vec<&Insight> {
        self.resolve(self.by_category.get(category))
    }

    /// Records a symmetric relation between two existing insights.
    ///
    /// Returns `false` (and changes nothing) if either id is unknown or the
    /// ids are equal.
    pub fn link(&mut self, a: InsightId, b: InsightId) -> bool {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return false;
        }
        for insight in self.insights.iter_mut() {
            let other = if insight.id == a {
                b
            } else if insight.id == b {
                a
            } else {
                continue;
            };
            if !insight.related_insight_ids.contains(&other) {
                insight.related_insight_ids.push(other);
            }
        }
        true
    }

    /// Replaces the running summary.
    pub fn update_summary(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
        self.last_summary_at = Some(Timestamp::now());
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    fn resolve(&self, ids: Option<&Vec<InsightId>>) -> Vec<&Insight> {
        ids.map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }
}
