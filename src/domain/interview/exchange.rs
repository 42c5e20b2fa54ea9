//! Exchange ledger entries and the analysis verdicts attached to them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExchangeId, Timestamp, ValidationError};

use super::status::{FollowUpReason, ObjectiveStatus};

/// Conventional recommendation tag asking for another follow-up.
pub const RECOMMEND_FOLLOW_UP: &str = "follow_up";
/// Conventional recommendation tag asking to move on.
pub const RECOMMEND_TRANSITION: &str = "transition";

fn default_confidence() -> f64 {
    0.8
}

/// Structured verdict on one user response, produced by the analysis model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    pub objective_progress: ObjectiveStatus,
    #[serde(default)]
    pub insights_extracted: Vec<String>,
    /// Free-form; conventionally `"follow_up"` or `"transition"`.
    pub recommendation: String,
    pub recommendation_reason: String,
    /// In `[0.0, 1.0]`.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl ResponseAnalysis {
    /// Builds an analysis with the default confidence of 0.8.
    pub fn new(
        objective_progress: ObjectiveStatus,
        insights_extracted: Vec<String>,
        recommendation: impl Into<String>,
        recommendation_reason: impl Into<String>,
    ) -> Self {
        Self {
            objective_progress,
            insights_extracted,
            recommendation: recommendation.into(),
            recommendation_reason: recommendation_reason.into(),
            confidence: default_confidence(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Rejects confidence values outside `[0.0, 1.0]` (including NaN).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::invalid_format(
                "confidence",
                format!("expected a value in [0.0, 1.0], got {}", self.confidence),
            ));
        }
        Ok(())
    }

    /// Follow-up reason named by the recommendation tag, if any.
    pub fn suggested_follow_up_reason(&self) -> Option<FollowUpReason> {
        FollowUpReason::from_tag(&self.recommendation)
    }
}

/// One posed question or follow-up, paired with its eventual response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: ExchangeId,
    pub timestamp: Timestamp,

    pub question_text: String,
    #[serde(default)]
    pub is_follow_up: bool,
    #[serde(default)]
    pub follow_up_reason: Option<FollowUpReason>,

    #[serde(default)]
    pub user_response: Option<String>,
    #[serde(default)]
    pub response_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub response_analysis: Option<ResponseAnalysis>,
}

impl Exchange {
    pub fn new(
        question_text: impl Into<String>,
        is_follow_up: bool,
        follow_up_reason: Option<FollowUpReason>,
    ) -> Self {
        Self {
            id: ExchangeId::new(),
            timestamp: Timestamp::now(),
            question_text: question_text.into(),
            is_follow_up,
            follow_up_reason,
            user_response: None,
            response_timestamp: None,
            response_analysis: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.user_response.is_some()
    }

    /// Response, its timestamp and analysis are set together so the
    /// both-or-neither invariant holds.
    pub(crate) fn attach_response(&mut self, response: String, analysis: ResponseAnalysis) {
        self.user_response = Some(response);
        self.response_timestamp = Some(Timestamp::now());
        self.response_analysis = Some(analysis);
    }
}
