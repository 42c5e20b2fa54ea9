//! Per-question state: the exchange ledger, objective tracking and the
//! follow-up budget.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{QuestionId, StateMachine, Timestamp};

use super::errors::InterviewError;
use super::exchange::{Exchange, ResponseAnalysis};
use super::status::{FollowUpReason, ObjectiveStatus, QuestionStatus, TransitionReason};

pub const DEFAULT_MAX_FOLLOW_UPS: u32 = 3;

fn default_max_follow_ups() -> u32 {
    DEFAULT_MAX_FOLLOW_UPS
}

/// Complete state for a single interview question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionState {
    pub id: QuestionId,
    pub order: i64,

    pub base_question_text: String,
    pub research_objective: String,

    #[serde(default)]
    pub status: QuestionStatus,
    #[serde(default)]
    pub started_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,

    /// Mirror of the latest analysis' objective progress.
    #[serde(default)]
    pub objective_status: ObjectiveStatus,

    /// Initial question plus follow-ups, oldest first.
    #[serde(default)]
    pub exchanges: Vec<Exchange>,

    #[serde(default)]
    pub transition_reason: Option<TransitionReason>,
    /// Validation statement spoken when moving on.
    #[serde(default)]
    pub transition_message: Option<String>,

    #[serde(default)]
    pub cumulative_insights: Vec<String>,

    #[serde(default)]
    pub follow_up_count: u32,
    #[serde(default = "default_max_follow_ups")]
    pub max_follow_ups: u32,
}

impl QuestionState {
    pub fn new(
        id: QuestionId,
        order: i64,
        base_question_text: impl Into<String>,
        research_objective: impl Into<String>,
        max_follow_ups: u32,
    ) -> Self {
        Self {
            id,
            order,
            base_question_text: base_question_text.into(),
            research_objective: research_objective.into(),
            status: QuestionStatus::Pending,
            started_at: None,
            completed_at: None,
            objective_status: ObjectiveStatus::NotStarted,
            exchanges: Vec::new(),
            transition_reason: None,
            transition_message: None,
            cumulative_insights: Vec::new(),
            follow_up_count: 0,
            max_follow_ups,
        }
    }

    /// Appends a newly posed question or follow-up.
    ///
    /// Callers pass a `follow_up_reason` for follow-ups; this is not
    /// enforced. Status is left alone, moving it is the orchestrator's call.
    pub fn add_exchange(
        &mut self,
        question_text: impl Into<String>,
        is_follow_up: bool,
        follow_up_reason: Option<FollowUpReason>,
    ) -> &Exchange {
        let exchange = Exchange::new(question_text, is_follow_up, follow_up_reason);
        if is_follow_up {
            self.follow_up_count += 1;
        }
        debug!(
            question_id = %self.id,
            exchange_id = %exchange.id,
            is_follow_up,
            follow_up_count = self.follow_up_count,
            "Exchange added"
        );
        self.exchanges.push(exchange);
        &self.exchanges[self.exchanges.len() - 1]
    }

    /// Attaches the user's response and its analysis to the latest exchange.
    ///
    /// Fails without mutating anything when no exchange is awaiting a
    /// response.
    pub fn record_response(
        &mut self,
        response: impl Into<String>,
        analysis: ResponseAnalysis,
    ) -> Result<(), InterviewError> {
        let current = self.exchanges.last_mut().ok_or_else(|| {
            InterviewError::precondition(format!(
                "question '{}' has no exchange awaiting a response",
                self.id
            ))
        })?;

        if current.is_answered() {
            return Err(InterviewError::precondition(format!(
                "latest exchange of question '{}' is already answered",
                self.id
            )));
        }

        self.cumulative_insights
            .extend(analysis.insights_extracted.iter().cloned());
        self.objective_status = analysis.objective_progress;
        current.attach_response(response.into(), analysis);

        debug!(
            question_id = %self.id,
            objective_status = %self.objective_status,
            "Response recorded"
        );
        Ok(())
    }

    /// Latest exchange, answered or not.
    pub fn current_exchange(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }

    /// Analysis attached to the most recent answered exchange.
    pub fn latest_analysis(&self) -> Option<&ResponseAnalysis> {
        self.exchanges
            .iter()
            .rev()
            .find_map(|e| e.response_analysis.as_ref())
    }

    /// True when the latest exchange has been posed but not yet answered.
    pub fn is_awaiting_response(&self) -> bool {
        self.exchanges.last().is_some_and(|e| !e.is_answered())
    }

    /// Whether the follow-up budget is used up.
    pub fn follow_up_budget_exhausted(&self) -> bool {
        self.follow_up_count >= self.max_follow_ups
    }

    /// Previously posed follow-up texts, oldest first.
    pub fn follow_up_questions(&self) -> Vec<&str> {
        self.exchanges
            .iter()
            .filter(|e| e.is_follow_up)
            .map(|e| e.question_text.as_str())
            .collect()
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }

    /// `pending -> active`, stamping `started_at`.
    pub fn activate(&mut self) -> Result<(), InterviewError> {
        self.move_to(QuestionStatus::Active)?;
        self.started_at = Some(Timestamp::now());
        Ok(())
    }

    /// `active | follow_up -> follow_up`.
    pub fn enter_follow_up(&mut self) -> Result<(), InterviewError> {
        self.move_to(QuestionStatus::FollowUp)
    }

    /// Moves to the terminal status implied by `reason`.
    pub fn finalize(
        &mut self,
        reason: TransitionReason,
        message: Option<String>,
    ) -> Result<(), InterviewError> {
        self.move_to(reason.resulting_status())?;
        self.transition_reason = Some(reason);
        self.transition_message = message;
        self.completed_at = Some(Timestamp::now());
        debug!(question_id = %self.id, reason = %reason, "Question finalized");
        Ok(())
    }

    fn move_to(&mut self, target: QuestionStatus) -> Result<(), InterviewError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| InterviewError::invalid_transition(self.status, target))?;
        Ok(())
    }
}
