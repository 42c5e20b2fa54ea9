//! Follow-up versus transition decision for the current question.
//!
//! Pure function over question data and config; applying the decision is
//! the orchestrator's job.

use serde::{Deserialize, Serialize};

use super::config::InterviewConfig;
use super::question::QuestionState;
use super::status::{FollowUpReason, TransitionReason};

/// What the user's latest turn amounted to, as judged by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserSignal {
    /// A regular answer; judge it by the analysis.
    #[default]
    Answered,
    /// Explicit request to skip the question.
    Skip,
    /// The user could not answer.
    NullAnswer,
}

/// Outcome of evaluating a question after a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum TransitionDecision {
    FollowUp(FollowUpReason),
    Transition(TransitionReason),
}

impl TransitionDecision {
    pub fn is_transition(&self) -> bool {
        matches!(self, TransitionDecision::Transition(_))
    }
}

/// Decides whether to probe further or move on.
pub struct TransitionPolicy;

impl TransitionPolicy {
    /// Evaluates `question` after its latest response.
    ///
    /// Order of precedence: exhausted follow-up budget, explicit skip (when
    /// allowed), null answer, objective met, otherwise another follow-up.
    /// The budget check wins even when the analysis recommends a follow-up
    /// and the objective is still unmet.
    pub fn evaluate(
        question: &QuestionState,
        signal: UserSignal,
        config: &InterviewConfig,
    ) -> TransitionDecision {
        if question.follow_up_budget_exhausted() {
            return TransitionDecision::Transition(TransitionReason::MaxFollowUps);
        }

        match signal {
            UserSignal::Skip if config.allow_user_skip => {
                return TransitionDecision::Transition(TransitionReason::UserSkip);
            }
            UserSignal::NullAnswer => {
                return TransitionDecision::Transition(TransitionReason::NullAnswer);
            }
            UserSignal::Skip | UserSignal::Answered => {}
        }

        if question.objective_status.is_met() {
            return TransitionDecision::Transition(TransitionReason::ObjectiveSatisfied);
        }

        let reason = question
            .latest_analysis()
            .and_then(|a| a.suggested_follow_up_reason())
            .unwrap_or(FollowUpReason::ObjectiveNotSatisfied);
        TransitionDecision::FollowUp(reason)
    }
}
