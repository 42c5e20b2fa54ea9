//! Interview-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, QuestionId, SessionId, ValidationError};

/// Errors raised by interview state operations.
///
/// Absent data (no exchanges yet, no insights, empty history) is never an
/// error; only malformed input and out-of-sequence calls are.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterviewError {
    /// Operation invoked on an object in an invalid state.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Malformed construction input.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Lifecycle status change not allowed by the state machine.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The interview hit its `max_total_exchanges` ceiling.
    #[error("Exchange limit of {limit} reached")]
    ExchangeLimitReached { limit: u32 },

    #[error("Interview not found: {0}")]
    NotFound(SessionId),

    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// Storage or other infrastructure failure, stringified at the boundary.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl InterviewError {
    pub fn precondition(message: impl Into<String>) -> Self {
        InterviewError::Precondition(message.into())
    }

    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        InterviewError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        InterviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::Precondition(_) => ErrorCode::PreconditionFailed,
            InterviewError::Validation(_) => ErrorCode::ValidationFailed,
            InterviewError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            InterviewError::ExchangeLimitReached { .. } => ErrorCode::ExchangeLimitReached,
            InterviewError::NotFound(_) | InterviewError::QuestionNotFound(_) => {
                ErrorCode::InterviewNotFound
            }
            InterviewError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}
