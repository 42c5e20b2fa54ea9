//! Turn bookkeeping shared by the interview command handlers.

use tracing::warn;

use crate::domain::interview::{InterviewError, InterviewState, InterviewStatus};

/// Termination reason recorded when the exchange ceiling is hit.
pub const REASON_MAX_TOTAL_EXCHANGES: &str = "max_total_exchanges";
/// Termination reason recorded when the last question is finalized.
pub const REASON_ALL_QUESTIONS_COMPLETED: &str = "all_questions_completed";

/// Rejects a new turn unless the interview is running and under its
/// exchange ceiling.
pub(super) fn ensure_accepting_turns(state: &InterviewState) -> Result<(), InterviewError> {
    if state.exchange_budget_exhausted() {
        return Err(InterviewError::ExchangeLimitReached {
            limit: state.config.max_total_exchanges,
        });
    }
    if state.status != InterviewStatus::InProgress {
        return Err(InterviewError::precondition(format!(
            "interview {} is {}, not in_progress",
            state.session_id, state.status
        )));
    }
    Ok(())
}

/// Fails a running interview whose conversation log reached the ceiling.
pub(super) fn enforce_exchange_ceiling(state: &mut InterviewState) -> Result<(), InterviewError> {
    if state.status == InterviewStatus::InProgress && state.exchange_budget_exhausted() {
        warn!(
            session_id = %state.session_id,
            total_exchanges = state.total_exchanges,
            limit = state.config.max_total_exchanges,
            "Exchange ceiling reached"
        );
        state.fail(REASON_MAX_TOTAL_EXCHANGES)?;
    }
    Ok(())
}

/// Completes a running interview whose cursor is exhausted, unless the
/// config asks for an explicit confirmation first.
pub(super) fn complete_if_exhausted(state: &mut InterviewState) -> Result<(), InterviewError> {
    if state.status == InterviewStatus::InProgress
        && state.get_current_question().is_none()
        && !state.config.require_confirmation_on_complete
    {
        state.complete(Some(REASON_ALL_QUESTIONS_COMPLETED.to_string()))?;
    }
    Ok(())
}
