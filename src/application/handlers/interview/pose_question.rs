//! PoseQuestionHandler - Records a question the interviewer just asked.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{ExchangeId, SessionId};
use crate::domain::interview::{
    FollowUpReason, InterviewError, InterviewState, MessageRole, QuestionStatus,
};
use crate::ports::StateLocation;

use super::sessions::InterviewSessions;
use super::turn::{enforce_exchange_ceiling, ensure_accepting_turns};

/// Command to record an assistant-posed question.
#[derive(Debug, Clone)]
pub struct PoseQuestionCommand {
    pub session_id: SessionId,
    pub question_text: String,
    /// `Some` marks the question as a follow-up on the current question.
    pub follow_up_reason: Option<FollowUpReason>,
}

impl PoseQuestionCommand {
    pub fn initial(session_id: SessionId, question_text: impl Into<String>) -> Self {
        Self {
            session_id,
            question_text: question_text.into(),
            follow_up_reason: None,
        }
    }

    pub fn follow_up(
        session_id: SessionId,
        question_text: impl Into<String>,
        reason: FollowUpReason,
    ) -> Self {
        Self {
            session_id,
            question_text: question_text.into(),
            follow_up_reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PoseQuestionResult {
    pub exchange_id: ExchangeId,
    pub state: InterviewState,
    /// Set when the state was written.
    pub location: Option<StateLocation>,
}

/// Handler for recording posed questions.
pub struct PoseQuestionHandler {
    sessions: Arc<InterviewSessions>,
}

impl PoseQuestionHandler {
    pub fn new(sessions: Arc<InterviewSessions>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: PoseQuestionCommand) -> Result<PoseQuestionResult, InterviewError> {
        let mut state = self.sessions.load(&cmd.session_id).await?;
        ensure_accepting_turns(&state)?;

        let question = state.current_question_mut().ok_or_else(|| {
            InterviewError::precondition("interview has no current question to ask")
        })?;
        if question.is_awaiting_response() {
            return Err(InterviewError::precondition(format!(
                "question '{}' is still awaiting a response",
                question.id
            )));
        }

        let is_follow_up = cmd.follow_up_reason.is_some();
        if question.status == QuestionStatus::Pending {
            question.activate()?;
        }
        if is_follow_up && question.status != QuestionStatus::FollowUp {
            question.enter_follow_up()?;
        }

        let exchange_id = question
            .add_exchange(cmd.question_text.clone(), is_follow_up, cmd.follow_up_reason)
            .id;
        let question_id = question.id.clone();

        state.record_exchange(MessageRole::Assistant, cmd.question_text);
        enforce_exchange_ceiling(&mut state)?;
        let location = self.sessions.commit(&mut state).await?;

        debug!(
            session_id = %state.session_id,
            question_id = %question_id,
            exchange_id = %exchange_id,
            is_follow_up,
            "Question posed"
        );

        Ok(PoseQuestionResult {
            exchange_id,
            state,
            location,
        })
    }
}
