//! CompleteInterviewHandler - Confirms the end of an interview whose
//! questions are all finalized.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{InterviewError, InterviewState, InterviewStatus};
use crate::domain::prompt::{format_interviewer_prompt, PromptOptions};
use crate::ports::StateLocation;

use super::sessions::InterviewSessions;
use super::turn::REASON_ALL_QUESTIONS_COMPLETED;

#[derive(Debug, Clone)]
pub struct CompleteInterviewCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct CompleteInterviewResult {
    pub state: InterviewState,
    pub location: StateLocation,
    /// Closing interviewer payload.
    pub prompt: String,
}

/// Handler for the confirmation step of `require_confirmation_on_complete`.
pub struct CompleteInterviewHandler {
    sessions: Arc<InterviewSessions>,
    prompt_options: PromptOptions,
}

impl CompleteInterviewHandler {
    pub fn new(sessions: Arc<InterviewSessions>, prompt_options: PromptOptions) -> Self {
        Self {
            sessions,
            prompt_options,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteInterviewCommand,
    ) -> Result<CompleteInterviewResult, InterviewError> {
        let mut state = self.sessions.load(&cmd.session_id).await?;

        if state.status != InterviewStatus::InProgress {
            return Err(InterviewError::precondition(format!(
                "interview {} is {}, not in_progress",
                state.session_id, state.status
            )));
        }
        if let Some(question) = state.get_current_question() {
            return Err(InterviewError::precondition(format!(
                "question '{}' is not finalized yet",
                question.id
            )));
        }

        state.complete(Some(REASON_ALL_QUESTIONS_COMPLETED.to_string()))?;
        state.atomic_update();
        let location = self.sessions.save(&state).await?;

        let prompt = format_interviewer_prompt(&state, None, &self.prompt_options);
        info!(
            session_id = %state.session_id,
            location = %location,
            "Interview completion confirmed"
        );

        Ok(CompleteInterviewResult {
            state,
            location,
            prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStateStorage;
    use crate::domain::interview::{create_interview_state, InterviewConfig, QuestionSpec};
    use crate::domain::prompt::TASK_COMPLETE;
    use crate::ports::StateStorage;

    async fn seeded(
        config: InterviewConfig,
    ) -> (Arc<InMemoryStateStorage>, Arc<InterviewSessions>, InterviewState) {
        let storage = Arc::new(InMemoryStateStorage::new());
        let sessions = Arc::new(InterviewSessions::new(storage.clone()));
        let mut state = create_interview_state(
            "Pilot",
            "",
            &[QuestionSpec::new("q1", 1, "How was signup?", "Signup friction")],
            Some(config),
        )
        .unwrap();
        state.start().unwrap();
        sessions.save(&state).await.unwrap();
        (storage, sessions, state)
    }

    #[tokio::test]
    async fn confirms_exhausted_interview() {
        let (storage, sessions, mut state) = seeded(InterviewConfig::default()).await;
        state.advance_to_next_question();
        sessions.commit(&mut state).await.unwrap();

        let result = CompleteInterviewHandler::new(sessions, PromptOptions::default())
            .handle(CompleteInterviewCommand {
                session_id: state.session_id,
            })
            .await
            .unwrap();

        assert_eq!(result.state.status, InterviewStatus::Completed);
        assert_eq!(
            result.state.termination_reason.as_deref(),
            Some("all_questions_completed")
        );
        assert!(result.state.completed_at.is_some());
        assert!(result.prompt.ends_with(&format!("<task>{TASK_COMPLETE}</task>\n")));
        let stored = storage.load_state(&state.session_id).await.unwrap();
        assert_eq!(stored.status, InterviewStatus::Completed);
    }

    #[tokio::test]
    async fn confirms_unsaved_session_and_writes_it() {
        let (storage, sessions, mut state) = seeded(InterviewConfig {
            auto_save_after_each_exchange: false,
            ..Default::default()
        })
        .await;
        state.advance_to_next_question();
        sessions.commit(&mut state).await.unwrap();
        assert!(sessions.has_unsaved(&state.session_id).await);

        CompleteInterviewHandler::new(sessions.clone(), PromptOptions::default())
            .handle(CompleteInterviewCommand {
                session_id: state.session_id,
            })
            .await
            .unwrap();

        assert!(!sessions.has_unsaved(&state.session_id).await);
        let stored = storage.load_state(&state.session_id).await.unwrap();
        assert_eq!(stored.completed_questions, 1);
        assert_eq!(stored.status, InterviewStatus::Completed);
    }

    #[tokio::test]
    async fn rejects_while_a_question_remains() {
        let (_storage, sessions, state) = seeded(InterviewConfig::default()).await;

        let err = CompleteInterviewHandler::new(sessions, PromptOptions::default())
            .handle(CompleteInterviewCommand {
                session_id: state.session_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Precondition(_)));
    }

    #[tokio::test]
    async fn rejects_already_completed_interview() {
        let (_storage, sessions, mut state) = seeded(InterviewConfig::default()).await;
        state.advance_to_next_question();
        state.complete(None).unwrap();
        sessions.save(&state).await.unwrap();

        let err = CompleteInterviewHandler::new(sessions, PromptOptions::default())
            .handle(CompleteInterviewCommand {
                session_id: state.session_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Precondition(_)));
    }
}
