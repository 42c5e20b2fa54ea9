//! StartInterviewHandler - Command handler for creating and opening interviews.

use std::sync::Arc;

use tracing::info;

use crate::domain::interview::{
    create_interview_state, InterviewConfig, InterviewError, InterviewState, QuestionSpec,
};
use crate::domain::prompt::{format_interviewer_prompt, PromptOptions};
use crate::ports::StateLocation;

use super::sessions::InterviewSessions;
use super::turn::complete_if_exhausted;

/// Command to start a new interview.
#[derive(Debug, Clone)]
pub struct StartInterviewCommand {
    pub title: String,
    pub context: String,
    pub questions: Vec<QuestionSpec>,
    /// Per-interview override of the handler's defaults.
    pub config: Option<InterviewConfig>,
}

/// Result of a successful start.
#[derive(Debug, Clone)]
pub struct StartInterviewResult {
    pub state: InterviewState,
    pub location: StateLocation,
    /// Interviewer payload for the opening turn.
    pub prompt: String,
}

/// Handler for starting interviews.
pub struct StartInterviewHandler {
    sessions: Arc<InterviewSessions>,
    defaults: InterviewConfig,
    prompt_options: PromptOptions,
}

impl StartInterviewHandler {
    pub fn new(
        sessions: Arc<InterviewSessions>,
        defaults: InterviewConfig,
        prompt_options: PromptOptions,
    ) -> Self {
        Self {
            sessions,
            defaults,
            prompt_options,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartInterviewCommand,
    ) -> Result<StartInterviewResult, InterviewError> {
        // 1. Build the aggregate
        let config = cmd.config.unwrap_or_else(|| self.defaults.clone());
        let mut state = create_interview_state(cmd.title, cmd.context, &cmd.questions, Some(config))?;

        // 2. Open it and the first question
        state.start()?;
        if let Some(question) = state.current_question_mut() {
            question.activate()?;
        }
        complete_if_exhausted(&mut state)?;

        // 3. Persist unconditionally so the session can be resumed
        let location = self.sessions.save(&state).await?;

        let prompt = format_interviewer_prompt(&state, None, &self.prompt_options);
        info!(
            session_id = %state.session_id,
            total_questions = state.total_questions,
            location = %location,
            "Interview opened"
        );

        Ok(StartInterviewResult {
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
    use crate::domain::foundation::SessionId;
    use crate::domain::interview::{InterviewStatus, QuestionStatus};
    use crate::domain::prompt::TASK_BEGIN;
    use crate::ports::{StateStorage, StateStorageError};
    use async_trait::async_trait;

    struct FailingStorage;

    #[async_trait]
    impl StateStorage for FailingStorage {
        async fn save_state(
            &self,
            _state: &InterviewState,
        ) -> Result<StateLocation, StateStorageError> {
            Err(StateStorageError::IoError("Simulated save failure".to_string()))
        }

        async fn load_state(
            &self,
            session_id: &SessionId,
        ) -> Result<InterviewState, StateStorageError> {
            Err(StateStorageError::NotFound(*session_id))
        }

        async fn exists(&self, _session_id: &SessionId) -> Result<bool, StateStorageError> {
            Ok(false)
        }

        async fn delete(&self, _session_id: &SessionId) -> Result<(), StateStorageError> {
            Ok(())
        }
    }

    fn command(questions: Vec<QuestionSpec>) -> StartInterviewCommand {
        StartInterviewCommand {
            title: "Pilot".to_string(),
            context: "Onboarding research".to_string(),
            questions,
            config: None,
        }
    }

    fn two_questions() -> Vec<QuestionSpec> {
        vec![
            QuestionSpec::new("q2", 2, "Favourite feature?", "Feature value"),
            QuestionSpec::new("q1", 1, "How was signup?", "Signup friction"),
        ]
    }

    fn handler(storage: Arc<dyn StateStorage>) -> StartInterviewHandler {
        StartInterviewHandler::new(
            Arc::new(InterviewSessions::new(storage)),
            InterviewConfig::default(),
            PromptOptions::default(),
        )
    }

    #[tokio::test]
    async fn opens_interview_and_first_question() {
        let storage = Arc::new(InMemoryStateStorage::new());
        let result = handler(storage.clone())
            .handle(command(two_questions()))
            .await
            .unwrap();

        assert_eq!(result.state.status, InterviewStatus::InProgress);
        let first = result.state.get_current_question().unwrap();
        assert_eq!(first.id.as_str(), "q1");
        assert_eq!(first.status, QuestionStatus::Active);
        assert!(first.started_at.is_some());
        assert_eq!(result.state.questions[1].status, QuestionStatus::Pending);
    }

    #[tokio::test]
    async fn persists_and_returns_opening_prompt() {
        let storage = Arc::new(InMemoryStateStorage::new());
        let result = handler(storage.clone())
            .handle(command(two_questions()))
            .await
            .unwrap();

        let stored = storage.load_state(&result.state.session_id).await.unwrap();
        assert_eq!(stored, result.state);
        assert!(result.prompt.contains("<status>in_progress</status>"));
        assert!(result.prompt.ends_with(&format!("<task>{TASK_BEGIN}</task>\n")));
    }

    #[tokio::test]
    async fn command_config_overrides_defaults() {
        let storage = Arc::new(InMemoryStateStorage::new());
        let mut cmd = command(two_questions());
        cmd.config = Some(InterviewConfig {
            max_follow_ups_per_question: 1,
            ..Default::default()
        });

        let result = handler(storage).handle(cmd).await.unwrap();
        assert!(result.state.questions.iter().all(|q| q.max_follow_ups == 1));
    }

    #[tokio::test]
    async fn invalid_specs_are_rejected_before_saving() {
        let storage = Arc::new(InMemoryStateStorage::new());
        let bad = vec![QuestionSpec {
            id: Some("q1".to_string()),
            order: Some(1),
            base_question_text: None,
            research_objective: Some("x".to_string()),
        }];

        let err = handler(storage.clone()).handle(command(bad)).await.unwrap_err();
        assert!(matches!(err, InterviewError::Validation(_)));
        assert_eq!(storage.state_count().await, 0);
    }

    #[tokio::test]
    async fn empty_interview_completes_without_confirmation() {
        let storage = Arc::new(InMemoryStateStorage::new());
        let mut cmd = command(vec![]);
        cmd.config = Some(InterviewConfig {
            require_confirmation_on_complete: false,
            ..Default::default()
        });

        let result = handler(storage).handle(cmd).await.unwrap();
        assert_eq!(result.state.status, InterviewStatus::Completed);
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_infrastructure_error() {
        let err = handler(Arc::new(FailingStorage))
            .handle(command(two_questions()))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::Infrastructure(_)));
    }
}
