//! RecordAnswerHandler - Applies one participant reply to an interview.
//!
//! A turn is: attach the reply and its analysis to the pending exchange,
//! log it, file extracted insights, decide follow-up versus transition,
//! apply that decision, enforce the exchange ceiling, then persist.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{QuestionId, SessionId};
use crate::domain::interview::{
    Importance, InterviewError, InterviewState, InterviewStatus, MessageRole, ResponseAnalysis,
    TransitionDecision, TransitionPolicy, UserSignal,
};
use crate::domain::prompt::{
    format_followup_generator_prompt, format_interviewer_prompt,
    format_transition_generator_prompt, PromptOptions,
};
use crate::ports::StateLocation;

use super::sessions::InterviewSessions;
use super::turn::{complete_if_exhausted, enforce_exchange_ceiling, ensure_accepting_turns};

/// Command carrying the participant's reply and its analysis.
#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub session_id: SessionId,
    pub response: String,
    pub analysis: ResponseAnalysis,
    pub signal: UserSignal,
}

/// What happened on this turn and what to ask the model next.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub decision: TransitionDecision,
    /// Question under the cursor after the turn, if any.
    pub current_question: Option<QuestionId>,
    pub status: InterviewStatus,
    pub state: InterviewState,
    /// Follow-up generator payload, transition generator payload, or the
    /// closing interviewer payload once no question remains.
    pub next_prompt: String,
    /// Set when the state was written.
    pub location: Option<StateLocation>,
}

impl TurnOutcome {
    pub fn is_interview_complete(&self) -> bool {
        self.state.is_complete()
    }
}

/// Handler for participant replies.
pub struct RecordAnswerHandler {
    sessions: Arc<InterviewSessions>,
    prompt_options: PromptOptions,
}

impl RecordAnswerHandler {
    pub fn new(sessions: Arc<InterviewSessions>, prompt_options: PromptOptions) -> Self {
        Self {
            sessions,
            prompt_options,
        }
    }

    pub async fn handle(&self, cmd: RecordAnswerCommand) -> Result<TurnOutcome, InterviewError> {
        cmd.analysis.validate()?;

        let mut state = self.sessions.load(&cmd.session_id).await?;
        ensure_accepting_turns(&state)?;

        // 1. Attach the reply to the pending exchange
        let question = state
            .current_question_mut()
            .ok_or_else(|| InterviewError::precondition("interview has no current question"))?;
        question.record_response(cmd.response.clone(), cmd.analysis.clone())?;
        let question_id = question.id.clone();
        let exchange_id = question
            .current_exchange()
            .map(|e| e.id)
            .ok_or_else(|| InterviewError::precondition("answered exchange vanished"))?;

        // 2. Log it and file the insights
        state.record_exchange(MessageRole::User, cmd.response.clone());
        for insight in &cmd.analysis.insights_extracted {
            state.insight_bank.add_insight(
                insight.clone(),
                question_id.clone(),
                exchange_id,
                None,
                Importance::Medium,
            );
        }

        // 3. Decide and apply
        let decision = {
            let question = state
                .get_current_question()
                .ok_or_else(|| InterviewError::QuestionNotFound(question_id.clone()))?;
            TransitionPolicy::evaluate(question, cmd.signal, &state.config)
        };
        let next_prompt = match decision {
            TransitionDecision::FollowUp(reason) => {
                let question = state
                    .current_question_mut()
                    .ok_or_else(|| InterviewError::QuestionNotFound(question_id.clone()))?;
                question.enter_follow_up()?;
                format_followup_generator_prompt(
                    &question.research_objective,
                    &cmd.response,
                    reason,
                    &[],
                    &question.follow_up_questions(),
                )
            }
            TransitionDecision::Transition(reason) => {
                state
                    .current_question_mut()
                    .ok_or_else(|| InterviewError::QuestionNotFound(question_id.clone()))?
                    .finalize(reason, None)?;
                state.advance_to_next_question();

                match state.current_question_mut() {
                    Some(next) => {
                        next.activate()?;
                        format_transition_generator_prompt(
                            &cmd.response,
                            reason,
                            &next.base_question_text,
                            cmd.analysis.insights_extracted.first().map(String::as_str),
                        )
                    }
                    None => {
                        complete_if_exhausted(&mut state)?;
                        format_interviewer_prompt(
                            &state,
                            Some(&cmd.response),
                            &self.prompt_options,
                        )
                    }
                }
            }
        };

        // 4. Ceiling, then persist
        enforce_exchange_ceiling(&mut state)?;
        let location = self.sessions.commit(&mut state).await?;

        info!(
            session_id = %state.session_id,
            question_id = %question_id,
            decision = ?decision,
            status = %state.status,
            completed_questions = state.completed_questions,
            "Answer recorded"
        );

        Ok(TurnOutcome {
            decision,
            current_question: state.get_current_question().map(|q| q.id.clone()),
            status: state.status,
            state,
            next_prompt,
            location,
        })
    }
}
