//! Interview state aggregate root.
//!
//! This is the object persisted after every exchange. It owns the ordered
//! questions, the cursor, the insight bank and the progress counters, and
//! exposes the session-level state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::foundation::{SessionId, StateMachine, Timestamp};

use super::config::InterviewConfig;
use super::errors::InterviewError;
use super::insight::InsightBank;
use super::question::QuestionState;
use super::status::{InterviewStatus, MessageRole};

/// One line of the rolling conversation log used for LLM context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Timestamp,
}

/// Top-level interview state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewState {
    pub session_id: SessionId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    pub title: String,
    /// Background context for the interview.
    pub context: String,

    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default)]
    pub config: InterviewConfig,

    #[serde(default)]
    pub questions: Vec<QuestionState>,
    #[serde(default)]
    pub current_question_index: usize,

    #[serde(default)]
    pub insight_bank: InsightBank,

    #[serde(default)]
    pub total_questions: usize,
    #[serde(default)]
    pub completed_questions: usize,
    #[serde(default)]
    pub total_exchanges: u32,

    #[serde(default)]
    pub conversation_history: Vec<ConversationEntry>,

    #[serde(default)]
    pub termination_reason: Option<String>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

impl InterviewState {
    /// Builds a fresh state in `initializing` status. Question ordering and
    /// validation are the factory's job; see [`super::create_interview_state`].
    pub(crate) fn new(
        title: String,
        context: String,
        questions: Vec<QuestionState>,
        config: InterviewConfig,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            session_id: SessionId::new(),
            created_at: now,
            updated_at: now,
            title,
            context,
            status: InterviewStatus::Initializing,
            config,
            total_questions: questions.len(),
            questions,
            current_question_index: 0,
            insight_bank: InsightBank::new(),
            completed_questions: 0,
            total_exchanges: 0,
            conversation_history: Vec::new(),
            termination_reason: None,
            completed_at: None,
        }
    }

    // ---------------------------------------------------------------------
    // Cursor and progress
    // ---------------------------------------------------------------------

    /// Question under the cursor, or `None` once the list is exhausted.
    pub fn get_current_question(&self) -> Option<&QuestionState> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_mut(&mut self) -> Option<&mut QuestionState> {
        self.questions.get_mut(self.current_question_index)
    }

    /// Moves the cursor forward one question.
    ///
    /// Returns the new current question, or `None` when the cursor reaches
    /// the end; the caller then owns moving `status` to `completed`. Calling
    /// this on an already exhausted cursor changes nothing.
    pub fn advance_to_next_question(&mut self) -> Option<&QuestionState> {
        if self.current_question_index >= self.questions.len() {
            warn!(
                session_id = %self.session_id,
                "advance_to_next_question called on exhausted interview"
            );
            return None;
        }

        self.current_question_index += 1;
        self.completed_questions += 1;
        self.updated_at = Timestamp::now();

        debug!(
            session_id = %self.session_id,
            index = self.current_question_index,
            completed = self.completed_questions,
            "Advanced to next question"
        );
        self.get_current_question()
    }

    /// Appends to the rolling conversation log.
    ///
    /// The log feeds LLM context only; question progress lives in the
    /// exchange ledgers.
    pub fn record_exchange(&mut self, role: MessageRole, content: impl Into<String>) {
        let now = Timestamp::now();
        self.conversation_history.push(ConversationEntry {
            role,
            content: content.into(),
            timestamp: now,
        });
        self.total_exchanges += 1;
        self.updated_at = now;
    }

    /// True when the cursor has run past the last question OR the status is
    /// already terminal.
    ///
    /// The two can disagree for one turn: after the final advance the cursor
    /// is exhausted while `status` is still `in_progress` until the caller
    /// completes the interview.
    pub fn is_complete(&self) -> bool {
        self.current_question_index >= self.questions.len()
            || matches!(
                self.status,
                InterviewStatus::Completed | InterviewStatus::Failed
            )
    }

    /// Completion percentage, `0.0` for an interview without questions.
    pub fn calculate_progress(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        (self.completed_questions as f64 / self.total_questions as f64) * 100.0
    }

    /// Marks the state dirty. The storage layer persists the whole object
    /// after every call.
    pub fn atomic_update(&mut self) {
        self.updated_at = Timestamp::now();
    }

    /// Whether `max_total_exchanges` has been reached.
    pub fn exchange_budget_exhausted(&self) -> bool {
        self.total_exchanges >= self.config.max_total_exchanges
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// `initializing -> in_progress`.
    pub fn start(&mut self) -> Result<(), InterviewError> {
        self.move_to(InterviewStatus::InProgress)?;
        info!(
            session_id = %self.session_id,
            total_questions = self.total_questions,
            "Interview started"
        );
        Ok(())
    }

    /// `in_progress -> paused`.
    pub fn pause(&mut self) -> Result<(), InterviewError> {
        self.move_to(InterviewStatus::Paused)
    }

    /// `paused -> in_progress`.
    pub fn resume(&mut self) -> Result<(), InterviewError> {
        if self.status != InterviewStatus::Paused {
            return Err(InterviewError::invalid_transition(
                self.status,
                InterviewStatus::InProgress,
            ));
        }
        self.move_to(InterviewStatus::InProgress)
    }

    /// `in_progress -> completed`, stamping `completed_at`.
    pub fn complete(&mut self, reason: Option<String>) -> Result<(), InterviewError> {
        self.move_to(InterviewStatus::Completed)?;
        self.termination_reason = reason;
        self.completed_at = Some(self.updated_at);
        info!(
            session_id = %self.session_id,
            completed_questions = self.completed_questions,
            "Interview completed"
        );
        Ok(())
    }

    /// `in_progress -> failed`, recording why.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), InterviewError> {
        self.move_to(InterviewStatus::Failed)?;
        let reason = reason.into();
        warn!(session_id = %self.session_id, reason = %reason, "Interview failed");
        self.termination_reason = Some(reason);
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    fn move_to(&mut self, target: InterviewStatus) -> Result<(), InterviewError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| InterviewError::invalid_transition(self.status, target))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
