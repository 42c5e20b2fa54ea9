//! Prompt payload formatting.
//!
//! Projects interview state into the tag-delimited text handed to the
//! interviewer model as its user message. All free text is escaped;
//! numbers and enum tags are emitted as-is.
//!
//! # Module Organization
//!
//! - `markup` - Escaping and tag layout helpers
//! - `interviewer` - Main per-turn payload
//! - `sub_prompts` - Analyzer, transition, follow-up and minimal payloads

mod interviewer;
mod markup;
mod sub_prompts;

use thiserror::Error;

use crate::domain::interview::InterviewState;

pub use interviewer::{
    format_conversation_history, format_current_question, format_insight_summary,
    format_interview_context, format_interviewer_prompt, format_progress,
    format_question_exchanges, format_task_instruction, format_user_message, task_instruction,
    PromptOptions, TASK_BEGIN, TASK_COMPLETE, TASK_CONTINUE, TASK_EVALUATE,
};
pub use markup::escape_xml;
pub use sub_prompts::{
    format_followup_generator_prompt, format_minimal_context, format_response_analyzer_for,
    format_response_analyzer_prompt, format_transition_generator_prompt,
};

/// Failure to render from a serialized state.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid interview state: {0}")]
    InvalidState(#[from] serde_json::Error),
}

/// Renders the main payload from a JSON-serialized [`InterviewState`].
pub fn format_from_json(json: &str, user_message: Option<&str>) -> Result<String, FormatError> {
    let state: InterviewState = serde_json::from_str(json)?;
    Ok(format_interviewer_prompt(
        &state,
        user_message,
        &PromptOptions::default(),
    ))
}
