//! Per-interview configuration snapshot, fixed at creation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Configuration for one interview session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    pub max_follow_ups_per_question: u32,
    /// Hard safety ceiling on conversation entries.
    pub max_total_exchanges: u32,
    pub auto_save_after_each_exchange: bool,

    pub analysis_model: String,
    pub transition_model: String,

    pub allow_user_skip: bool,
    pub require_confirmation_on_complete: bool,
}

impl InterviewConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_total_exchanges == 0 {
            return Err(ValidationError::out_of_range(
                "max_total_exchanges",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        if self.analysis_model.trim().is_empty() {
            return Err(ValidationError::empty_field("analysis_model"));
        }
        if self.transition_model.trim().is_empty() {
            return Err(ValidationError::empty_field("transition_model"));
        }
        Ok(())
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_follow_ups_per_question: 3,
            max_total_exchanges: 50,
            auto_save_after_each_exchange: true,
            analysis_model: "gpt-4o".to_string(),
            transition_model: "gemini-2.0-flash".to_string(),
            allow_user_skip: true,
            require_confirmation_on_complete: true,
        }
    }
}
