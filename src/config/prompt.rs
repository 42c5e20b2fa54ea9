//! Prompt window configuration

use serde::Deserialize;

use crate::domain::prompt::PromptOptions;

use super::error::ValidationError;

const MAX_WINDOW: usize = 1000;

/// Sliding window sizes for the interviewer payload
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    /// Most recent conversation entries rendered; 0 omits the section
    #[serde(default = "default_window")]
    pub max_history: usize,

    /// Insights rendered, high importance first; 0 omits the section
    #[serde(default = "default_window")]
    pub max_insights: usize,
}

fn default_window() -> usize {
    10
}

impl PromptConfig {
    pub fn to_options(&self) -> PromptOptions {
        PromptOptions {
            max_history: self.max_history,
            max_insights: self.max_insights,
        }
    }

    /// Validate prompt configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_history > MAX_WINDOW || self.max_insights > MAX_WINDOW {
            return Err(ValidationError::PromptWindowTooLarge { max: MAX_WINDOW });
        }
        Ok(())
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_history: default_window(),
            max_insights: default_window(),
        }
    }
}
