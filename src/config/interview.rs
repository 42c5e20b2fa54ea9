//! Interview defaults applied to newly created sessions

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::interview::InterviewConfig;

use super::error::ValidationError;

/// Process-wide defaults for new interviews
///
/// Every field falls back to the domain default; see [`InterviewConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterviewDefaults {
    pub max_follow_ups_per_question: u32,
    pub max_total_exchanges: u32,
    pub auto_save_after_each_exchange: bool,
    pub analysis_model: String,
    pub transition_model: String,
    pub allow_user_skip: bool,
    pub require_confirmation_on_complete: bool,

    /// Question spec file (YAML or JSON) used by the binary when no path is
    /// given on the command line
    pub question_file: Option<PathBuf>,
}

impl InterviewDefaults {
    /// Snapshot handed to a new interview
    pub fn to_interview_config(&self) -> InterviewConfig {
        InterviewConfig {
            max_follow_ups_per_question: self.max_follow_ups_per_question,
            max_total_exchanges: self.max_total_exchanges,
            auto_save_after_each_exchange: self.auto_save_after_each_exchange,
            analysis_model: self.analysis_model.clone(),
            transition_model: self.transition_model.clone(),
            allow_user_skip: self.allow_user_skip,
            require_confirmation_on_complete: self.require_confirmation_on_complete,
        }
    }

    /// Validate interview defaults
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_total_exchanges == 0 {
            return Err(ValidationError::InvalidExchangeCeiling);
        }
        if self.analysis_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName("analysis_model"));
        }
        if self.transition_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName("transition_model"));
        }
        Ok(())
    }
}

impl Default for InterviewDefaults {
    fn default() -> Self {
        let config = InterviewConfig::default();
        Self {
            max_follow_ups_per_question: config.max_follow_ups_per_question,
            max_total_exchanges: config.max_total_exchanges,
            auto_save_after_each_exchange: config.auto_save_after_each_exchange,
            analysis_model: config.analysis_model,
            transition_model: config.transition_model,
            allow_user_skip: config.allow_user_skip,
            require_confirmation_on_complete: config.require_confirmation_on_complete,
            question_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let defaults = InterviewDefaults::default();
        assert_eq!(defaults.to_interview_config(), InterviewConfig::default());
        assert!(defaults.question_file.is_none());
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn test_overrides_flow_into_interview_config() {
        let defaults = InterviewDefaults {
            max_follow_ups_per_question: 1,
            allow_user_skip: false,
            ..Default::default()
        };
        let config = defaults.to_interview_config();
        assert_eq!(config.max_follow_ups_per_question, 1);
        assert!(!config.allow_user_skip);
        assert_eq!(config.max_total_exchanges, 50);
    }

    #[test]
    fn test_zero_exchange_ceiling_rejected() {
        let defaults = InterviewDefaults {
            max_total_exchanges: 0,
            ..Default::default()
        };
        assert_eq!(defaults.validate(), Err(ValidationError::InvalidExchangeCeiling));
    }

    #[test]
    fn test_blank_model_rejected() {
        let defaults = InterviewDefaults {
            transition_model: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            defaults.validate(),
            Err(ValidationError::EmptyModelName("transition_model"))
        );
    }

    #[test]
    fn test_partial_deserialization() {
        let defaults: InterviewDefaults =
            serde_json::from_str(r#"{"max_total_exchanges": 20, "question_file": "q.yaml"}"#)
                .unwrap();
        assert_eq!(defaults.max_total_exchanges, 20);
        assert_eq!(defaults.analysis_model, "gpt-4o");
        assert_eq!(defaults.question_file, Some(PathBuf::from("q.yaml")));
    }
}
