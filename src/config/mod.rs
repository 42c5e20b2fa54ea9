//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `INTERVIEW_AGENT` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use interview_agent::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Storing interviews under {}", config.storage.data_dir.display());
//! ```

mod error;
mod interview;
mod logging;
mod prompt;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use interview::InterviewDefaults;
pub use logging::{LogFormat, LoggingConfig};
pub use prompt::PromptConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Where interview state is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Defaults for newly created interviews
    #[serde(default)]
    pub interview: InterviewDefaults,

    /// Prompt window sizes
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `INTERVIEW_AGENT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INTERVIEW_AGENT__STORAGE__DATA_DIR=/var/lib/interviews` -> `storage.data_dir`
    /// - `INTERVIEW_AGENT__INTERVIEW__MAX_TOTAL_EXCHANGES=20` -> `interview.max_total_exchanges`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INTERVIEW_AGENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.interview.validate()?;
        self.prompt.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "INTERVIEW_AGENT__STORAGE__BACKEND",
        "INTERVIEW_AGENT__STORAGE__DATA_DIR",
        "INTERVIEW_AGENT__INTERVIEW__MAX_TOTAL_EXCHANGES",
        "INTERVIEW_AGENT__INTERVIEW__ALLOW_USER_SKIP",
        "INTERVIEW_AGENT__PROMPT__MAX_HISTORY",
        "INTERVIEW_AGENT__LOGGING__LEVEL",
        "INTERVIEW_AGENT__LOGGING__FORMAT",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.interview.max_total_exchanges, 50);
        assert_eq!(config.prompt.max_history, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("INTERVIEW_AGENT__STORAGE__BACKEND", "memory");
        env::set_var("INTERVIEW_AGENT__STORAGE__DATA_DIR", "/tmp/interviews");
        env::set_var("INTERVIEW_AGENT__INTERVIEW__MAX_TOTAL_EXCHANGES", "20");
        env::set_var("INTERVIEW_AGENT__INTERVIEW__ALLOW_USER_SKIP", "false");
        env::set_var("INTERVIEW_AGENT__PROMPT__MAX_HISTORY", "4");
        env::set_var("INTERVIEW_AGENT__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/interviews"));
        assert_eq!(config.interview.max_total_exchanges, 20);
        assert!(!config.interview.allow_user_skip);
        assert_eq!(config.prompt.max_history, 4);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("INTERVIEW_AGENT__INTERVIEW__MAX_TOTAL_EXCHANGES", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidExchangeCeiling));
    }

    #[test]
    fn test_unparseable_value_is_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("INTERVIEW_AGENT__PROMPT__MAX_HISTORY", "lots");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
