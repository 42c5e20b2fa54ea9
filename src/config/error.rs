//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("max_total_exchanges must be at least 1")]
    InvalidExchangeCeiling,

    #[error("Model name must not be empty: {0}")]
    EmptyModelName(&'static str),

    #[error("Prompt window exceeds maximum allowed ({max})")]
    PromptWindowTooLarge { max: usize },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
