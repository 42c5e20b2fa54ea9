//! State Storage Port - Interface for persisting interview state.
//!
//! The whole [`InterviewState`] is written after every turn; adapters must
//! replace the stored object atomically so a crash never leaves a half
//! written session behind.

use std::fmt;

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{InterviewError, InterviewState};

/// Errors that can occur during state storage operations
#[derive(Debug, thiserror::Error)]
pub enum StateStorageError {
    #[error("State not found for session: {0}")]
    NotFound(SessionId),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<StateStorageError> for InterviewError {
    fn from(err: StateStorageError) -> Self {
        match err {
            StateStorageError::NotFound(session_id) => InterviewError::NotFound(session_id),
            other => InterviewError::infrastructure(other.to_string()),
        }
    }
}

/// Where a saved state landed, as reported by the adapter.
///
/// A filesystem path for file storage, a `memory://` URI for the
/// in-memory adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLocation(String);

impl StateLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port for persisting and loading interview state
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Save interview state, replacing any previous version.
    ///
    /// # Errors
    /// Returns `StateStorageError` if save fails
    async fn save_state(&self, state: &InterviewState) -> Result<StateLocation, StateStorageError>;

    /// Load interview state
    ///
    /// # Errors
    /// Returns `StateStorageError::NotFound` if no state exists
    async fn load_state(&self, session_id: &SessionId) -> Result<InterviewState, StateStorageError>;

    /// Check if state exists for a session
    async fn exists(&self, session_id: &SessionId) -> Result<bool, StateStorageError>;

    /// Delete all state for a session. Deleting a missing session is not an error.
    async fn delete(&self, session_id: &SessionId) -> Result<(), StateStorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn test_state_storage_error_not_found() {
        let err = StateStorageError::NotFound(SessionId::new());
        assert!(err.to_string().contains("State not found"));
    }

    #[test]
    fn test_state_storage_error_serialization() {
        let err = StateStorageError::SerializationFailed("Invalid YAML".to_string());
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn not_found_maps_to_interview_not_found() {
        let id = SessionId::new();
        let err: InterviewError = StateStorageError::NotFound(id).into();
        assert_eq!(err, InterviewError::NotFound(id));
        assert_eq!(err.code(), ErrorCode::InterviewNotFound);
    }

    #[test]
    fn io_error_maps_to_infrastructure() {
        let err: InterviewError = StateStorageError::IoError("disk full".to_string()).into();
        assert_eq!(err.code(), ErrorCode::StorageError);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn location_displays_raw() {
        assert_eq!(StateLocation::new("memory://abc").to_string(), "memory://abc");
    }
}
