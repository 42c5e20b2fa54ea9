//! In-Memory State Storage Adapter
//!
//! Keeps interview states in a shared map. Useful for testing and
//! development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::interview::InterviewState;
use crate::ports::{StateLocation, StateStorage, StateStorageError};

/// In-memory storage for interview state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStorage {
    states: Arc<RwLock<HashMap<SessionId, InterviewState>>>,
}

impl InMemoryStateStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }

    /// Get the number of stored states
    pub async fn state_count(&self) -> usize {
        self.states.read().await.len()
    }
}

#[async_trait]
impl StateStorage for InMemoryStateStorage {
    async fn save_state(&self, state: &InterviewState) -> Result<StateLocation, StateStorageError> {
        let mut states = self.states.write().await;
        states.insert(state.session_id, state.clone());
        Ok(StateLocation::new(format!("memory://{}", state.session_id)))
    }

    async fn load_state(&self, session_id: &SessionId) -> Result<InterviewState, StateStorageError> {
        let states = self.states.read().await;
        states
            .get(session_id)
            .cloned()
            .ok_or(StateStorageError::NotFound(*session_id))
    }

    async fn exists(&self, session_id: &SessionId) -> Result<bool, StateStorageError> {
        let states = self.states.read().await;
        Ok(states.contains_key(session_id))
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), StateStorageError> {
        self.states.write().await.remove(session_id);
        Ok(())
    }
}
