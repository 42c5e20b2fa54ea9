//! InterviewSessions - Working set of interview states between turns.
//!
//! Handlers read and write sessions through this type rather than the
//! storage port directly. Sessions with `auto_save_after_each_exchange`
//! off keep their latest state here until a save is forced by a terminal
//! status or an explicit [`InterviewSessions::flush`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{InterviewError, InterviewState, InterviewStatus};
use crate::ports::{StateLocation, StateStorage};

pub struct InterviewSessions {
    storage: Arc<dyn StateStorage>,
    unsaved: RwLock<HashMap<SessionId, InterviewState>>,
}

impl InterviewSessions {
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            storage,
            unsaved: RwLock::new(HashMap::new()),
        }
    }

    /// Latest state of a session, preferring turns not yet written.
    pub async fn load(&self, session_id: &SessionId) -> Result<InterviewState, InterviewError> {
        if let Some(state) = self.unsaved.read().await.get(session_id) {
            return Ok(state.clone());
        }
        Ok(self.storage.load_state(session_id).await?)
    }

    /// Writes `state` and drops any unsaved copy of it.
    pub async fn save(&self, state: &InterviewState) -> Result<StateLocation, InterviewError> {
        let location = self.storage.save_state(state).await?;
        self.unsaved.write().await.remove(&state.session_id);
        Ok(location)
    }

    /// Records the outcome of a turn.
    ///
    /// Saves when auto-save is on or the interview reached a terminal
    /// status, otherwise keeps the state in memory and returns `None`.
    pub async fn commit(
        &self,
        state: &mut InterviewState,
    ) -> Result<Option<StateLocation>, InterviewError> {
        state.atomic_update();
        let terminal = matches!(
            state.status,
            InterviewStatus::Completed | InterviewStatus::Failed
        );
        if state.config.auto_save_after_each_exchange || terminal {
            return Ok(Some(self.save(state).await?));
        }

        debug!(session_id = %state.session_id, "Turn kept unsaved");
        self.unsaved
            .write()
            .await
            .insert(state.session_id, state.clone());
        Ok(None)
    }

    /// Writes the unsaved turns of a session, if any.
    pub async fn flush(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StateLocation>, InterviewError> {
        let pending = self.unsaved.read().await.get(session_id).cloned();
        match pending {
            Some(state) => Ok(Some(self.save(&state).await?)),
            None => Ok(None),
        }
    }

    pub async fn has_unsaved(&self, session_id: &SessionId) -> bool {
        self.unsaved.read().await.contains_key(session_id)
    }
}
