//! File-based State Storage Adapter
//!
//! Stores each interview as a directory named after its session id:
//!
//! ```text
//! <base>/<session_id>/state.yaml      authoritative state
//! <base>/<session_id>/transcript.md   regenerated on every save
//! ```
//!
//! `state.yaml` is written to a sibling temp file and renamed into place,
//! so readers see either the previous or the new version.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{InterviewState, Transcript};
use crate::ports::{StateLocation, StateStorage, StateStorageError};

const STATE_FILE: &str = "state.yaml";
const STATE_TMP_FILE: &str = "state.yaml.tmp";
const TRANSCRIPT_FILE: &str = "transcript.md";

/// File-based storage for interview state
#[derive(Debug, Clone)]
pub struct FileStateStorage {
    base_path: PathBuf,
}

impl FileStateStorage {
    /// Create a new file storage with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileStateStorage::new("./data/interviews");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the directory path for a specific session
    fn session_dir(&self, session_id: &SessionId) -> PathBuf {
        self.base_path.join(session_id.to_string())
    }

    fn state_file_path(&self, session_id: &SessionId) -> PathBuf {
        self.session_dir(session_id).join(STATE_FILE)
    }

    fn transcript_file_path(&self, session_id: &SessionId) -> PathBuf {
        self.session_dir(session_id).join(TRANSCRIPT_FILE)
    }

    async fn write_atomically(&self, dir: &Path, contents: String) -> Result<PathBuf, StateStorageError> {
        let tmp_path = dir.join(STATE_TMP_FILE);
        let final_path = dir.join(STATE_FILE);

        fs::write(&tmp_path, contents).await.map_err(io_error)?;
        fs::rename(&tmp_path, &final_path).await.map_err(io_error)?;

        Ok(final_path)
    }
}

fn io_error(e: std::io::Error) -> StateStorageError {
    StateStorageError::IoError(e.to_string())
}

#[async_trait]
impl StateStorage for FileStateStorage {
    async fn save_state(&self, state: &InterviewState) -> Result<StateLocation, StateStorageError> {
        let dir = self.session_dir(&state.session_id);
        fs::create_dir_all(&dir).await.map_err(io_error)?;

        let yaml = serde_yaml::to_string(state)
            .map_err(|e| StateStorageError::SerializationFailed(e.to_string()))?;
        let path = self.write_atomically(&dir, yaml).await?;

        fs::write(self.transcript_file_path(&state.session_id), Transcript::render(state))
            .await
            .map_err(io_error)?;

        debug!(
            session_id = %state.session_id,
            path = %path.display(),
            "Interview state saved"
        );
        Ok(StateLocation::new(path.display().to_string()))
    }

    async fn load_state(&self, session_id: &SessionId) -> Result<InterviewState, StateStorageError> {
        let file_path = self.state_file_path(session_id);

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StateStorageError::NotFound(*session_id));
            }
            Err(e) => return Err(io_error(e)),
        };

        serde_yaml::from_str(&yaml)
            .map_err(|e| StateStorageError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self, session_id: &SessionId) -> Result<bool, StateStorageError> {
        fs::try_exists(self.state_file_path(session_id))
            .await
            .map_err(io_error)
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), StateStorageError> {
        match fs::remove_dir_all(self.session_dir(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}
