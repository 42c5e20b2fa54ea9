//! Storage Adapters
//!
//! Implementations of the StateStorage port for persisting interview state.
//!
//! ## Available Adapters
//!
//! - **FileStateStorage** - One directory per session holding `state.yaml`
//!   and a regenerated `transcript.md`
//! - **InMemoryStateStorage** - Stores state in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStateStorage, InMemoryStateStorage};
//!
//! // Production: file-based storage
//! let storage = FileStateStorage::new("./data/interviews");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryStateStorage::new();
//! ```

mod file_state_storage;
mod in_memory_state_storage;

pub use file_state_storage::FileStateStorage;
pub use in_memory_state_storage::InMemoryStateStorage;
