//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Interview state persistence (filesystem, in-memory)

pub mod storage;

pub use storage::{FileStateStorage, InMemoryStateStorage};
