//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `StateStorage` - Whole-object persistence of interview state

mod state_storage;

pub use state_storage::{StateLocation, StateStorage, StateStorageError};
