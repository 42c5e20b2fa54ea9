//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and error
//! types that the interview domain is written in.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{ExchangeId, InsightId, QuestionId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
