//! Domain layer containing interview state, rules and prompt formatting.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `interview` - Interview aggregate, question ledgers, insight bank and transition policy
//! - `prompt` - Pure projection of interview state into LLM payloads

pub mod foundation;
pub mod interview;
pub mod prompt;
