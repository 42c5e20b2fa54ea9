//! Interview domain module.
//!
//! A research-objective driven interview: an ordered list of questions,
//! each with its own exchange ledger and follow-up budget, plus a
//! cross-question insight bank. The LLM and storage are external; this
//! module only holds state and the rules for moving it forward.
//!
//! # Module Organization
//!
//! - `status` - Closed lifecycle and classification enums
//! - `exchange` - Posed question + response + analysis
//! - `question` - Per-question ledger and follow-up budget
//! - `insight` - Insight bank with category/question indexes
//! - `state` - Aggregate root and session state machine
//! - `factory` - Construction from question specs
//! - `policy` - Follow-up vs transition decision
//! - `transcript` - Derived markdown view

mod config;
mod errors;
mod exchange;
mod factory;
mod insight;
mod policy;
mod question;
mod state;
mod status;
mod transcript;

pub use config::InterviewConfig;
pub use errors::InterviewError;
pub use exchange::{Exchange, ResponseAnalysis, RECOMMEND_FOLLOW_UP, RECOMMEND_TRANSITION};
pub use factory::{create_interview_state, QuestionSpec};
pub use insight::{Insight, InsightBank};
pub use policy::{TransitionDecision, TransitionPolicy, UserSignal};
pub use question::{QuestionState, DEFAULT_MAX_FOLLOW_UPS};
pub use state::{ConversationEntry, InterviewState};
pub use status::{
    FollowUpReason, Importance, InterviewStatus, MessageRole, ObjectiveStatus, QuestionStatus,
    TransitionReason,
};
pub use transcript::Transcript;
