//! Application handlers.
//!
//! Command handlers that orchestrate domain operations against the
//! storage port.

pub mod interview;

pub use interview::{
    parse_response_analysis, AnalysisParseError, CompleteInterviewCommand,
    CompleteInterviewHandler, CompleteInterviewResult, InterviewSessions, PoseQuestionCommand,
    PoseQuestionHandler, PoseQuestionResult, RecordAnswerCommand, RecordAnswerHandler,
    StartInterviewCommand, StartInterviewHandler, StartInterviewResult, TurnOutcome,
};
