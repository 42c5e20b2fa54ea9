//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    parse_response_analysis, AnalysisParseError, CompleteInterviewCommand,
    CompleteInterviewHandler, CompleteInterviewResult, InterviewSessions, PoseQuestionCommand,
    PoseQuestionHandler, PoseQuestionResult, RecordAnswerCommand, RecordAnswerHandler,
    StartInterviewCommand, StartInterviewHandler, StartInterviewResult, TurnOutcome,
};
