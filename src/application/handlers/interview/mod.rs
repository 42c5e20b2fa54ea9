//! Interview command handlers.

mod analysis_parser;
mod complete_interview;
mod pose_question;
mod record_answer;
mod sessions;
mod start_interview;
mod turn;

pub use analysis_parser::{parse_response_analysis, AnalysisParseError};
pub use complete_interview::{
    CompleteInterviewCommand, CompleteInterviewHandler, CompleteInterviewResult,
};
pub use pose_question::{PoseQuestionCommand, PoseQuestionHandler, PoseQuestionResult};
pub use record_answer::{RecordAnswerCommand, RecordAnswerHandler, TurnOutcome};
pub use sessions::InterviewSessions;
pub use start_interview::{StartInterviewCommand, StartInterviewHandler, StartInterviewResult};
pub use turn::{REASON_ALL_QUESTIONS_COMPLETED, REASON_MAX_TOTAL_EXCHANGES};
