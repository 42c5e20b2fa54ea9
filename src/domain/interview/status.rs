//! Closed enumerations for interview and question lifecycles.
//!
//! Every enum serializes as its snake_case tag (`"in_progress"`,
//! `"null_answer"`, ...) so persisted state stays readable and stable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Overall lifecycle of an interview session.
///
/// `initializing -> in_progress -> {paused <-> in_progress, completed, failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    Initializing,
    InProgress,
    Paused,
    Completed,
    Failed,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl StateMachine for InterviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InterviewStatus::*;
        matches!(
            (self, target),
            (Initializing, InProgress)
                | (InProgress, Paused)
                | (Paused, InProgress)
                | (InProgress, Completed)
                | (InProgress, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InterviewStatus::*;
        match self {
            Initializing => vec![InProgress],
            InProgress => vec![Paused, Completed, Failed],
            Paused => vec![InProgress],
            Completed | Failed => vec![],
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an individual question.
///
/// `pending -> active -> follow_up (self-loop) -> {satisfied, skipped, null_answer}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Not yet asked.
    #[default]
    Pending,
    /// Asked, awaiting the first response.
    Active,
    /// Probing with follow-ups.
    FollowUp,
    /// Research objective met.
    Satisfied,
    /// User chose to skip.
    Skipped,
    /// User could not answer.
    NullAnswer,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::FollowUp => "follow_up",
            Self::Satisfied => "satisfied",
            Self::Skipped => "skipped",
            Self::NullAnswer => "null_answer",
        }
    }
}

impl StateMachine for QuestionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use QuestionStatus::*;
        matches!(
            (self, target),
            (Pending, Active)
                | (Active, FollowUp)
                | (FollowUp, FollowUp)
                | (Active | FollowUp, Satisfied | Skipped | NullAnswer)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use QuestionStatus::*;
        match self {
            Pending => vec![Active],
            Active => vec![FollowUp, Satisfied, Skipped, NullAnswer],
            FollowUp => vec![FollowUp, Satisfied, Skipped, NullAnswer],
            Satisfied | Skipped | NullAnswer => vec![],
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well a question's research objective has been met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    #[default]
    NotStarted,
    Partial,
    Satisfied,
    Exceeded,
}

impl ObjectiveStatus {
    /// Satisfied or better.
    pub fn is_met(&self) -> bool {
        matches!(self, Self::Satisfied | Self::Exceeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Partial => "partial",
            Self::Satisfied => "satisfied",
            Self::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a follow-up question was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpReason {
    ObjectiveNotSatisfied,
    ResponseUnclear,
    /// Interesting thread worth exploring.
    ProbeDeeper,
    ClarifyContradiction,
    /// Possible sensitive topic; the user may want to skip.
    UserHesitation,
}

impl FollowUpReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectiveNotSatisfied => "objective_not_satisfied",
            Self::ResponseUnclear => "response_unclear",
            Self::ProbeDeeper => "probe_deeper",
            Self::ClarifyContradiction => "clarify_contradiction",
            Self::UserHesitation => "user_hesitation",
        }
    }

    /// Parses a snake_case tag, returning `None` for anything unrecognised.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "objective_not_satisfied" => Some(Self::ObjectiveNotSatisfied),
            "response_unclear" => Some(Self::ResponseUnclear),
            "probe_deeper" => Some(Self::ProbeDeeper),
            "clarify_contradiction" => Some(Self::ClarifyContradiction),
            "user_hesitation" => Some(Self::UserHesitation),
            _ => None,
        }
    }
}

impl fmt::Display for FollowUpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the interview moved past a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    ObjectiveSatisfied,
    NullAnswer,
    UserSkip,
    /// Follow-up budget exhausted.
    MaxFollowUps,
}

impl TransitionReason {
    /// Terminal question status recorded for this reason.
    pub fn resulting_status(&self) -> QuestionStatus {
        match self {
            Self::ObjectiveSatisfied | Self::MaxFollowUps => QuestionStatus::Satisfied,
            Self::UserSkip => QuestionStatus::Skipped,
            Self::NullAnswer => QuestionStatus::NullAnswer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectiveSatisfied => "objective_satisfied",
            Self::NullAnswer => "null_answer",
            Self::UserSkip => "user_skip",
            Self::MaxFollowUps => "max_follow_ups",
        }
    }
}

impl fmt::Display for TransitionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Importance ranking of an insight. Ordered from least to most salient.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Importance {
    /// High or critical.
    pub fn is_high(&self) -> bool {
        *self >= Importance::High
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speaker of a conversation-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
