//! Builds a fresh [`InterviewState`] from an interview document's question
//! list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::domain::foundation::{QuestionId, ValidationError};

use super::config::InterviewConfig;
use super::errors::InterviewError;
use super::question::QuestionState;
use super::state::InterviewState;

/// One question record as it arrives from the interview document.
///
/// Every field is optional at the type level so that loosely-typed input
/// (YAML, JSON) can be rejected with a field-specific [`ValidationError`]
/// instead of an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub base_question_text: Option<String>,
    #[serde(default)]
    pub research_objective: Option<String>,
}

impl QuestionSpec {
    pub fn new(
        id: impl Into<String>,
        order: i64,
        base_question_text: impl Into<String>,
        research_objective: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            order: Some(order),
            base_question_text: Some(base_question_text.into()),
            research_objective: Some(research_objective.into()),
        }
    }
}

struct ValidSpec {
    id: QuestionId,
    order: i64,
    text: String,
    objective: String,
}

fn required_text(value: &Option<String>, field: String) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::missing_field(field)),
        Some(v) if v.trim().is_empty() => Err(ValidationError::empty_field(field)),
        Some(v) => Ok(v.clone()),
    }
}

fn validate_spec(index: usize, spec: &QuestionSpec) -> Result<ValidSpec, ValidationError> {
    let field = |name: &str| format!("questions[{index}].{name}");

    let id = required_text(&spec.id, field("id"))?;
    let order = spec
        .order
        .ok_or_else(|| ValidationError::missing_field(field("order")))?;
    let text = required_text(&spec.base_question_text, field("base_question_text"))?;
    let objective = required_text(&spec.research_objective, field("research_objective"))?;

    Ok(ValidSpec {
        id: QuestionId::new(id)?,
        order,
        text,
        objective,
    })
}

/// Creates an interview ready for its first turn.
///
/// Questions are stable-sorted by `order` (ties keep input order) and each
/// gets the configured follow-up budget. Fails on the first spec missing a
/// required field, on duplicate ids, or on an invalid config.
pub fn create_interview_state(
    title: impl Into<String>,
    context: impl Into<String>,
    questions: &[QuestionSpec],
    config: Option<InterviewConfig>,
) -> Result<InterviewState, InterviewError> {
    let config = config.unwrap_or_default();
    config.validate()?;

    let mut specs = questions
        .iter()
        .enumerate()
        .map(|(i, spec)| validate_spec(i, spec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for spec in &specs {
        if !seen.insert(spec.id.clone()) {
            return Err(ValidationError::invalid_format(
                "questions.id",
                format!("duplicate question id '{}'", spec.id),
            )
            .into());
        }
    }

    specs.sort_by_key(|spec| spec.order);

    let question_states = specs
        .into_iter()
        .map(|spec| {
            QuestionState::new(
                spec.id,
                spec.order,
                spec.text,
                spec.objective,
                config.max_follow_ups_per_question,
            )
        })
        .collect::<Vec<_>>();

    let state = InterviewState::new(title.into(), context.into(), question_states, config);
    debug!(
        session_id = %state.session_id,
        total_questions = state.total_questions,
        "Interview state created"
    );
    Ok(state)
}
