//! Parsing of the analysis model's JSON verdict.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::interview::{InterviewError, ResponseAnalysis};

#[derive(Debug, Error)]
pub enum AnalysisParseError {
    #[error("Malformed analysis JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid analysis: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<AnalysisParseError> for InterviewError {
    fn from(err: AnalysisParseError) -> Self {
        match err {
            AnalysisParseError::Invalid(e) => InterviewError::Validation(e),
            AnalysisParseError::Malformed(e) => {
                InterviewError::Validation(ValidationError::invalid_format("analysis", e.to_string()))
            }
        }
    }
}

/// Parses and validates a `ResponseAnalysis` object.
///
/// Tolerates a surrounding markdown code fence (```` ```json ````), which
/// models commonly add.
pub fn parse_response_analysis(raw: &str) -> Result<ResponseAnalysis, AnalysisParseError> {
    let analysis: ResponseAnalysis = serde_json::from_str(strip_code_fence(raw))?;
    analysis.validate()?;
    Ok(analysis)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
