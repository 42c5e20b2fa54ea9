//! Human-readable markdown view of an interview.
//!
//! Always regenerated from [`InterviewState`]; never parsed back.

use std::fmt;

use super::state::InterviewState;

/// Markdown rendering of one interview, usable with `format!` or through
/// [`Transcript::render`].
pub struct Transcript<'a> {
    state: &'a InterviewState,
}

impl<'a> Transcript<'a> {
    pub fn new(state: &'a InterviewState) -> Self {
        Self { state }
    }

    pub fn render(state: &InterviewState) -> String {
        Transcript::new(state).to_string()
    }
}

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;

        writeln!(f, "# {}", state.title)?;
        writeln!(f)?;
        writeln!(f, "- Session: `{}`", state.session_id)?;
        writeln!(f, "- Status: {}", state.status)?;
        writeln!(
            f,
            "- Progress: {}/{} questions ({:.1}%)",
            state.completed_questions,
            state.total_questions,
            state.calculate_progress()
        )?;
        if let Some(reason) = &state.termination_reason {
            writeln!(f, "- Ended: {}", reason)?;
        }
        if !state.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "> {}", state.context.replace('\n', "\n> "))?;
        }

        for question in &state.questions {
            writeln!(f)?;
            writeln!(
                f,
                "## Q{}. {} [{}]",
                question.order, question.base_question_text, question.status
            )?;
            writeln!(f)?;
            writeln!(f, "_Objective: {}_", question.research_objective)?;

            for exchange in &question.exchanges {
                writeln!(f)?;
                let label = match exchange.follow_up_reason {
                    Some(reason) if exchange.is_follow_up => format!("Follow-up ({reason})"),
                    _ if exchange.is_follow_up => "Follow-up".to_string(),
                    _ => "Interviewer".to_string(),
                };
                writeln!(f, "**{}:** {}", label, exchange.question_text)?;
                writeln!(f)?;
                match &exchange.user_response {
                    Some(response) => writeln!(f, "**Participant:** {}", response)?,
                    None => writeln!(f, "_(awaiting response)_")?,
                }
            }

            if let Some(message) = &question.transition_message {
                writeln!(f)?;
                writeln!(f, "_{}_", message)?;
            }
        }

        if !state.insight_bank.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Insights")?;
            writeln!(f)?;
            for insight in &state.insight_bank.insights {
                let category = insight
                    .category
                    .as_deref()
                    .map(|c| format!(" ({c})"))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "- [{}]{} {}",
                    insight.importance, category, insight.content
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ExchangeId;
    use crate::domain::interview::{
        create_interview_state, Importance, ObjectiveStatus, QuestionSpec, ResponseAnalysis,
        TransitionReason,
    };

    fn sample() -> InterviewState {
        create_interview_state(
            "Onboarding study",
            "Product research",
            &[
                QuestionSpec::new("q1", 1, "How was signup?", "Signup friction"),
                QuestionSpec::new("q2", 2, "Favourite feature?", "Feature value"),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn renders_title_and_questions() {
        let text = Transcript::render(&sample());
        assert!(text.starts_with("# Onboarding study\n"));
        assert!(text.contains("## Q1. How was signup? [pending]"));
        assert!(text.contains("## Q2. Favourite feature? [pending]"));
        assert!(!text.contains("## Insights"));
    }

    #[test]
    fn renders_exchanges_and_insights() {
        let mut state = sample();
        state.start().unwrap();
        let q = state.current_question_mut().unwrap();
        q.activate().unwrap();
        q.add_exchange("How was signup?", false, None);
        q.record_response(
            "Easy, but the dashboard overwhelmed me",
            ResponseAnalysis::new(ObjectiveStatus::Satisfied, vec![], "transition", "clear"),
        )
        .unwrap();
        q.finalize(
            TransitionReason::ObjectiveSatisfied,
            Some("Thanks, that's helpful.".to_string()),
        )
        .unwrap();
        let qid = q.id.clone();
        state.insight_bank.add_insight(
            "Dashboard overwhelming",
            qid,
            ExchangeId::new(),
            Some("pain_point".to_string()),
            Importance::High,
        );

        let text = Transcript::render(&state);
        assert!(text.contains("**Interviewer:** How was signup?"));
        assert!(text.contains("**Participant:** Easy, but the dashboard overwhelmed me"));
        assert!(text.contains("_Thanks, that's helpful._"));
        assert!(text.contains("- [high] (pain_point) Dashboard overwhelming"));
    }

    #[test]
    fn marks_unanswered_exchange() {
        let mut state = sample();
        state
            .current_question_mut()
            .unwrap()
            .add_exchange("How was signup?", false, None);
        assert!(Transcript::render(&state).contains("_(awaiting response)_"));
    }

    #[test]
    fn display_matches_render() {
        let state = sample();
        assert_eq!(format!("{}", Transcript::new(&state)), Transcript::render(&state));
    }
}
