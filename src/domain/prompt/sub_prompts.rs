//! Payloads for the narrower LLM calls: response analysis, transition
//! wording and follow-up generation, plus a stateless minimal context.

use crate::domain::interview::{Exchange, FollowUpReason, QuestionState, TransitionReason};

use super::markup::{block, element, leaf, leaf_raw, text_block};

pub const TASK_ANALYZE: &str =
    "Analyze this response against the research objective. Return a ResponseAnalysis JSON object.";
pub const TASK_TRANSITION: &str = "Generate a natural transition: validate their response, \
bridge to the next topic, then ask the next question.";
pub const TASK_FOLLOW_UP: &str = "Generate ONE targeted follow-up question that builds on their \
response and advances the research objective.";
pub const TASK_MINIMAL_EVALUATE: &str =
    "Evaluate the response and decide: follow-up or transition?";
pub const TASK_MINIMAL_BEGIN: &str = "Ask this question naturally to begin the interview.";

fn task(text: &str) -> String {
    format!("<task>{text}</task>\n")
}

/// Context for judging a single response.
///
/// `exchange_history` is the full ledger of the question including the
/// exchange being analysed; only the earlier ones are rendered.
pub fn format_response_analyzer_prompt(
    research_objective: &str,
    question_asked: &str,
    user_response: &str,
    exchange_history: &[Exchange],
    follow_up_count: u32,
    max_follow_ups: u32,
) -> String {
    let mut prompt = String::new();

    prompt += &text_block("research_objective", research_objective);
    prompt += &text_block("question_asked", question_asked);
    prompt += &text_block("user_response", user_response);

    if let Some((_, previous)) = exchange_history.split_last() {
        if !previous.is_empty() {
            let exchanges: Vec<String> = previous
                .iter()
                .enumerate()
                .map(|(i, exchange)| {
                    let mut fields = vec![leaf(2, "asked", &exchange.question_text)];
                    if let Some(response) = &exchange.user_response {
                        fields.push(leaf(2, "response", response));
                    }
                    element(1, &format!(r#"exchange num="{}""#, i + 1), "exchange", &fields)
                })
                .collect();
            prompt += &block("previous_exchanges", &exchanges);
        }
    }

    prompt += &block(
        "constraints",
        &[
            leaf_raw(1, "follow_up_count", follow_up_count),
            leaf_raw(1, "max_follow_ups", max_follow_ups),
        ],
    );
    prompt += &task(TASK_ANALYZE);

    prompt
}

/// Analyzer payload for the response to `question`'s latest exchange.
///
/// Returns `None` when nothing has been asked yet.
pub fn format_response_analyzer_for(question: &QuestionState, user_response: &str) -> Option<String> {
    let current = question.current_exchange()?;
    Some(format_response_analyzer_prompt(
        &question.research_objective,
        &current.question_text,
        user_response,
        &question.exchanges,
        question.follow_up_count,
        question.max_follow_ups,
    ))
}

/// Context for wording the move from one question to the next.
pub fn format_transition_generator_prompt(
    user_response: &str,
    transition_reason: TransitionReason,
    next_question: &str,
    key_insight: Option<&str>,
) -> String {
    let mut prompt = text_block("user_response", user_response);

    prompt += &format!("<transition_reason>{transition_reason}</transition_reason>\n\n");
    if let Some(insight) = key_insight.filter(|i| !i.is_empty()) {
        prompt += &text_block("key_insight", insight);
    }
    prompt += &text_block("next_question", next_question);
    prompt += &task(TASK_TRANSITION);

    prompt
}

/// Context for generating one follow-up question.
///
/// Empty `objective_gaps` or `previous_follow_ups` omit their section.
pub fn format_followup_generator_prompt(
    research_objective: &str,
    user_response: &str,
    follow_up_reason: FollowUpReason,
    objective_gaps: &[String],
    previous_follow_ups: &[&str],
) -> String {
    let mut prompt = String::new();

    prompt += &text_block("research_objective", research_objective);
    prompt += &text_block("user_response", user_response);
    prompt += &format!("<follow_up_reason>{follow_up_reason}</follow_up_reason>\n\n");

    if !objective_gaps.is_empty() {
        let gaps: Vec<String> = objective_gaps.iter().map(|g| leaf(1, "gap", g)).collect();
        prompt += &block("objective_gaps", &gaps);
    }
    if !previous_follow_ups.is_empty() {
        let previous: Vec<String> = previous_follow_ups
            .iter()
            .map(|q| leaf(1, "previous", q))
            .collect();
        prompt += &block("previous_follow_ups", &previous);
    }
    prompt += &task(TASK_FOLLOW_UP);

    prompt
}

/// Stateless payload for callers that track no interview state.
pub fn format_minimal_context(
    question_text: &str,
    research_objective: &str,
    user_response: Option<&str>,
) -> String {
    let mut prompt = text_block("question", question_text);
    prompt += &text_block("research_objective", research_objective);

    match user_response.filter(|r| !r.is_empty()) {
        Some(response) => {
            prompt += &text_block("user_response", response);
            prompt += &task(TASK_MINIMAL_EVALUATE);
        }
        None => prompt += &task(TASK_MINIMAL_BEGIN),
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::interview::{ObjectiveStatus, ResponseAnalysis};

    fn question() -> QuestionState {
        QuestionState::new(
            QuestionId::new("q1").unwrap(),
            1,
            "How was onboarding?",
            "Onboarding friction",
            3,
        )
    }

    mod response_analyzer {
        use super::*;

        #[test]
        fn single_exchange_has_no_previous_section() {
            let mut q = question();
            q.add_exchange("How was onboarding?", false, None);

            let prompt = format_response_analyzer_for(&q, "Fine").unwrap();
            assert!(prompt.starts_with(
                "<research_objective>\n\tOnboarding friction\n</research_objective>\n\n"
            ));
            assert!(prompt.contains("<question_asked>\n\tHow was onboarding?\n</question_asked>"));
            assert!(!prompt.contains("<previous_exchanges>"));
            assert!(prompt.contains(
                "<constraints>\n\t<follow_up_count>0</follow_up_count>\n\t<max_follow_ups>3</max_follow_ups>\n</constraints>\n\n"
            ));
            assert!(prompt.ends_with(&format!("<task>{TASK_ANALYZE}</task>\n")));
        }

        #[test]
        fn earlier_exchanges_are_listed_excluding_current() {
            let mut q = question();
            q.add_exchange("How was onboarding?", false, None);
            q.record_response(
                "Confusing",
                ResponseAnalysis::new(ObjectiveStatus::Partial, vec![], "follow_up", "vague"),
            )
            .unwrap();
            q.add_exchange("What confused you?", true, Some(FollowUpReason::ProbeDeeper));

            let prompt = format_response_analyzer_for(&q, "The dashboard").unwrap();
            assert!(prompt.contains(
                "<previous_exchanges>\n\t<exchange num=\"1\">\n\t\t<asked>How was onboarding?</asked>\n\t\t<response>Confusing</response>\n\t</exchange>\n</previous_exchanges>"
            ));
            assert!(prompt.contains("<question_asked>\n\tWhat confused you?\n</question_asked>"));
            assert!(!prompt.contains("<exchange num=\"2\">"));
            assert!(prompt.contains("<follow_up_count>1</follow_up_count>"));
        }

        #[test]
        fn nothing_asked_yields_none() {
            assert!(format_response_analyzer_for(&question(), "hi").is_none());
        }
    }

    #[test]
    fn transition_prompt_with_and_without_insight() {
        let with = format_transition_generator_prompt(
            "It was great",
            TransitionReason::ObjectiveSatisfied,
            "What features matter?",
            Some("Values speed"),
        );
        assert_eq!(
            with,
            format!(
                "<user_response>\n\tIt was great\n</user_response>\n\n\
<transition_reason>objective_satisfied</transition_reason>\n\n\
<key_insight>\n\tValues speed\n</key_insight>\n\n\
<next_question>\n\tWhat features matter?\n</next_question>\n\n\
<task>{TASK_TRANSITION}</task>\n"
            )
        );

        let without = format_transition_generator_prompt(
            "meh",
            TransitionReason::UserSkip,
            "Next?",
            None,
        );
        assert!(!without.contains("<key_insight>"));
        assert!(without.contains("<transition_reason>user_skip</transition_reason>"));
    }

    #[test]
    fn followup_prompt_lists_gaps_and_previous() {
        let prompt = format_followup_generator_prompt(
            "Onboarding friction",
            "It was hard",
            FollowUpReason::ResponseUnclear,
            &["which step".to_string()],
            &["What was hard?"],
        );
        assert!(prompt.contains("<follow_up_reason>response_unclear</follow_up_reason>"));
        assert!(prompt.contains("<objective_gaps>\n\t<gap>which step</gap>\n</objective_gaps>"));
        assert!(prompt.contains(
            "<previous_follow_ups>\n\t<previous>What was hard?</previous>\n</previous_follow_ups>"
        ));

        let bare = format_followup_generator_prompt(
            "o",
            "r",
            FollowUpReason::ProbeDeeper,
            &[],
            &[],
        );
        assert!(!bare.contains("<objective_gaps>"));
        assert!(!bare.contains("<previous_follow_ups>"));
    }

    #[test]
    fn minimal_context_switches_task_on_response() {
        let opening = format_minimal_context("Q?", "Obj", None);
        assert_eq!(
            opening,
            format!(
                "<question>\n\tQ?\n</question>\n\n<research_objective>\n\tObj\n</research_objective>\n\n<task>{TASK_MINIMAL_BEGIN}</task>\n"
            )
        );

        let evaluating = format_minimal_context("Q?", "Obj", Some("a < b"));
        assert!(evaluating.contains("<user_response>\n\ta &lt; b\n</user_response>"));
        assert!(evaluating.ends_with(&format!("<task>{TASK_MINIMAL_EVALUATE}</task>\n")));
    }

    mod escaping {
        use super::*;

        const HOSTILE: &str = r#"<script>&"'</>"#;
        const ESCAPED: &str = "&lt;script&gt;&amp;&quot;&apos;&lt;/&gt;";

        fn assert_contained(prompt: &str, occurrences: usize) {
            assert!(!prompt.contains("<script>"));
            assert!(!prompt.contains("</>"));
            assert_eq!(prompt.matches(ESCAPED).count(), occurrences);
        }

        #[test]
        fn analyzer_escapes_every_free_text_field() {
            let mut q = QuestionState::new(QuestionId::new("q1").unwrap(), 1, HOSTILE, HOSTILE, 3);
            q.add_exchange(HOSTILE, false, None);
            q.record_response(
                HOSTILE,
                ResponseAnalysis::new(ObjectiveStatus::Partial, vec![], "follow_up", "x"),
            )
            .unwrap();
            q.add_exchange(HOSTILE, true, Some(FollowUpReason::ProbeDeeper));

            let prompt = format_response_analyzer_for(&q, HOSTILE).unwrap();
            // objective, asked, response, previous asked, previous response
            assert_contained(&prompt, 5);
        }

        #[test]
        fn transition_escapes_response_insight_and_next_question() {
            let prompt = format_transition_generator_prompt(
                HOSTILE,
                TransitionReason::ObjectiveSatisfied,
                HOSTILE,
                Some(HOSTILE),
            );
            assert_contained(&prompt, 3);
        }

        #[test]
        fn followup_escapes_objective_response_gaps_and_previous() {
            let prompt = format_followup_generator_prompt(
                HOSTILE,
                HOSTILE,
                FollowUpReason::ResponseUnclear,
                &[HOSTILE.to_string()],
                &[HOSTILE],
            );
            assert_contained(&prompt, 4);
        }
    }
}
