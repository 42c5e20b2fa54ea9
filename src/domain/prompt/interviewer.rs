//! Main interviewer payload: a fixed sequence of sections projected from
//! [`InterviewState`].
//!
//! Every function here is pure; rendering the same state twice yields the
//! same text, which is what lets a resumed session re-render its last turn.

use crate::domain::interview::{ConversationEntry, InsightBank, InterviewState};

use super::markup::{block, element, escape_xml, leaf, leaf_raw, text_block};

/// Window sizes for the bounded sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    /// Most recent conversation entries to include.
    pub max_history: usize,
    /// Insights to include, high/critical first.
    pub max_insights: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            max_history: 10,
            max_insights: 10,
        }
    }
}

pub const TASK_COMPLETE: &str =
    "Generate interview completion message. Thank the participant and summarize key insights.";
pub const TASK_BEGIN: &str = "Begin the interview by asking the first question naturally.";
pub const TASK_CONTINUE: &str =
    "Continue the interview. A follow-up was asked but no response yet.";
pub const TASK_EVALUATE: &str = "Evaluate the user's response against the research objective. \
Decide whether to ask a follow-up or transition to the next question. Generate your response.";

/// Renders the full interviewer payload.
///
/// `user_message` is the participant's latest reply, `None` on the opening
/// turn or when re-rendering while a question is still awaiting a reply.
/// An empty reply counts as no reply.
pub fn format_interviewer_prompt(
    state: &InterviewState,
    user_message: Option<&str>,
    options: &PromptOptions,
) -> String {
    let user_message = non_empty(user_message);
    let mut prompt = String::new();

    prompt += &format_interview_context(state);
    prompt += &format_current_question(state);
    prompt += &format_question_exchanges(state);
    prompt += &format_insight_summary(&state.insight_bank, options.max_insights);
    prompt += &format_conversation_history(&state.conversation_history, options.max_history);
    if let Some(message) = user_message {
        prompt += &format_user_message(message);
    }
    prompt += &format_progress(state);
    prompt += &format_task_instruction(state, user_message);

    prompt
}

pub fn format_interview_context(state: &InterviewState) -> String {
    let mut fields = vec![
        leaf_raw(1, "session_id", state.session_id),
        leaf(1, "title", &state.title),
        leaf_raw(1, "status", state.status),
    ];
    if !state.context.is_empty() {
        fields.push(leaf(1, "context", &state.context));
    }
    block("interview", &fields)
}

pub fn format_current_question(state: &InterviewState) -> String {
    let Some(question) = state.get_current_question() else {
        return "<current_question>None - Interview complete</current_question>\n\n".to_string();
    };

    let fields = vec![
        leaf(1, "id", question.id.as_str()),
        leaf_raw(
            1,
            "order",
            format!("{} of {}", question.order, state.total_questions),
        ),
        leaf(1, "question_text", &question.base_question_text),
        leaf(1, "research_objective", &question.research_objective),
        leaf_raw(1, "status", question.status),
        leaf_raw(1, "objective_status", question.objective_status),
        leaf_raw(1, "follow_up_count", question.follow_up_count),
        leaf_raw(1, "max_follow_ups", question.max_follow_ups),
    ];
    block("current_question", &fields)
}

/// Exchange ledger of the current question only; empty when nothing has
/// been asked yet.
pub fn format_question_exchanges(state: &InterviewState) -> String {
    let Some(question) = state.get_current_question() else {
        return String::new();
    };
    if question.exchanges.is_empty() {
        return String::new();
    }

    let exchanges: Vec<String> = question
        .exchanges
        .iter()
        .enumerate()
        .map(|(i, exchange)| {
            let mut fields = vec![leaf(2, "asked", &exchange.question_text)];

            if exchange.is_follow_up {
                fields.push(leaf_raw(2, "type", "follow_up"));
                if let Some(reason) = exchange.follow_up_reason {
                    fields.push(leaf_raw(2, "follow_up_reason", reason));
                }
            } else {
                fields.push(leaf_raw(2, "type", "initial"));
            }

            match &exchange.user_response {
                Some(response) => {
                    fields.push(leaf(2, "response", response));
                    if let Some(analysis) = &exchange.response_analysis {
                        let mut analysis_fields = vec![
                            leaf_raw(3, "objective_progress", analysis.objective_progress),
                            leaf(3, "recommendation", &analysis.recommendation),
                        ];
                        if !analysis.insights_extracted.is_empty() {
                            let insights: Vec<String> = analysis
                                .insights_extracted
                                .iter()
                                .map(|insight| leaf(4, "insight", insight))
                                .collect();
                            analysis_fields.push(element(3, "insights", "insights", &insights));
                        }
                        fields.push(element(2, "analysis", "analysis", &analysis_fields));
                    }
                }
                None => fields.push(leaf_raw(2, "response", "AWAITING")),
            }

            element(1, &format!(r#"exchange num="{}""#, i + 1), "exchange", &fields)
        })
        .collect();

    block("question_exchanges", &exchanges)
}

/// Up to `max_insights` insights, high/critical first, each group in
/// insertion order. Empty when the bank is empty or the window is zero.
pub fn format_insight_summary(bank: &InsightBank, max_insights: usize) -> String {
    let (high, other): (Vec<_>, Vec<_>) =
        bank.insights.iter().partition(|i| i.importance.is_high());
    let selected: Vec<_> = high.into_iter().chain(other).take(max_insights).collect();
    if selected.is_empty() {
        return String::new();
    }

    let mut lines = vec![leaf_raw(1, "total_insights", bank.len())];
    if bank.len() > max_insights {
        lines.push(leaf_raw(
            1,
            "showing",
            format!("Most recent {max_insights} (prioritizing high importance)"),
        ));
    }
    for insight in selected {
        let marker = if insight.importance.is_high() { "*" } else { "" };
        let category = insight
            .category
            .as_deref()
            .map(|c| format!(r#" category="{}""#, escape_xml(c)))
            .unwrap_or_default();
        lines.push(format!(
            "\t<insight importance=\"{}\"{}>{}{}</insight>",
            insight.importance,
            category,
            marker,
            escape_xml(&insight.content)
        ));
    }

    block("accumulated_insights", &lines)
}

/// Sliding window over the most recent `max_entries` log entries, with a
/// note when older entries were dropped.
pub fn format_conversation_history(history: &[ConversationEntry], max_entries: usize) -> String {
    if history.is_empty() || max_entries == 0 {
        return String::new();
    }

    let start = history.len().saturating_sub(max_entries);
    let mut lines = Vec::with_capacity(history.len() - start + 1);
    if start > 0 {
        lines.push(format!(
            "\t<!-- Showing last {} of {} messages -->",
            max_entries,
            history.len()
        ));
    }
    lines.extend(history[start..].iter().map(|entry| {
        format!(
            "\t<message role=\"{}\">{}</message>",
            entry.role,
            escape_xml(&entry.content)
        )
    }));

    block("conversation_history", &lines)
}

pub fn format_user_message(message: &str) -> String {
    text_block("latest_user_message", message)
}

pub fn format_progress(state: &InterviewState) -> String {
    let fields = vec![
        leaf_raw(1, "completed_questions", state.completed_questions),
        leaf_raw(1, "total_questions", state.total_questions),
        leaf_raw(
            1,
            "progress_percent",
            format!("{:.1}%", state.calculate_progress()),
        ),
        leaf_raw(1, "total_exchanges", state.total_exchanges),
    ];
    block("progress", &fields)
}

/// Picks the closing instruction from the interview's position.
pub fn task_instruction(state: &InterviewState, user_message: Option<&str>) -> &'static str {
    if state.is_complete() {
        return TASK_COMPLETE;
    }
    match non_empty(user_message) {
        Some(_) => TASK_EVALUATE,
        None => match state.get_current_question() {
            Some(question) if !question.exchanges.is_empty() => TASK_CONTINUE,
            _ => TASK_BEGIN,
        },
    }
}

fn non_empty(message: Option<&str>) -> Option<&str> {
    message.filter(|m| !m.is_empty())
}

pub fn format_task_instruction(state: &InterviewState, user_message: Option<&str>) -> String {
    format!("<task>{}</task>\n", task_instruction(state, user_message))
}
