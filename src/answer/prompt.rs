//! Prompt assembly for the generation backend: a compact dataset context
//! block (place, window, per-variable statistics, a few recent samples), a
//! one-shot summary prompt, and a dataset-scoped chat prompt. The backend is
//! told to use only this context, which is why the context must carry real
//! numbers and not raw series dumps.

use crate::summary::stats;
use crate::types::execute::ExecuteResult;
use crate::types::plan::Plan;
use crate::types::time_mode::TimeMode;
use std::fmt;

/// How many series the context block describes at most.
const MAX_CONTEXT_SERIES: usize = 12;
/// How many series contribute recent-sample lines.
const MAX_SAMPLED_SERIES: usize = 3;
/// How many trailing samples each of those series contributes.
const RECENT_SAMPLES: usize = 3;
/// How many chat turns the chat prompt replays.
const MAX_HISTORY_TURNS: usize = 4;

/// Who said a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "USER"),
            ChatRole::Assistant => write!(f, "ASSISTANT"),
        }
    }
}

/// One turn of sidebar chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Phrases the question a form submission implies, for prompting and for
/// echoing back to the user.
pub fn synthesize_question(
    place: &str,
    mode: TimeMode,
    variables: &[String],
    forecast_days: u32,
    historical_years: u32,
) -> String {
    let pretty_vars = if variables.is_empty() {
        "weather".to_string()
    } else {
        variables.join(", ")
    };
    match mode {
        TimeMode::Forecast => format!("{forecast_days}-day {pretty_vars} outlook for {place}."),
        TimeMode::Historical => {
            format!("Historical {pretty_vars} summary for {place} over ~{historical_years} year(s).")
        }
        TimeMode::Current => format!("Current {pretty_vars} conditions in {place}."),
    }
}

/// The window the result covers, phrased with its approximate length in
/// years; `None` when neither the result nor the plan carries a window.
pub fn data_window_line(plan: &Plan, result: &ExecuteResult) -> Option<String> {
    let window = result
        .window
        .as_ref()
        .or(plan.meta.historical_window.as_ref())?;
    let years_text = match (
        crate::types::execute::parse_timestamp(&window.start),
        crate::types::execute::parse_timestamp(&window.end),
    ) {
        (Some(start), Some(end)) => {
            let years = (end - start).num_days() as f64 / 365.25;
            let years = (years * 10.0).round() / 10.0;
            format!("{years:.1} year{}", if years != 1.0 { "s" } else { "" })
        }
        _ => "—".to_string(),
    };
    Some(format!(
        "Data window: {} → {} (≈{years_text})",
        window.start, window.end
    ))
}

/// One-line description of the resolved place, for captions and result
/// headers.
pub fn location_line(place: &crate::types::plan::ResolvedPlace) -> String {
    let mut line = format!("Using location: lat={:.3}, lon={:.3}", place.lat, place.lon);
    if let Some(area) = place.area_km2 {
        line.push_str(&format!(", area≈{} km²", area.round() as i64));
    }
    line
}

fn compact_stats_line(variable: &str, unit: &str, values: &[f64]) -> Option<String> {
    let mean = stats::mean(values)?;
    let std = stats::sample_std(values);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut line = format!(
        "- {variable}: mean={mean:.2}{unit}, std={std:.2}{unit}, range={min:.2}–{max:.2}{unit}"
    );
    let nonzero_frac = values.iter().filter(|v| **v > 0.0).count() as f64 / values.len() as f64;
    if nonzero_frac > 0.0 && nonzero_frac <= 0.20 {
        line.push_str(&format!(", nonzero%={:.1}", nonzero_frac * 100.0));
    }
    Some(line)
}

/// Builds the dataset context block the prompts embed: place, window,
/// variable roster, one compact statistics line per series, and a few recent
/// samples for grounding.
pub fn build_context(place: &str, plan: &Plan, result: &ExecuteResult) -> String {
    let mut lines = vec![format!("Place: {place}")];
    if let Some(window) = result
        .window
        .as_ref()
        .or(plan.meta.historical_window.as_ref())
    {
        lines.push(format!("Window: {} → {}", window.start, window.end));
    }

    let series = &result.series[..result.series.len().min(MAX_CONTEXT_SERIES)];
    let names: Vec<&str> = series
        .iter()
        .map(|s| s.variable.as_str())
        .filter(|v| !v.is_empty())
        .collect();
    if !names.is_empty() {
        lines.push(format!("Variables: {}", names.join(", ")));
    }
    for s in series {
        let values: Vec<f64> = s.values.iter().filter_map(|v| *v).collect();
        if let Some(line) = compact_stats_line(&s.variable, &s.unit, &values) {
            lines.push(line);
        }
    }
    for s in &series[..series.len().min(MAX_SAMPLED_SERIES)] {
        let observations = s.observations();
        if observations.len() < RECENT_SAMPLES {
            continue;
        }
        let tail = &observations[observations.len() - RECENT_SAMPLES..];
        let samples: Vec<String> = tail
            .iter()
            .map(|(t, v)| format!("{v:.2}{}@{}", s.unit, t.format("%m-%d %H:%M")))
            .collect();
        lines.push(format!(
            "- recent {} samples: {}",
            s.variable,
            samples.join(", ")
        ));
    }
    lines.join("\n")
}

/// One-shot prompt asking for a short conversational summary of the dataset.
pub fn build_summary_prompt(context: &str, question: &str) -> String {
    format!(
        "You are Meteo-Chat. Use ONLY the dataset below. \
         Answer in 2–4 conversational sentences with clear numbers + units. \
         Do not include any preamble, system text, or the words USER/ASSISTANT. \
         Do not repeat the context. No hashtags. No disclaimers.\n\n\
         {context}\n\n\
         Question: {question}\n\
         Answer only:"
    )
}

/// Chat prompt scoped to one dataset, replaying the most recent history.
pub fn build_chat_prompt(context: &str, history: &[ChatTurn], message: &str) -> String {
    let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
    let history_text: Vec<String> = history[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content.trim()))
        .collect();
    format!(
        "You are Meteo-Chat, a conversational weather assistant that knows only the dataset shown below. \
         If the user asks something outside this dataset's place, variables, or timeframe, say politely that \
         you only know about this dataset. Otherwise, answer in 2–4 sentences with clear numbers + units. \
         Do not include preamble or system text. Do not repeat the context. No hashtags.\n\n\
         DATASET CONTEXT:\n{context}\n\n\
         RECENT CHAT:\n{}\n\n\
         USER: {message}\n\
         ASSISTANT (answer only):",
        history_text.join("\n")
    )
}
