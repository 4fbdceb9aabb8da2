//! Builds the final [`StructuredAnswer`] from computed results.
//!
//! Two interchangeable strategies satisfy the same contract. The
//! deterministic writer derives every field from the plan and the execution
//! result with fixed templates; the generative writer prompts a
//! [`TextGenerator`] and recovers its output through the extractor. Neither
//! can fail: absent data becomes empty collections and template sentences,
//! and a dead generation backend falls back to the deterministic writer.

use crate::answer::extract::extract_structured_answer;
use crate::answer::figures::{collect_figures, FigureRenderer};
use crate::answer::generate::TextGenerator;
use crate::answer::prompt::{build_context, build_summary_prompt, synthesize_question};
use crate::summary::stats;
use crate::types::answer::{StructuredAnswer, MAX_KEY_NUMBERS};
use crate::types::execute::ExecuteResult;
use crate::types::plan::Plan;
use crate::types::time_mode::TimeMode;
use chrono::{SecondsFormat, Utc};

/// Default shown when the upstream result carries no limitations of its own.
const DEFAULT_LIMITATION: &str = "Model output; station validation not applied.";

const DEFAULT_FOLLOWUPS: [&str; 2] = [
    "Switch between forecast/current/historical to compare.",
    "Add humidity and wind gusts for heat/comfort context.",
];

fn fmt_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{v:.1}"),
        Some(v) => format!("{v:.1} {unit}"),
        None => "NA".to_string(),
    }
}

fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().filter_map(|v| *v).collect()
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

fn build_title(place: &str, planned: &[&str]) -> String {
    if planned.is_empty() {
        return place.to_string();
    }
    let shown = planned[..planned.len().min(3)].join(", ");
    let marker = if planned.len() > 3 { "…" } else { "" };
    format!("{place} — {shown}{marker}")
}

fn build_key_numbers(result: &ExecuteResult) -> Vec<String> {
    let mut key_numbers = Vec::new();

    // Climatology carries the most information per entry; when present it
    // takes precedence and series statistics stay out.
    if let Some(c) = result.climatologies.first() {
        if let Some(lt) = &c.blocks.long_term {
            if lt.mean.is_some() {
                key_numbers.push(format!(
                    "{} long-term mean: {}",
                    c.variable,
                    fmt_value(lt.mean, &c.unit)
                ));
            }
            if lt.p10.is_some() && lt.p90.is_some() {
                key_numbers.push(format!(
                    "{} p10–p90: {}–{}",
                    c.variable,
                    fmt_value(lt.p10, &c.unit),
                    fmt_value(lt.p90, &c.unit)
                ));
            }
        }
        if let Some(seasonal) = &c.blocks.seasonal {
            if let Some((min, max)) = min_max(&present(&seasonal.mean)) {
                key_numbers.push(format!(
                    "{} seasonal mean range: {}–{}",
                    c.variable,
                    fmt_value(Some(min), &c.unit),
                    fmt_value(Some(max), &c.unit)
                ));
            }
        }
    } else {
        for s in result.series.iter().take(2) {
            let values = present(&s.values);
            if let (Some(first), Some(mean)) = (values.first(), stats::mean(&values)) {
                key_numbers.push(format!(
                    "{} first: {}",
                    s.variable,
                    fmt_value(Some(*first), &s.unit)
                ));
                key_numbers.push(format!(
                    "{} mean: {}",
                    s.variable,
                    fmt_value(Some(mean), &s.unit)
                ));
            }
        }
    }

    if let Some(a) = result.aggregates.first() {
        if let Some((min, max)) = min_max(&present(&a.aggregation.mean)) {
            key_numbers.push(format!(
                "{} diurnal mean range: {}–{}",
                a.variable,
                fmt_value(Some(min), &a.unit),
                fmt_value(Some(max), &a.unit)
            ));
        }
    }

    key_numbers.truncate(MAX_KEY_NUMBERS);
    key_numbers
}

fn answer_sentence(result: &ExecuteResult) -> &'static str {
    if !result.climatologies.is_empty() {
        "Typical conditions summarized across long-term mean & spread, seasonal (monthly), \
         diurnal (local hour), and spatial bands."
    } else if !result.aggregates.is_empty() {
        "Regional conditions summarized as mean ± IQR across an adaptive grid."
    } else if !result.series.is_empty() {
        "Point conditions summarized from hourly/current series."
    } else {
        "Requested variables were not available; see limitations."
    }
}

/// Deterministic strategy: every field from fixed templates over the plan
/// and result. Infallible by construction.
pub fn assemble_answer(
    place: &str,
    plan: &Plan,
    result: &ExecuteResult,
    renderer: Option<&dyn FigureRenderer>,
) -> StructuredAnswer {
    let planned = plan.canonical_variables();

    let mut citations = result.citations.clone();
    citations.push(format!(
        "Query timestamp: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    let limitations = if result.limitations.is_empty() {
        vec![DEFAULT_LIMITATION.to_string()]
    } else {
        result.limitations.clone()
    };

    StructuredAnswer {
        title: build_title(place, &planned),
        answer: answer_sentence(result).to_string(),
        key_numbers: build_key_numbers(result),
        figures: renderer
            .map(|r| collect_figures(r, result))
            .unwrap_or_default(),
        method: format!(
            "Open-Meteo first. Planned variables: {}. Regions use an adaptive grid reduced to \
             mean ± IQR. Historical mode derives a lightweight climatology from a recent full \
             year of hourly archive.",
            planned.join(", ")
        ),
        citations,
        limitations,
        suggested_followups: DEFAULT_FOLLOWUPS.iter().map(|s| s.to_string()).collect(),
    }
    .clamp()
}

/// Generative strategy: prompt the backend with the dataset context and
/// recover its reply through the extractor. A backend failure logs and
/// falls back to the deterministic writer, so this too always returns a
/// complete answer.
#[allow(clippy::too_many_arguments)]
pub fn assemble_with_generator(
    place: &str,
    mode: TimeMode,
    plan: &Plan,
    result: &ExecuteResult,
    generator: &dyn TextGenerator,
    renderer: Option<&dyn FigureRenderer>,
    forecast_days: u32,
    historical_years: u32,
) -> StructuredAnswer {
    let variables: Vec<String> = plan
        .canonical_variables()
        .iter()
        .map(|v| v.to_string())
        .collect();
    let question = synthesize_question(place, mode, &variables, forecast_days, historical_years);
    let context = build_context(place, plan, result);
    let prompt = build_summary_prompt(&context, &question);

    match generator.generate(&prompt) {
        Ok(raw) => {
            let mut answer = extract_structured_answer(&raw);
            if answer.figures.is_empty() {
                if let Some(r) = renderer {
                    answer.figures = collect_figures(r, result);
                }
            }
            answer.clamp()
        }
        Err(err) => {
            log::warn!("generation backend failed ({err}); using deterministic writer");
            assemble_answer(place, plan, result, renderer)
        }
    }
}
