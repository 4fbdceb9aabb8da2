//! Narrative summarization of a single point time series.
//!
//! Dense signals (temperature, pressure) get the classic descriptive block:
//! mean ± deviation, range, median, IQR, variability, trend, and positional
//! quarters. Sparse signals (precipitation, snowfall — mostly zeros with
//! occasional events) additionally report event frequency, mean intensity
//! and total accumulation, computed over the non-zero samples only, because
//! a zero-dominated mean says nothing about how hard it rains when it rains.

use crate::summary::stats::{self, SeriesStats};
use crate::types::execute::PointSeries;
use chrono::{Duration, NaiveDateTime};

/// Fraction of strictly-positive samples at or below which a series is
/// treated as sparse.
pub const DEFAULT_SPARSE_THRESHOLD: f64 = 0.05;

/// Whether a variable accumulates (its sum is physically meaningful).
///
/// The heuristic mirrors provider conventions: accumulating quantities are
/// reported in millimeter units or carry "precip" in their name. Kept as a
/// named function so its truth table is testable directly.
pub fn is_accumulating(unit: &str, variable: &str) -> bool {
    unit.trim().to_lowercase().starts_with("mm") || variable.to_lowercase().contains("precip")
}

/// Event statistics of a sparse series.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseStats {
    /// Percentage of samples that are strictly positive.
    pub nonzero_percent: f64,
    /// Number of contiguous positive runs, counted at their leading
    /// zero-to-positive transition.
    pub event_count: usize,
    /// Mean over the positive samples only; `None` when there are none.
    pub mean_intensity: Option<f64>,
    /// Sum of the positive samples.
    pub total: f64,
}

/// The summarizer's output: narrative lines for display plus the scalar
/// statistics for programmatic use. Both are empty/`None` when the series
/// had no usable observations.
#[derive(Debug, Clone, Default)]
pub struct SeriesSummary {
    pub lines: Vec<String>,
    pub stats: Option<SeriesStats>,
    pub sparse: Option<SparseStats>,
}

fn count_events(values: &[f64]) -> usize {
    let mut events = 0;
    let mut prev_positive = false;
    for v in values {
        let positive = *v > 0.0;
        if positive && !prev_positive {
            events += 1;
        }
        prev_positive = positive;
    }
    events
}

fn is_sparse(values: &[f64], threshold: f64) -> bool {
    if values.is_empty() {
        return false;
    }
    let positive = values.iter().filter(|v| **v > 0.0).count();
    positive as f64 / values.len() as f64 <= threshold
}

/// Phrases a duration as months/days/hours, e.g. "3 days and 4 hours".
pub(crate) fn format_duration(duration: Duration) -> String {
    let total_hours = duration.num_hours().max(0);
    let months = total_hours / (24 * 30);
    let rem = total_hours % (24 * 30);
    let days = rem / 24;
    let hours = rem % 24;

    let mut parts = Vec::new();
    if months > 0 {
        parts.push(format!("{months} month{}", if months != 1 { "s" } else { "" }));
    }
    if days > 0 {
        parts.push(format!("{days} day{}", if days != 1 { "s" } else { "" }));
    }
    if hours > 0 || parts.is_empty() {
        parts.push(format!("{hours} hour{}", if hours != 1 { "s" } else { "" }));
    }
    match parts.len() {
        1 => parts.remove(0),
        2 => format!("{} and {}", parts[0], parts[1]),
        _ => format!("{}, {} and {}", parts[0], parts[1], parts[2]),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Summarizes one point series into narrative lines and scalar statistics.
///
/// Missing values are already absent from [`PointSeries::observations`];
/// statistics never see them and they never count as zero. An empty series
/// yields an empty summary, not an error.
///
/// `label` is the display name for the variable (typically the token the
/// user typed); `place` names the location the series covers.
pub fn summarize_point_series(
    series: &PointSeries,
    place: &str,
    label: &str,
    sparse_threshold: f64,
) -> SeriesSummary {
    let observations = series.observations();
    if observations.is_empty() {
        return SeriesSummary::default();
    }
    let times: Vec<NaiveDateTime> = observations.iter().map(|(t, _)| *t).collect();
    let values: Vec<f64> = observations.iter().map(|(_, v)| *v).collect();

    let unit = series.unit.trim();
    let u = if unit.is_empty() {
        String::new()
    } else {
        format!(" {unit}")
    };
    let start = times[0];
    let end = times[times.len() - 1];
    let duration_text = format_duration(end - start);
    let accumulating = is_accumulating(unit, &series.variable);

    let mut lines = vec![
        format!("{} over {place}", capitalize(label)),
        format!(
            "During: {} → {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        ),
    ];

    let nonzero: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    let mut sparse_stats = None;
    if is_sparse(&values, sparse_threshold) {
        let nonzero_percent = nonzero.len() as f64 / values.len() as f64 * 100.0;
        let event_count = count_events(&values);
        lines.push(format!(
            " Non-zero fraction: {nonzero_percent:.1}% of timesteps ({event_count} events)"
        ));
        let mean_intensity = stats::mean(&nonzero);
        let total: f64 = nonzero.iter().sum();
        if let Some(intensity) = mean_intensity {
            lines.push(format!(" Mean event intensity: {intensity:.2}{u}"));
            lines.push(format!(
                " Total accumulation: {total:.2}{u} over {duration_text}"
            ));
        }
        sparse_stats = Some(SparseStats {
            nonzero_percent,
            event_count,
            mean_intensity,
            total,
        });
    }

    let Some(stats) = stats::describe(&values) else {
        return SeriesSummary::default();
    };

    let mut iqr_text = format!("IQR {:.2}–{:.2}{u}", stats.q25, stats.q75);
    if stats.q25 == 0.0 && stats.q75 == 0.0 && accumulating && !nonzero.is_empty() {
        // Sparsity collapsed the zero-inclusive IQR; the spread of actual
        // events is still worth reporting, under its own label.
        let nz_q25 = stats::quantile(&nonzero, 0.25).unwrap_or(0.0);
        let nz_q75 = stats::quantile(&nonzero, 0.75).unwrap_or(0.0);
        if nz_q75 > 0.0 {
            iqr_text.push_str(&format!(" (non-zero IQR ≈ {nz_q25:.2}–{nz_q75:.2}{u})"));
        }
    }

    lines.push(format!(
        " Overall: mean {:.2} ± {:.2}{u}, range {:.2}–{:.2}{u}, median {:.2}{u}, {}, variability {:.0}%, trend {}",
        stats.mean, stats.std, stats.min, stats.max, stats.median, iqr_text, stats.cv_percent,
        stats.trend
    ));

    let n = values.len();
    let labels = ["Q1 (first quarter)", "Q2", "Q3", "Q4 (last quarter)"];
    for (i, quarter_label) in labels.iter().enumerate() {
        let lo = n * i / 4;
        let hi = n * (i + 1) / 4;
        let segment = &values[lo..hi];
        let Some(seg_mean) = stats::mean(segment) else {
            continue;
        };
        let seg_min = segment.iter().copied().fold(f64::INFINITY, f64::min);
        let seg_max = segment.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut line = format!(
            " {quarter_label}: mean {seg_mean:.2}{u}, min {seg_min:.2}{u}, max {seg_max:.2}{u}"
        );
        if accumulating {
            line.push_str(&format!(", total {:.2}{u}", segment.iter().sum::<f64>()));
        }
        lines.push(line);
    }

    if accumulating {
        lines.push(format!(
            " Overall total: {:.2}{u} over {duration_text}",
            nonzero.iter().sum::<f64>()
        ));
    }

    SeriesSummary {
        lines,
        stats: Some(stats),
        sparse: sparse_stats,
    }
}
