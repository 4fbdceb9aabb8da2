//! Distribution summaries of a series binned by hour-of-day or calendar
//! month: per-bin occurrence frequency, central tendency and spread. This is
//! the textual counterpart of a box plot.

use crate::summary::stats;
use crate::types::execute::PointSeries;
use chrono::{Datelike, Timelike};
use std::collections::BTreeMap;

/// Cap on emitted lines; a presentation bound, not a correctness one.
/// Callers needing full resolution should work from the raw series.
pub const MAX_GROUP_LINES: usize = 12;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The calendar key to bin a series by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Hour of day, 0–23 (UTC as delivered by the provider).
    Hour,
    /// Calendar month, 1–12.
    Month,
}

impl GroupKey {
    fn label(&self, bin: u32) -> String {
        match self {
            GroupKey::Hour => format!("{bin:02} UTC"),
            GroupKey::Month => MONTH_NAMES
                .get(bin.saturating_sub(1) as usize)
                .unwrap_or(&"?")
                .to_string(),
        }
    }
}

/// Bins a series by `key` and describes each non-empty bin on one line,
/// sorted by bin key ascending and capped at [`MAX_GROUP_LINES`].
///
/// Each line reports the non-zero frequency percentage, mean, median and
/// quartiles; when sparsity collapses the quartiles to zero the spread of
/// the non-zero samples is appended under its own label, mirroring the
/// point-series summarizer.
pub fn summarize_grouped(series: &PointSeries, key: GroupKey) -> Vec<String> {
    let mut bins: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for (ts, value) in series.observations() {
        let bin = match key {
            GroupKey::Hour => ts.hour(),
            GroupKey::Month => ts.month(),
        };
        bins.entry(bin).or_default().push(value);
    }

    let mut lines = Vec::new();
    for (bin, values) in &bins {
        let Some(mean) = stats::mean(values) else {
            continue;
        };
        let median = stats::quantile(values, 0.5).unwrap_or(mean);
        let q25 = stats::quantile(values, 0.25).unwrap_or(mean);
        let q75 = stats::quantile(values, 0.75).unwrap_or(mean);
        let nonzero: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
        let frequency = nonzero.len() as f64 / values.len() as f64 * 100.0;

        let mut line = format!(
            "{} — non-zero freq {frequency:.1}%, mean {mean:.2}, median {median:.2}, IQR {q25:.2}–{q75:.2}",
            key.label(*bin)
        );
        if q25 == 0.0 && q75 == 0.0 && !nonzero.is_empty() {
            let nz_q25 = stats::quantile(&nonzero, 0.25).unwrap_or(0.0);
            let nz_q75 = stats::quantile(&nonzero, 0.75).unwrap_or(0.0);
            if nz_q75 > 0.0 {
                line.push_str(&format!(" (non-zero IQR ≈ {nz_q25:.2}–{nz_q75:.2})"));
            }
        }
        lines.push(line);
        if lines.len() == MAX_GROUP_LINES {
            break;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(times: &[&str], values: &[f64]) -> PointSeries {
        PointSeries {
            variable: "precipitation".into(),
            unit: "mm".into(),
            times: times.iter().map(|t| t.to_string()).collect(),
            values: values.iter().map(|v| Some(*v)).collect(),
        }
    }

    #[test]
    fn two_hours_make_two_full_frequency_bins() {
        let s = series_of(&["2024-01-01T00:00", "2024-01-01T01:00"], &[1.0, 2.0]);
        let lines = summarize_grouped(&s, GroupKey::Hour);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00 UTC"));
        assert!(lines[0].contains("non-zero freq 100.0%"));
        assert!(lines[1].starts_with("01 UTC"));
        assert!(lines[1].contains("non-zero freq 100.0%"));
    }

    #[test]
    fn output_never_exceeds_the_line_cap() {
        let times: Vec<String> = (0..48)
            .map(|i| {
                let day = 1 + i / 24;
                format!("2024-05-{day:02}T{:02}:00", i % 24)
            })
            .collect();
        let s = PointSeries {
            variable: "temperature_2m".into(),
            unit: "°C".into(),
            times,
            values: (0..48).map(|i| Some(i as f64)).collect(),
        };
        let lines = summarize_grouped(&s, GroupKey::Hour);
        assert_eq!(lines.len(), MAX_GROUP_LINES);
        // Ascending by hour, so the cap keeps the earliest bins.
        assert!(lines[0].starts_with("00 UTC"));
        assert!(lines[11].starts_with("11 UTC"));
    }

    #[test]
    fn month_bins_use_month_names() {
        let s = series_of(&["2024-01-15T12:00", "2024-07-15T12:00"], &[3.0, 4.0]);
        let lines = summarize_grouped(&s, GroupKey::Month);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Jan"));
        assert!(lines[1].starts_with("Jul"));
    }

    #[test]
    fn degenerate_quartiles_append_nonzero_spread() {
        let times: Vec<String> = (0..28).map(|i| format!("2024-02-{:02}T06:00", i + 1)).collect();
        let mut values = vec![0.0; 28];
        values[3] = 2.0;
        values[9] = 6.0;
        let s = series_of(
            &times.iter().map(String::as_str).collect::<Vec<_>>(),
            &values,
        );
        let lines = summarize_grouped(&s, GroupKey::Month);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("IQR 0.00–0.00"));
        assert!(lines[0].contains("non-zero IQR ≈"));
    }

    #[test]
    fn empty_series_produces_no_lines() {
        let s = series_of(&[], &[]);
        assert!(summarize_grouped(&s, GroupKey::Hour).is_empty());
    }
}
