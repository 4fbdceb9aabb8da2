//! Descriptive statistics over plain `f64` slices: mean, sample deviation,
//! interpolated quantiles, first-to-last trend, and coefficient of
//! variation. All functions tolerate empty input and degenerate shapes; none
//! of them panic or divide by zero.

use ordered_float::OrderedFloat;
use std::fmt;

/// Direction of change between the first and last sample of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl Trend {
    /// Compares endpoints; fewer than two points is `Flat`.
    pub fn from_endpoints(values: &[f64]) -> Trend {
        match (values.first(), values.last()) {
            (Some(first), Some(last)) if values.len() >= 2 => {
                if last > first {
                    Trend::Rising
                } else if last < first {
                    Trend::Falling
                } else {
                    Trend::Flat
                }
            }
            _ => Trend::Flat,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Flat => "flat",
        };
        write!(f, "{s}")
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n−1 denominator); 0 for fewer than two points
/// so formatted output never shows NaN.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

/// Linearly interpolated quantile, `q` in `[0, 1]`. Sorts a copy of the
/// input with a total order so NaN payloads cannot poison the comparison.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// The scalar statistics a series summary reports.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
    /// Coefficient of variation, `std / mean * 100`; 0 at zero mean.
    pub cv_percent: f64,
    pub trend: Trend,
}

/// Computes the full statistics block for a series with missing values
/// already removed. `None` for empty input.
pub fn describe(values: &[f64]) -> Option<SeriesStats> {
    let mean = mean(values)?;
    let std = sample_std(values);
    let cv_percent = if mean != 0.0 { std / mean * 100.0 } else { 0.0 };
    Some(SeriesStats {
        mean,
        std,
        median: quantile(values, 0.5)?,
        min: quantile(values, 0.0)?,
        max: quantile(values, 1.0)?,
        q25: quantile(values, 0.25)?,
        q75: quantile(values, 0.75)?,
        cv_percent,
        trend: Trend::from_endpoints(values),
    })
}
