//! Data structures for the execution result handed over by the upstream
//! fetch service: point time series, regional aggregates, and climatology
//! blocks, plus the citations/limitations it collected along the way.
//!
//! Numeric payloads arrive as JSON and may contain nulls, numeric strings,
//! or malformed timestamps; deserialization is deliberately lenient and the
//! accessors drop whatever cannot be interpreted. A missing value is never
//! treated as zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Parses one upstream timestamp. Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`,
/// a space-separated variant, and bare dates (midnight). A trailing `Z` is
/// tolerated on the naive forms.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim().trim_end_matches('Z');
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt.naive_utc());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Accepts numbers, numeric strings, and nulls; everything else becomes a
/// missing value rather than a deserialization error.
fn lenient_values<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect())
}

/// An hourly/daily/current time series for one variable at one point.
///
/// `times` and `values` are parallel arrays as sent by the provider; use
/// [`PointSeries::observations`] to get the cleaned, paired view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    pub variable: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub times: Vec<String>,
    #[serde(default, deserialize_with = "lenient_values")]
    pub values: Vec<Option<f64>>,
}

impl PointSeries {
    /// Pairs timestamps with values, dropping entries whose timestamp does
    /// not parse or whose value is missing. Order is preserved.
    pub fn observations(&self) -> Vec<(NaiveDateTime, f64)> {
        self.times
            .iter()
            .zip(self.values.iter())
            .filter_map(|(t, v)| match (parse_timestamp(t), v) {
                (Some(ts), Some(val)) => Some((ts, *val)),
                _ => None,
            })
            .collect()
    }
}

/// The indexed mean ± IQR curve of a regional aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Bin index, e.g. hour-of-day 0–23.
    #[serde(default)]
    pub index: Vec<i64>,
    #[serde(default, deserialize_with = "lenient_values")]
    pub mean: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_values")]
    pub iqr: Vec<Option<f64>>,
}

/// A spatial/diurnal summary of one variable over a region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionAggregate {
    pub variable: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub aggregation: Aggregation,
}

/// Long-term scalar statistics of a climatology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LongTermBlock {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub p10: Option<f64>,
    #[serde(default)]
    pub p90: Option<f64>,
}

/// Per-calendar-month means (January first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalBlock {
    #[serde(default, deserialize_with = "lenient_values")]
    pub mean: Vec<Option<f64>>,
}

/// Per-local-hour means (hour 0 first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiurnalBlock {
    #[serde(default, deserialize_with = "lenient_values")]
    pub mean: Vec<Option<f64>>,
}

/// The statistical blocks of one climatology.
///
/// The spatial block is provider-shaped and passed through untouched; this
/// core never reads inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimatologyBlocks {
    #[serde(default)]
    pub long_term: Option<LongTermBlock>,
    #[serde(default)]
    pub seasonal: Option<SeasonalBlock>,
    #[serde(default)]
    pub diurnal: Option<DiurnalBlock>,
    #[serde(default)]
    pub spatial: Option<serde_json::Value>,
}

/// A multi-block long-term summary of one variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Climatology {
    pub variable: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub blocks: ClimatologyBlocks,
}

/// Everything the upstream executor produced for one plan.
///
/// All collections default to empty so partial provider responses
/// deserialize without error; an entirely empty result is valid and flows
/// through answer assembly as the "no data" case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResult {
    #[serde(default)]
    pub series: Vec<PointSeries>,
    #[serde(default)]
    pub aggregates: Vec<RegionAggregate>,
    #[serde(default)]
    pub climatologies: Vec<Climatology>,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default)]
    pub window: Option<super::plan::Window>,
}

impl ExecuteResult {
    /// True when no result block of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.aggregates.is_empty() && self.climatologies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_timestamp_shapes() {
        for raw in [
            "2024-01-01T06:00:00Z",
            "2024-01-01T06:00:00",
            "2024-01-01T06:00",
            "2024-01-01 06:00:00",
        ] {
            let ts = parse_timestamp(raw).unwrap();
            assert_eq!(ts.format("%Y-%m-%d %H").to_string(), "2024-01-01 06");
        }
        assert_eq!(
            parse_timestamp("2024-01-01").unwrap().to_string(),
            "2024-01-01 00:00:00"
        );
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn lenient_values_accept_numbers_strings_and_nulls() {
        let s: PointSeries = serde_json::from_str(
            r#"{"variable":"precipitation","unit":"mm",
                "times":["2024-01-01T00:00","2024-01-01T01:00","2024-01-01T02:00"],
                "values":[1.5,"2",null]}"#,
        )
        .unwrap();
        assert_eq!(s.values, vec![Some(1.5), Some(2.0), None]);
    }

    #[test]
    fn observations_drop_missing_and_unparseable() {
        let s = PointSeries {
            variable: "temperature_2m".into(),
            unit: "°C".into(),
            times: vec![
                "2024-01-01T00:00".into(),
                "not a time".into(),
                "2024-01-01T02:00".into(),
            ],
            values: vec![Some(1.0), Some(2.0), None],
        };
        let obs = s.observations();
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].1, 1.0);
    }

    #[test]
    fn empty_result_is_empty() {
        let ex: ExecuteResult = serde_json::from_str("{}").unwrap();
        assert!(ex.is_empty());
        assert!(ex.citations.is_empty());
    }
}
