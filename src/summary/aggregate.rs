//! One-line narrative for a regional aggregate: the range of the diurnal
//! mean curve, annotated with the hours where the minimum and maximum occur.

use crate::types::execute::RegionAggregate;

/// Describes an aggregate's mean curve, or `None` when no mean values are
/// present.
pub fn summarize_aggregate(aggregate: &RegionAggregate) -> Option<String> {
    let agg = &aggregate.aggregation;
    let present: Vec<(usize, f64)> = agg
        .mean
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|v| (i, v)))
        .collect();
    if present.is_empty() {
        return None;
    }

    let (min_pos, min_val) = present.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1))?;
    let (max_pos, max_val) = present.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1))?;

    let unit = aggregate.unit.trim();
    let u = if unit.is_empty() {
        String::new()
    } else {
        format!(" {unit}")
    };
    let base = format!(
        "{} (regional diurnal): mean range {min_val:.2}–{max_val:.2}{u}",
        aggregate.variable
    );

    // Annotate with hours only when the index array actually covers the
    // positions; a short or absent index degrades to the bare range.
    match (agg.index.get(min_pos), agg.index.get(max_pos)) {
        (Some(min_idx), Some(max_idx)) => Some(format!(
            "{base} (min @{min_idx:02} UTC, max @{max_idx:02} UTC)"
        )),
        _ => Some(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::execute::Aggregation;

    fn aggregate(index: Vec<i64>, mean: Vec<Option<f64>>) -> RegionAggregate {
        RegionAggregate {
            variable: "temperature_2m".into(),
            unit: "°C".into(),
            aggregation: Aggregation {
                index,
                mean,
                iqr: Vec::new(),
            },
        }
    }

    #[test]
    fn reports_range_with_hour_annotations() {
        let a = aggregate(
            (0..6).collect(),
            vec![Some(4.0), Some(2.0), Some(3.0), Some(9.0), Some(7.0), None],
        );
        let line = summarize_aggregate(&a).unwrap();
        assert!(line.contains("mean range 2.00–9.00 °C"));
        assert!(line.contains("min @01 UTC"));
        assert!(line.contains("max @03 UTC"));
    }

    #[test]
    fn short_index_omits_annotations() {
        let a = aggregate(vec![0], vec![Some(1.0), Some(5.0)]);
        let line = summarize_aggregate(&a).unwrap();
        assert!(line.contains("mean range 1.00–5.00 °C"));
        assert!(!line.contains("min @"));
    }

    #[test]
    fn all_missing_means_yield_none() {
        let a = aggregate(vec![0, 1], vec![None, None]);
        assert!(summarize_aggregate(&a).is_none());
    }
}
