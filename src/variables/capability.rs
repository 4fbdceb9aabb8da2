//! Normalizes provider capability documents and filters requested variables
//! against them.
//!
//! Providers describe their supported variables in one of three shapes:
//!
//! ```json
//! {"variables": {"forecast": ["temperature_2m"], "historical": [...]}}
//! {"variables": ["temperature_2m", "precipitation"]}
//! {"variables": [{"id": "temperature_2m", "label": "Air temperature"}]}
//! ```
//!
//! All three are folded into lowercase string sets exactly once, at the
//! deserialization boundary; lookups never re-inspect raw JSON.

use crate::types::time_mode::TimeMode;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// The raw capability document as sent by a provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilityDocument {
    #[serde(default)]
    variables: VariableListing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VariableListing {
    ByMode(HashMap<String, Vec<VariableEntry>>),
    Flat(Vec<VariableEntry>),
}

impl Default for VariableListing {
    fn default() -> Self {
        VariableListing::Flat(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VariableEntry {
    Name(String),
    Descriptor(Descriptor),
}

/// Descriptor objects may carry the variable name under any of these keys.
#[derive(Debug, Clone, Default, Deserialize)]
struct Descriptor {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    variable: Option<String>,
}

impl VariableEntry {
    fn name(&self) -> Option<&str> {
        match self {
            VariableEntry::Name(s) => Some(s),
            VariableEntry::Descriptor(d) => d
                .id
                .as_deref()
                .or(d.name.as_deref())
                .or(d.variable.as_deref()),
        }
    }
}

fn normalize(entries: &[VariableEntry]) -> HashSet<String> {
    entries
        .iter()
        .filter_map(VariableEntry::name)
        .map(str::to_lowercase)
        .collect()
}

/// An immutable snapshot of what a provider supports, normalized to
/// lowercase variable-name sets. Built once per query session.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    shape: Shape,
}

#[derive(Debug, Clone)]
enum Shape {
    /// Per-mode sets keyed by the lowercase mode name as declared.
    ByMode(HashMap<String, HashSet<String>>),
    /// One set applying to every mode.
    Flat(HashSet<String>),
}

impl CapabilitySet {
    /// Builds a capability set from a raw JSON document.
    ///
    /// Never fails: a document that matches none of the accepted shapes
    /// yields an empty set, which the filter treats as "don't drop
    /// anything" so the underlying provider error surfaces downstream
    /// instead of being masked as "unsupported variable".
    pub fn from_json(document: &serde_json::Value) -> Self {
        match CapabilityDocument::deserialize(document) {
            Ok(doc) => Self::from_document(doc),
            Err(err) => {
                log::warn!("unrecognized capability document shape: {err}");
                CapabilitySet {
                    shape: Shape::Flat(HashSet::new()),
                }
            }
        }
    }

    /// Builds a capability set from an already-deserialized document.
    pub fn from_document(document: CapabilityDocument) -> Self {
        let shape = match document.variables {
            VariableListing::ByMode(modes) => Shape::ByMode(
                modes
                    .into_iter()
                    .map(|(mode, entries)| (mode.to_lowercase(), normalize(&entries)))
                    .collect(),
            ),
            VariableListing::Flat(entries) => Shape::Flat(normalize(&entries)),
        };
        CapabilitySet { shape }
    }

    /// The set of lowercase variable names supported in `mode`.
    ///
    /// A declared per-mode entry wins, even when empty; with no entry for
    /// the mode the union of all declared modes applies, since an absent
    /// entry must not reject variables the provider supports elsewhere.
    pub fn supported_for(&self, mode: TimeMode) -> HashSet<String> {
        match &self.shape {
            Shape::Flat(set) => set.clone(),
            Shape::ByMode(modes) => match modes.get(mode.as_str()) {
                Some(set) => set.clone(),
                None => modes.values().flatten().cloned().collect(),
            },
        }
    }
}

/// The outcome of capability filtering: which requested variables survived
/// and which were set aside, both in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariablePartition {
    pub kept: Vec<String>,
    pub dropped: Vec<String>,
}

/// Partitions requested canonical variables into supported and unsupported
/// for the given mode. Matching is case-insensitive.
///
/// Two deliberate escape hatches keep failures diagnosable:
/// - an empty supported set (missing or malformed capabilities) keeps the
///   full request and drops nothing;
/// - when every variable would be dropped, the original list is restored as
///   `kept` (while still reporting the drops) so the provider sees a real
///   request and can answer with a descriptive error instead of this client
///   fabricating one from an empty request.
pub fn filter_supported(
    capabilities: &CapabilitySet,
    variables: &[String],
    mode: TimeMode,
) -> VariablePartition {
    let supported = capabilities.supported_for(mode);
    if supported.is_empty() {
        log::warn!("empty capability set for {mode}; keeping all {} variable(s)", variables.len());
        return VariablePartition {
            kept: variables.to_vec(),
            dropped: Vec::new(),
        };
    }

    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for variable in variables {
        if supported.contains(&variable.to_lowercase()) {
            kept.push(variable.clone());
        } else {
            dropped.push(variable.clone());
        }
    }
    if !dropped.is_empty() {
        log::warn!("unsupported for {mode}: {}", dropped.join(", "));
    }
    if kept.is_empty() {
        kept = variables.to_vec();
    }
    VariablePartition { kept, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn per_mode_entry_wins() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": {
                "current": ["temperature_2m"],
                "historical": ["temperature_2m", "precipitation"],
            }
        }));
        let part = filter_supported(
            &caps,
            &vars(&["temperature_2m", "precipitation"]),
            TimeMode::Current,
        );
        assert_eq!(part.kept, vars(&["temperature_2m"]));
        assert_eq!(part.dropped, vars(&["precipitation"]));
    }

    #[test]
    fn missing_mode_falls_back_to_union() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": {
                "forecast": ["temperature_2m"],
                "historical": ["precipitation"],
            }
        }));
        let part = filter_supported(
            &caps,
            &vars(&["temperature_2m", "precipitation", "uv_index"]),
            TimeMode::Current,
        );
        assert_eq!(part.kept, vars(&["temperature_2m", "precipitation"]));
        assert_eq!(part.dropped, vars(&["uv_index"]));
    }

    #[test]
    fn flat_name_list_applies_to_all_modes() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": ["temperature_2m", "wind_speed_10m"]
        }));
        for mode in [TimeMode::Forecast, TimeMode::Historical, TimeMode::Current] {
            let part = filter_supported(&caps, &vars(&["wind_speed_10m", "rain"]), mode);
            assert_eq!(part.kept, vars(&["wind_speed_10m"]));
            assert_eq!(part.dropped, vars(&["rain"]));
        }
    }

    #[test]
    fn descriptor_objects_yield_names_by_priority() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": [
                {"id": "temperature_2m", "label": "Air temperature"},
                {"name": "precipitation"},
                {"variable": "snowfall"},
            ]
        }));
        let part = filter_supported(
            &caps,
            &vars(&["temperature_2m", "precipitation", "snowfall"]),
            TimeMode::Forecast,
        );
        assert!(part.dropped.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": ["Temperature_2M"]
        }));
        let part = filter_supported(&caps, &vars(&["TEMPERATURE_2m"]), TimeMode::Current);
        assert_eq!(part.kept, vars(&["TEMPERATURE_2m"]));
    }

    #[test]
    fn empty_capabilities_keep_everything() {
        for doc in [json!({}), json!({"variables": []}), json!({"variables": 7})] {
            let caps = CapabilitySet::from_json(&doc);
            let part = filter_supported(&caps, &vars(&["anything"]), TimeMode::Current);
            assert_eq!(part.kept, vars(&["anything"]));
            assert!(part.dropped.is_empty());
        }
    }

    #[test]
    fn total_drop_restores_the_original_request() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": {"current": ["temperature_2m"]}
        }));
        let part = filter_supported(&caps, &vars(&["sea_ice", "pm2_5"]), TimeMode::Current);
        // Both names are reported dropped, but the request goes out intact
        // so the provider can produce a diagnosable error.
        assert_eq!(part.kept, vars(&["sea_ice", "pm2_5"]));
        assert_eq!(part.dropped, vars(&["sea_ice", "pm2_5"]));
    }

    #[test]
    fn partition_covers_input_without_overlap() {
        let caps = CapabilitySet::from_json(&json!({
            "variables": {"forecast": ["a", "b", "c"]}
        }));
        let input = vars(&["a", "x", "b", "y"]);
        let part = filter_supported(&caps, &input, TimeMode::Forecast);
        let mut union = part.kept.clone();
        union.extend(part.dropped.clone());
        union.sort();
        let mut sorted_input = input;
        sorted_input.sort();
        assert_eq!(union, sorted_input);
        assert!(part.kept.iter().all(|v| !part.dropped.contains(v)));
    }
}
