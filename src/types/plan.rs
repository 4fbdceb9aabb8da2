//! Data structures describing what the upstream planner decided to fetch:
//! the resolved place, the requested-to-canonical variable pairs, and the
//! time window the plan covers.

use serde::{Deserialize, Serialize};

/// A geocoded place as returned by the upstream location resolver.
///
/// Small places are queried as a point; large ones (countries, regions) carry
/// a bounding box and are aggregated spatially by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    /// Latitude of the place centroid, degrees north.
    pub lat: f64,
    /// Longitude of the place centroid, degrees east.
    pub lon: f64,
    /// Approximate area of the administrative shape, square kilometers.
    #[serde(default)]
    pub area_km2: Option<f64>,
    /// `[lon_min, lat_min, lon_max, lat_max]` for region-sized places.
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

/// One variable of a plan: what the caller typed and what it resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    /// The free-text token as entered upstream, if preserved.
    #[serde(default)]
    pub requested: Option<String>,
    /// The canonical provider identifier the token resolved to.
    #[serde(default)]
    pub canonical: Option<String>,
}

/// An inclusive time window, both ends as ISO-8601 strings.
///
/// Kept as strings: the window is echoed into narrative text and prompts, and
/// a malformed end from upstream must not fail the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: String,
    pub end: String,
}

/// Plan metadata the writer cares about; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMeta {
    /// The archive window a historical plan covers.
    #[serde(default)]
    pub historical_window: Option<Window>,
}

/// The upstream planner's output: which variables will be fetched and how.
///
/// This core only reads it; building a plan is the planner's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub items: Vec<PlanItem>,
    #[serde(default)]
    pub meta: PlanMeta,
}

impl Plan {
    /// The canonical variable names the plan will fetch, in plan order.
    pub fn canonical_variables(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|it| it.canonical.as_deref())
            .collect()
    }

    /// Display name for a canonical variable: the token the user typed when
    /// the plan preserved it, else the canonical name itself.
    pub fn display_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.items
            .iter()
            .find(|it| it.canonical.as_deref() == Some(canonical))
            .and_then(|it| it.requested.as_deref())
            .unwrap_or(canonical)
    }
}
