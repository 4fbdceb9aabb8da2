//! Maps free-text variable tokens ("temp", "winds", "rh") onto the canonical
//! identifiers the data provider understands (`temperature_2m`,
//! `wind_speed_10m`, `relative_humidity_2m`).
//!
//! Unknown tokens are deliberately NOT dropped here: they pass through
//! verbatim so that capability filtering, not aliasing, is the authority
//! that rejects them — the provider's own error message is more useful to
//! the user than a silent disappearance.

use crate::types::time_mode::TimeMode;
use std::collections::HashSet;

/// Looks up the canonical name for one normalized (trimmed, lowercased)
/// token. Returns `None` for tokens outside the alias vocabulary.
///
/// The table is many-to-one and mode-independent; it lives in code as a
/// `match` so it is immutable, allocation-free and exhaustively testable.
fn canonical_for(token: &str) -> Option<&'static str> {
    let canonical = match token {
        // Temperature
        "temp" | "temperature" | "air_temperature" | "t2m" => "temperature_2m",
        "apparent_temperature" | "feels_like" => "apparent_temperature",
        // Dew point / humidity
        "dewpoint" | "dew_point" | "dew_point_temperature" => "dew_point_2m",
        "humidity" | "relative_humidity" | "rh" => "relative_humidity_2m",
        // Wind
        "wind" | "winds" | "wind_speed" | "wind_speed_10m" => "wind_speed_10m",
        "wind_dir" | "wind_direction" => "wind_direction_10m",
        "wind_gusts" | "wind_gust" => "wind_gusts_10m",
        // Precipitation
        "precip" | "precipitation" => "precipitation",
        "rain" => "rain",
        "snow" | "snowfall" => "snowfall",
        "snow_depth" => "snow_depth",
        // Cloud / radiation
        "cloud" | "clouds" | "cloud_cover" => "cloud_cover",
        "shortwave_radiation" => "shortwave_radiation",
        "direct_radiation" => "direct_radiation",
        "diffuse_radiation" => "diffuse_radiation",
        "et0" | "evapotranspiration" => "et0_fao_evapotranspiration",
        // Pressure
        "mslp" | "sea_level_pressure" => "pressure_msl",
        "surface_pressure" => "surface_pressure",
        // Soil temperature at depth
        "soil_surface_temperature" | "soil_temperature_surface" | "soil_temp_surface"
        | "soil_temperature_0cm" | "soil_temp_0cm" => "soil_temperature_0cm",
        "soil_temperature_6cm" | "soil_temp_6cm" => "soil_temperature_6cm",
        "soil_temperature_18cm" | "soil_temp_18cm" => "soil_temperature_18cm",
        "soil_temperature_54cm" | "soil_temp_54cm" => "soil_temperature_54cm",
        // Soil moisture layers
        "soil_moisture_0_1cm" | "soil_moisture_0_1" => "soil_moisture_0_to_1cm",
        "soil_moisture_1_3cm" => "soil_moisture_1_to_3cm",
        "soil_moisture_3_9cm" => "soil_moisture_3_to_9cm",
        "soil_moisture_9_27cm" => "soil_moisture_9_to_27cm",
        "soil_moisture_27_81cm" => "soil_moisture_27_to_81cm",
        // Solar geometry
        "sunrise" => "sunrise",
        "sunset" => "sunset",
        // Daily aggregates
        "tmax" | "temperature_max" => "temperature_2m_max",
        "tmin" | "temperature_min" => "temperature_2m_min",
        // Others
        "visibility" => "visibility",
        "uv_index" => "uv_index",
        _ => return None,
    };
    Some(canonical)
}

/// Resolves free-text variable tokens to canonical provider identifiers.
///
/// Tokens are trimmed and lowercased before lookup; unknown tokens pass
/// through as their own canonical value. The output is deduplicated while
/// preserving first-occurrence order. The time mode is accepted for
/// mode-specific alias tables later; the current table is mode-independent.
///
/// # Examples
///
/// ```
/// use meteowriter::{resolve_variables, TimeMode};
///
/// let out = resolve_variables(&["Temp".into(), "rh".into(), "xyz123".into()], TimeMode::Current);
/// assert_eq!(out, vec!["temperature_2m", "relative_humidity_2m", "xyz123"]);
/// ```
pub fn resolve_variables(tokens: &[String], _mode: TimeMode) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in tokens {
        let key = token.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let canonical = canonical_for(&key).map(str::to_owned).unwrap_or(key);
        if seen.insert(canonical.clone()) {
            out.push(canonical);
        }
    }
    log::debug!("resolved {} token(s) to {} variable(s)", tokens.len(), out.len());
    out
}
