use crate::error::{DriftError, Result};
use crate::utils::constants::EARTH_RADIUS_M;

/// Parse a decimal-degree coordinate value.
///
/// Returns `None` for empty, non-numeric, or non-finite input; callers attach
/// the key/column context when converting this into an error or skip entry.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

/// Parse a coordinate cell, attaching the station key and column to the
/// error. Callers downgrade this to a per-key skip entry.
pub fn parse_coordinate(value: &str, key: &str, column: &str) -> Result<f64> {
    parse_decimal(value).ok_or_else(|| DriftError::CoordinateParse {
        key: key.to_string(),
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Great-circle distance between two points using the haversine formula.
///
/// Inputs are decimal degrees, result is metres. The square-root argument is
/// clamped to [0, 1] so that antipodal points never produce a domain error
/// from floating-point rounding.
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}
