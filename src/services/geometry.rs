//! Scalar geometry primitives shared by route synthesis and tracking.

use crate::models::{Coordinate, TransportMode};

/// Time to cover a distance at the mode's average speed, in seconds.
pub fn duration_seconds(distance_m: f64, mode: TransportMode) -> f64 {
    distance_m / mode.average_speed_m_per_s()
}

/// Linear interpolation between two values. `factor` is clamped to [0, 1].
///
/// Returns exactly `v1` when the endpoints are equal, so factors derived
/// from noisy distance ratios cannot drift the result.
pub fn interpolate(v1: f64, v2: f64, factor: f64) -> f64 {
    if v1 == v2 {
        return v1;
    }
    v1 + factor.clamp(0.0, 1.0) * (v2 - v1)
}

/// Unit vector perpendicular to the `from` -> `to` direction in degree
/// space, as (lat, lng) components. `None` when the points coincide.
pub fn perpendicular_unit(from: &Coordinate, to: &Coordinate) -> Option<(f64, f64)> {
    let dlat = to.lat - from.lat;
    let dlng = to.lng - from.lng;
    let len = (dlat * dlat + dlng * dlng).sqrt();
    if len < 1e-12 {
        return None;
    }
    Some((-dlng / len, dlat / len))
}
