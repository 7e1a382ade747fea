//! Path shaping: interpolation between the endpoints plus a smooth
//! perpendicular bow and per-point jitter, so synthesized paths read as
//! plausible streets rather than a ruler line.

use crate::models::Coordinate;
use crate::services::geometry;
use rand::{rngs::StdRng, RngExt};

/// Build the full coordinate list for a route: origin, `interior_count`
/// displaced interior points, destination.
///
/// Interior point `k` (of `n` total) sits at fraction `t = k/(n-1)` between
/// the endpoints and is displaced perpendicular to the origin->destination
/// vector by `sin(pi*t) * curve_amplitude`, plus independent per-axis
/// jitter. Both amplitudes scale with the endpoint span so short and long
/// routes bow proportionally.
pub fn build_path(
    origin: &Coordinate,
    destination: &Coordinate,
    interior_count: usize,
    curve_strength_factor: f64,
    jitter_factor: f64,
    rng: &mut StdRng,
) -> Vec<Coordinate> {
    let n = interior_count + 2;

    let dlat = destination.lat - origin.lat;
    let dlng = destination.lng - origin.lng;
    let span_deg = (dlat * dlat + dlng * dlng).sqrt();
    let curve_amplitude = span_deg * curve_strength_factor;
    let jitter = span_deg * jitter_factor;

    let perpendicular = geometry::perpendicular_unit(origin, destination);

    let mut path = Vec::with_capacity(n);
    path.push(*origin);

    for k in 1..n - 1 {
        let t = k as f64 / (n - 1) as f64;
        let base_lat = geometry::interpolate(origin.lat, destination.lat, t);
        let base_lng = geometry::interpolate(origin.lng, destination.lng, t);

        let (mut lat, mut lng) = (base_lat, base_lng);
        if let Some((perp_lat, perp_lng)) = perpendicular {
            let offset = (std::f64::consts::PI * t).sin() * curve_amplitude;
            lat += perp_lat * offset;
            lng += perp_lng * offset;
        }
        if jitter > 0.0 {
            lat += rng.random_range(-jitter..=jitter);
            lng += rng.random_range(-jitter..=jitter);
        }

        match Coordinate::new(lat, lng) {
            Ok(coordinate) => path.push(coordinate),
            Err(e) => {
                // Displacement pushed the point off the valid grid (routes
                // hugging a pole or the antimeridian). Fall back to the
                // undisplaced interpolation.
                tracing::warn!(
                    index = k,
                    "Displaced point invalid ({}), keeping base interpolation",
                    e
                );
                path.push(Coordinate {
                    lat: base_lat,
                    lng: base_lng,
                });
            }
        }
    }

    path.push(*destination);
    path
}
