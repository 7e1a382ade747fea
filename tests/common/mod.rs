use airpath::config::SynthesizerConfig;
use airpath::models::{Coordinate, Route, RoutePoint, SynthesizeRouteRequest, TransportMode};
use airpath::services::aqi::SyntheticAqiProvider;
use airpath::services::route_synthesizer::{assemble_route, RouteSynthesizer};
use std::sync::Arc;

#[allow(dead_code)]
pub fn c(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

/// Synthesizer over the default config and the synthetic AQI profile
#[allow(dead_code)]
pub fn test_synthesizer() -> RouteSynthesizer {
    let config = SynthesizerConfig::default();
    let provider = Arc::new(SyntheticAqiProvider::new(&config));
    RouteSynthesizer::new(config, provider)
}

/// A seeded request so every test run sees the same route
#[allow(dead_code)]
pub fn seeded_request(
    origin: Coordinate,
    destination: Coordinate,
    mode: TransportMode,
) -> SynthesizeRouteRequest {
    SynthesizeRouteRequest {
        origin,
        destination,
        mode,
        prefer_low_aqi: false,
        interior_point_count: None,
        seed: Some(4242),
    }
}

/// Straight 20-point route east along the equator with uniform AQI and
/// instructions at indices 0, 5, 10, 15, 19
#[allow(dead_code)]
pub fn uniform_route(aqi: f64) -> Arc<Route> {
    let points: Vec<RoutePoint> = (0..20)
        .map(|i| {
            let mut p = RoutePoint::new(c(0.0, i as f64 * 0.001));
            p.aqi = Some(aqi);
            p.instruction = match i {
                0 => Some("Start route".to_string()),
                5 => Some("Turn left".to_string()),
                10 => Some("Bear right".to_string()),
                15 => Some("Turn right".to_string()),
                19 => Some("You have reached your destination".to_string()),
                _ => None,
            };
            p
        })
        .collect();
    Arc::new(assemble_route(points, TransportMode::Walking).unwrap())
}
