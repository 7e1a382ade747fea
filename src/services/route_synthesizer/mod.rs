mod instructions;
mod path_shape;
mod segmentation;

pub use instructions::instruction_vocabulary;
pub use segmentation::partition_into_segments;

use crate::config::SynthesizerConfig;
use crate::constants::CANDIDATE_SEED_STRIDE;
use crate::error::{AppError, Result};
use crate::models::{Coordinate, Route, RoutePoint, SynthesizeRouteRequest, TransportMode};
use crate::services::aqi::AqiProvider;
use crate::services::geometry;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use uuid::Uuid;

/// Builds immutable [`Route`]s from an origin, destination, and transport
/// mode. Pure given the request's seed: the same request always yields the
/// same route.
pub struct RouteSynthesizer {
    config: SynthesizerConfig,
    aqi_provider: Arc<dyn AqiProvider>,
}

impl RouteSynthesizer {
    pub fn new(config: SynthesizerConfig, aqi_provider: Arc<dyn AqiProvider>) -> Self {
        Self {
            config,
            aqi_provider,
        }
    }

    /// Synthesize a route for the request.
    ///
    /// With `prefer_low_aqi` set, `candidate_count` paths are generated from
    /// consecutive derived seeds and the one with the lowest average AQI is
    /// returned; otherwise exactly one candidate is generated.
    pub fn generate_route(&self, request: &SynthesizeRouteRequest) -> Result<Route> {
        let direct_distance = request.origin.distance_meters(&request.destination);
        if direct_distance <= 0.0 {
            return Err(AppError::DegenerateRoute(
                "origin and destination are the same point".to_string(),
            ));
        }

        let interior_count = request
            .interior_point_count
            .unwrap_or(self.config.interior_point_count);
        let base_seed = request
            .seed
            .unwrap_or_else(|| derive_seed(&request.origin, &request.destination, request.mode));
        let candidate_count = if request.prefer_low_aqi {
            self.config.candidate_count
        } else {
            1
        };

        let mut route = self.synthesize_candidate(request, interior_count, base_seed)?;
        for attempt in 1..candidate_count {
            let seed = base_seed.wrapping_add((attempt as u64).wrapping_mul(CANDIDATE_SEED_STRIDE));
            let candidate = self.synthesize_candidate(request, interior_count, seed)?;
            if candidate.average_aqi < route.average_aqi {
                route = candidate;
            }
        }

        tracing::info!(
            route_id = %route.id,
            points = route.points.len(),
            segments = route.segments.len(),
            distance_m = %format!("{:.1}", route.total_distance_m),
            average_aqi = ?route.average_aqi,
            candidates = candidate_count,
            "Synthesized {} route: {:.1}m over {} points",
            request.mode, route.total_distance_m, route.points.len()
        );

        Ok(route)
    }

    fn synthesize_candidate(
        &self,
        request: &SynthesizeRouteRequest,
        interior_count: usize,
        seed: u64,
    ) -> Result<Route> {
        let mut rng = StdRng::seed_from_u64(seed);

        let path = path_shape::build_path(
            &request.origin,
            &request.destination,
            interior_count,
            self.config.curve_strength_factor,
            self.config.jitter_factor,
            &mut rng,
        );

        let n = path.len();
        let mut points: Vec<RoutePoint> = path.into_iter().map(RoutePoint::new).collect();

        points[0].aqi = Some(self.aqi_provider.origin_aqi());
        points[n - 1].aqi = Some(self.aqi_provider.destination_aqi());
        for (index, point) in points.iter_mut().enumerate().take(n - 1).skip(1) {
            let progress = index as f64 / (n - 1) as f64;
            point.aqi = Some(
                self.aqi_provider
                    .sample(&point.coordinate, progress, &mut rng),
            );
        }

        instructions::assign_instructions(&mut points, &mut rng);

        assemble_route(points, request.mode)
    }
}

/// Finish a route from shaped, annotated points: accumulate distance/time,
/// partition into segments, and compute the totals.
pub fn assemble_route(mut points: Vec<RoutePoint>, mode: TransportMode) -> Result<Route> {
    if points.len() < 2 {
        return Err(AppError::InvalidRoute(format!(
            "a route needs at least 2 points, got {}",
            points.len()
        )));
    }

    points[0].cumulative_distance_m = 0.0;
    points[0].cumulative_time_s = 0.0;
    for index in 1..points.len() {
        let hop = points[index - 1]
            .coordinate
            .distance_meters(&points[index].coordinate);
        points[index].cumulative_distance_m = points[index - 1].cumulative_distance_m + hop;
        points[index].cumulative_time_s =
            points[index - 1].cumulative_time_s + geometry::duration_seconds(hop, mode);
    }

    let segments = segmentation::partition_into_segments(&points);

    let last_index = points.len() - 1;
    let total_distance_m = points[last_index].cumulative_distance_m;
    let total_duration_s = points[last_index].cumulative_time_s;

    let aqi_values: Vec<f64> = points.iter().filter_map(|p| p.aqi).collect();
    let average_aqi = if aqi_values.is_empty() {
        None
    } else {
        Some(aqi_values.iter().sum::<f64>() / aqi_values.len() as f64)
    };

    Ok(Route {
        id: Uuid::new_v4(),
        origin: points[0].coordinate,
        destination: points[last_index].coordinate,
        mode,
        points,
        segments,
        total_distance_m,
        total_duration_s,
        average_aqi,
    })
}

/// Deterministic seed from the request's endpoints and mode, so repeated
/// identical requests produce identical routes while distinct requests vary.
fn derive_seed(origin: &Coordinate, destination: &Coordinate, mode: TransportMode) -> u64 {
    ((origin.lat * 1000.0).abs() as u64)
        .wrapping_mul(31)
        .wrapping_add((origin.lng * 1000.0).abs() as u64)
        .wrapping_mul(37)
        .wrapping_add((destination.lat * 1000.0).abs() as u64)
        .wrapping_mul(41)
        .wrapping_add((destination.lng * 1000.0).abs() as u64)
        .wrapping_mul(43)
        .wrapping_add(mode.average_speed_m_per_s() as u64)
}
