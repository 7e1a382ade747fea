use crate::models::{Coordinate, SynthesizeRouteRequest, TransportMode};
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    // Exercise the synthesizer on a tiny fixed request
    let probe = SynthesizeRouteRequest {
        origin: Coordinate { lat: 0.0, lng: 0.0 },
        destination: Coordinate { lat: 0.0, lng: 0.01 },
        mode: TransportMode::Walking,
        prefer_low_aqi: false,
        interior_point_count: None,
        seed: Some(0),
    };
    match state.synthesizer.generate_route(&probe) {
        Ok(route) => {
            status["checks"]["synthesizer"] = json!("ok");
            status["checks"]["probe_points"] = json!(route.points.len());
        }
        Err(e) => {
            status["checks"]["synthesizer"] = json!({"error": e.to_string()});
            status["status"] = json!("error");
        }
    }

    Json(status)
}
