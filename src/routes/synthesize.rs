use crate::error::{AppError, Result};
use crate::models::route::{RouteResponse, SynthesizeRouteRequest};
use crate::services::route_synthesizer::instruction_vocabulary;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// POST /routes/synthesize
/// Build a point-to-point route annotated with AQI and turn instructions
pub async fn synthesize_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesizeRouteRequest>,
) -> Result<Json<RouteResponse>> {
    // Validate request
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        origin_lat = request.origin.lat,
        origin_lng = request.origin.lng,
        destination_lat = request.destination.lat,
        destination_lng = request.destination.lng,
        mode = %request.mode,
        prefer_low_aqi = request.prefer_low_aqi,
        "Route request: ({:.4}, {:.4}) -> ({:.4}, {:.4}), mode={}",
        request.origin.lat, request.origin.lng,
        request.destination.lat, request.destination.lng, request.mode
    );

    let route = state.synthesizer.generate_route(&request)?;

    Ok(Json(RouteResponse { route }))
}

/// GET /routes/instructions
/// Every instruction string the synthesizer can emit, for renderers and
/// localization layers
pub async fn list_instructions() -> Json<Value> {
    Json(json!({ "instructions": instruction_vocabulary() }))
}
