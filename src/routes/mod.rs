pub mod debug;
pub mod synthesize;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/synthesize", post(synthesize::synthesize_route))
        .route("/routes/instructions", get(synthesize::list_instructions))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
