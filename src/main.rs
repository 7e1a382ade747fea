use airpath::config::Config;
use airpath::services::aqi::SyntheticAqiProvider;
use airpath::services::route_synthesizer::RouteSynthesizer;
use airpath::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airpath=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting airpath API server");
    tracing::info!("Configuration loaded successfully");

    // Initialize services
    let aqi_provider = Arc::new(SyntheticAqiProvider::new(&config.synthesizer));
    let synthesizer = RouteSynthesizer::new(config.synthesizer.clone(), aqi_provider);

    // Create application state
    let state = Arc::new(AppState { synthesizer });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", airpath::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
