//! VLAN configuration API
//!
//! A small REST service for VLAN records, persisted in a single JSON file.

mod api;
mod config;
mod errors;
mod models;
mod storage;
mod validation;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use errors::{messages, AppError};
use models::HealthResponse;
use storage::{JsonFileStorage, Storage};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VLAN API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data file: {:?}", config.data_file_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize storage
    let storage = JsonFileStorage::open(&config.data_file_path)?;

    // Create application state
    let state = AppState {
        storage: Arc::new(storage),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // API routes
    let api_routes = Router::new()
        .route(
            "/vlans",
            get(api::list_vlans)
                .post(api::create_vlan)
                .fallback(method_not_allowed),
        )
        .route(
            "/vlans/{id}",
            get(api::get_vlan)
                .put(api::update_vlan)
                .delete(api::delete_vlan)
                .fallback(method_not_allowed),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check).fallback(method_not_allowed))
        .fallback(endpoint_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn endpoint_not_found() -> AppError {
    AppError::NotFound(messages::ENDPOINT_NOT_FOUND.to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(messages::METHOD_NOT_ALLOWED.to_string())
}
