//! The complete HTTP application: routes plus shared middleware.

use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::intake::{intake_routes, IntakeAppState};
use super::loan::{loan_routes, LoanAppState};
use crate::config::ServerConfig;

/// Builds the router served by the binary.
///
/// Intake endpoints live under `/api/intake`, loan endpoints under
/// `/api/loan`, and `/health` answers liveness checks.
pub fn create_app(intake: IntakeAppState, loan: LoanAppState, server: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(&server.cors_origins_list()));

    let api = Router::new()
        .nest("/intake", intake_routes().with_state(intake))
        .nest("/loan", loan_routes().with_state(loan));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware);

    info!("HTTP application created");
    app
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> (StatusCode, Json<super::ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(super::ErrorResponse::new("NOT_FOUND", "No such endpoint")),
    )
}
