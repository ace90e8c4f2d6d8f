//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record store + viewset wiring, resource registry
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use itemhub_infra::ServerConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with fresh in-memory services.
pub fn build_app(config: &ServerConfig) -> Router {
    build_app_with(config, Arc::new(services::build_services()))
}

/// Build the router around existing services (tests inspect them directly).
pub fn build_app_with(config: &ServerConfig, services: Arc<services::AppServices>) -> Router {
    routes::router(config.homepage)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span)),
        )
}
