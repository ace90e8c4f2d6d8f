//! Admin interface.
//!
//! Read-only site index of registered models; there is no login, so nothing
//! here mutates state.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::app::{dto, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/admin", get(site_index))
        .route("/admin/", get(site_index))
}

/// GET /admin/ - registered models with record counts
pub async fn site_index(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    (StatusCode::OK, Json(dto::admin_index(services.registry()))).into_response()
}
