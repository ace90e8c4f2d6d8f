//! Nested API router: API root plus every registered resource.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, services::AppServices};
use crate::app::routes::items;

pub fn router() -> Router {
    Router::new()
        .route("/api", get(api_root))
        .route("/api/", get(api_root))
        .merge(items::router())
}

/// GET /api/ - links to each registered collection
pub async fn api_root(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let base_url = format!("http://{host}");

    (StatusCode::OK, Json(dto::api_root(&base_url, services.registry()))).into_response()
}
