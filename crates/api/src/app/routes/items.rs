//! Item resource handlers (collection + detail).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use itemhub_items::ItemId;

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    let collection = get(list_items).post(create_item);
    let detail = get(retrieve_item)
        .put(update_item)
        .patch(partial_update_item)
        .delete(destroy_item);

    Router::new()
        .route("/api/items", collection.clone())
        .route("/api/items/", collection)
        .route("/api/items/:id", detail.clone())
        .route("/api/items/:id/", detail)
}

fn parse_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

fn payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, axum::response::Response> {
    body.map(|Json(v)| v).map_err(errors::json_rejection_to_response)
}

/// GET /api/items/
pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    (StatusCode::OK, Json(services.items().list())).into_response()
}

/// POST /api/items/
pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let payload = match payload(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.items().create(&payload) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /api/items/:id/
pub async fn retrieve_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.items().retrieve(id) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// PUT /api/items/:id/
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    apply_update(&services, &id, body, false)
}

/// PATCH /api/items/:id/
pub async fn partial_update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    apply_update(&services, &id, body, true)
}

fn apply_update(
    services: &AppServices,
    id: &str,
    body: Result<Json<Value>, JsonRejection>,
    partial: bool,
) -> axum::response::Response {
    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let payload = match payload(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.items().update(id, &payload, partial) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /api/items/:id/
pub async fn destroy_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.items().destroy(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
