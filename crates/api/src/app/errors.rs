use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use serde_json::json;

use itemhub_core::{DomainError, ValidationErrors};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => validation_error(errors),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "No Item matches the given query."),
        DomainError::InvalidId(msg) => {
            tracing::debug!(%msg, "unparseable id in path");
            json_error(StatusCode::NOT_FOUND, "not_found", "No Item matches the given query.")
        }
    }
}

/// Map body extraction failures to the same JSON error shape as everything else.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    match rejection {
        JsonRejection::MissingJsonContentType(e) => json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            e.body_text(),
        ),
        JsonRejection::JsonSyntaxError(e) => {
            json_error(StatusCode::BAD_REQUEST, "parse_error", format!("JSON parse error - {}", e.body_text()))
        }
        JsonRejection::JsonDataError(e) => {
            json_error(StatusCode::BAD_REQUEST, "parse_error", format!("JSON parse error - {}", e.body_text()))
        }
        other => json_error(other.status(), "bad_request", other.body_text()),
    }
}

pub fn validation_error(errors: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": errors.to_string(),
            "fields": errors,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Router fallback for paths no route matched.
pub async fn not_found(uri: Uri) -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("no route for {}", uri.path()))
}
