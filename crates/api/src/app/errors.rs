//! Store-error to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_store::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Missing(id) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            format!("product {id} vanished mid-update"),
        ),
        StoreError::Poisoned => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "store lock poisoned",
        ),
    }
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
