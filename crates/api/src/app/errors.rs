use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use salesbridge_core::SalesError;

/// Caller mistakes are 400; every upstream or deployment failure is 502.
pub fn sales_error_to_response(err: SalesError) -> axum::response::Response {
    match &err {
        SalesError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg.clone())
        }
        SalesError::Authentication(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "authentication_error", msg.clone())
        }
        SalesError::RemoteService(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "remote_service_error", msg.clone())
        }
        SalesError::Configuration(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "configuration_error", msg.clone())
        }
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
