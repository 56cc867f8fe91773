use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors, services::SalesSource};

pub async fn list_sales(
    Extension(source): Extension<Arc<dyn SalesSource>>,
    Query(query): Query<dto::SalesQuery>,
) -> axum::response::Response {
    let dto::SalesQuery { from, to, limit } = query;

    let result = tokio::task::spawn_blocking(move || source.sales(&from, &to, limit)).await;

    match result {
        Ok(Ok(orders)) => {
            tracing::info!(count = orders.len(), "served sales query");
            let body: Vec<serde_json::Value> =
                orders.iter().map(|o| o.to_serializable()).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "sales query failed");
            errors::sales_error_to_response(e)
        }
        Err(e) => {
            tracing::error!(error = %e, "sales worker panicked");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}
