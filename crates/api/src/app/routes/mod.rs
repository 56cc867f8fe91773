use axum::{routing::get, Router};

pub mod sales;
pub mod system;

/// Router for the `/api` prefix.
pub fn router() -> Router {
    Router::new().route("/sales", get(sales::list_sales))
}
