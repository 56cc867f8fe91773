//! HTTP application wiring (Axum router + order source).
//!
//! - `services.rs`: where orders come from (live Odoo client or a test double)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query-string DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::SalesSource;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(source: Arc<dyn SalesSource>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(ServiceBuilder::new().layer(Extension(source)))
}
