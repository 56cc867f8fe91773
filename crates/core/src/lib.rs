//! `salesbridge-core` — shared building blocks for the sales retrieval stack.
//!
//! This crate holds the error taxonomy, connection configuration and the small
//! domain traits every other crate builds on. It performs no network IO.

pub mod config;
pub mod entity;
pub mod error;
pub mod value_object;

pub use config::OdooConfig;
pub use entity::Entity;
pub use error::{SalesError, SalesResult};
pub use value_object::ValueObject;
