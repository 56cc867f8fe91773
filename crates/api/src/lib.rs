//! HTTP front-end: serves normalized sale orders as JSON.

pub mod app;
