//! Error model shared by the gateway, the normalizer and the shells.

use thiserror::Error;

/// Result type used across the workspace.
pub type SalesResult<T> = Result<T, SalesError>;

/// Message returned for caller-supplied dates that are not `YYYY-MM-DD`.
pub const ISO_DATE_MESSAGE: &str = "Dates must be in ISO format: YYYY-MM-DD";

/// Failure kinds surfaced by sales retrieval.
///
/// `Validation` is a caller mistake; everything else is an upstream or
/// deployment failure. Nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SalesError {
    /// Caller input was malformed (e.g. a date string that is not ISO).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Credentials were missing or rejected by the remote service.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport failure, remote fault, or a response that could not be read.
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// Required configuration was not provided.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SalesError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteService(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// The error message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            SalesError::Validation(msg)
            | SalesError::Authentication(msg)
            | SalesError::RemoteService(msg)
            | SalesError::Configuration(msg) => msg,
        }
    }

    /// Whether the failure was caused by caller input rather than upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SalesError::Validation(_))
    }
}
