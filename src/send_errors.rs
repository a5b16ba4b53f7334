//! # Send Error Types Module
//!
//! Errors produced while delivering a response to a chat. Both kinds are
//! handled at the single send attempt: the user gets a plain-text notice and
//! the request ends there.

use thiserror::Error;

/// Failure of one response delivery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// One or more static assets referenced by the response are absent
    #[error("resource not found: {}", .missing.join(", "))]
    ResourceNotFound {
        /// Asset names that could not be found, in response order
        missing: Vec<String>,
    },
    /// Any other I/O or transport fault, carrying its description
    #[error("{0}")]
    DeliveryFailed(String),
}

impl SendError {
    pub fn delivery_failed(err: impl std::fmt::Display) -> Self {
        SendError::DeliveryFailed(err.to_string())
    }
}
