//! Platform API client.
//!
//! The dashboard holds no entity data: stores, billboards, colors, sizes,
//! and orders all live in the platform service, reached over REST with a
//! service bearer token. This module owns the HTTP plumbing and the
//! per-entity call surface.
//!
//! # Architecture
//!
//! - One shared `reqwest` client behind an `Arc`, cloned freely
//! - Service-token auth; the platform enforces nothing per-operator
//! - Store-scoped entity paths: `/{store_id}/billboards/{id}` and friends
//! - Error bodies are `{"error": "..."}` and surface in `PlatformError`

pub mod billboards;
pub mod client;
pub mod colors;
pub mod orders;
pub mod sizes;
pub mod stores;

pub use client::PlatformClient;

use thiserror::Error;

/// Errors that can occur when calling the platform API.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed (network, TLS, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Record or route does not exist.
    #[error("Not found")]
    NotFound,

    /// Platform rejected the service token.
    #[error("Service token rejected")]
    Unauthorized,

    /// Mutation refused because dependent records still reference the
    /// target (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limited by the platform.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("Platform returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the raw body.
        message: String,
    },
}

impl PlatformError {
    /// True when the platform refused a mutation because dependent records
    /// still reference the target.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_display() {
        let err = PlatformError::NotFound;
        assert_eq!(err.to_string(), "Not found");

        let err = PlatformError::Conflict("billboard has categories".to_string());
        assert_eq!(err.to_string(), "Conflict: billboard has categories");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = PlatformError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_status_error_display() {
        let err = PlatformError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Platform returned 500: boom");
    }

    #[test]
    fn test_is_conflict() {
        assert!(PlatformError::Conflict("in use".to_string()).is_conflict());
        assert!(!PlatformError::NotFound.is_conflict());
        assert!(!PlatformError::RateLimited(10).is_conflict());
    }
}
