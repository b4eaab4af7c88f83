//! Weather provider port
//!
//! Defines the interface the orchestrator uses to reach the upstream
//! weather service. The infrastructure layer supplies the concrete
//! HTTP-backed implementation.

use async_trait::async_trait;
use domain::{UnitSystem, WeatherReport};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Classified provider failures
///
/// Callers must be able to tell a transport failure from an upstream
/// rejection and from a structurally unusable payload; none of these
/// is ever shown to the end user verbatim.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The upstream did not respond within the request timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// The upstream responded with an error status
    ///
    /// `detail` is whatever diagnostic body the server returned,
    /// treated as an opaque string for logging only.
    #[error("Upstream error {status}: {detail}")]
    Upstream { status: u16, detail: String },

    /// A 2xx payload that cannot be turned into a usable report
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Any other transport-level failure
    #[error("Network error: {0}")]
    Network(String),
}

/// Port for fetching normalized weather reports
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current weather for a named city
    async fn fetch_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<WeatherReport, ProviderError>;

    /// Fetch current weather for a coordinate pair
    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<WeatherReport, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn trait_is_send_sync() {
        assert_send_sync::<dyn WeatherProvider>();
    }

    #[test]
    fn upstream_error_message_carries_status_and_detail() {
        let err = ProviderError::Upstream {
            status: 404,
            detail: "{\"cod\":\"404\",\"message\":\"city not found\"}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }
}
