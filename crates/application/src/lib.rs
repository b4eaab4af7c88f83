//! Application layer - use cases and orchestration
//!
//! Defines the provider port plus the services that tie a query
//! together: unit preference resolution, response caching, report
//! formatting, and the orchestrator that owns the whole flow.

pub mod ports;
pub mod services;

pub use ports::{ProviderError, WeatherProvider};
pub use services::{
    ResponseCache, UnitPreferenceStore, WeatherQueryService, format_report,
};
