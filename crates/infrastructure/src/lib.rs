//! Infrastructure layer for Wetterfrosch
//!
//! Configuration loading and the adapters that plug external services
//! into the application's ports.

pub mod adapters;
pub mod config;

pub use adapters::WeatherAdapter;
pub use config::{AppConfig, CacheConfig};
