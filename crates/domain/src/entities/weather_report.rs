//! Normalized weather report entity

use serde::{Deserialize, Serialize};

/// A provider-agnostic weather snapshot
///
/// This is the shape the rest of the system works with, decoupled from
/// whatever JSON the upstream API returns. Values are immutable once
/// constructed; equality is by value, which is all the cache and the
/// tests need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display name of the location ("Unknown" when the upstream omits it)
    pub city: String,
    /// Free-text condition summary ("—" when the upstream omits it)
    pub description: String,
    /// Temperature in the requested unit system (mandatory upstream field)
    pub temperature: f64,
    /// Wind speed in the requested unit system (0.0 when absent upstream)
    pub wind_speed: f64,
}

impl WeatherReport {
    /// Create a new report
    pub fn new(
        city: impl Into<String>,
        description: impl Into<String>,
        temperature: f64,
        wind_speed: f64,
    ) -> Self {
        Self {
            city: city.into(),
            description: description.into(),
            temperature,
            wind_speed,
        }
    }
}
