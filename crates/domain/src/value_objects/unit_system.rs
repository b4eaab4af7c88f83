//! Unit system value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The measurement convention applied to both the upstream request and
/// the rendered reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Celsius and metres per second
    Metric,
    /// Fahrenheit and miles per hour
    Imperial,
}

impl UnitSystem {
    /// The value the upstream API expects in its `units` query parameter
    #[must_use]
    pub const fn api_value(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Display label for temperatures
    #[must_use]
    pub const fn temperature_label(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Display label for wind speeds
    ///
    /// The upstream API reports metric wind in metres per second, not
    /// km/h, so the metric label follows suit.
    #[must_use]
    pub const fn wind_label(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_value())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(format!("Unknown unit system: {s}")),
        }
    }
}
