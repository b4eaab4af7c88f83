//! Raw OpenWeather wire models
//!
//! Everything except the temperature is optional on the wire; the
//! client decides which absences are tolerable.

use serde::Deserialize;

/// Top-level current-weather response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    /// Display name of the resolved location
    #[serde(default)]
    pub name: Option<String>,

    /// Condition list; only the first entry is used
    #[serde(default)]
    pub weather: Vec<ConditionData>,

    #[serde(default)]
    pub main: Option<MainData>,

    #[serde(default)]
    pub wind: Option<WindData>,
}

/// One entry of the `weather` condition list
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConditionData {
    #[serde(default)]
    pub description: Option<String>,
}

/// The `main` measurement block
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MainData {
    /// Temperature in the requested unit system
    #[serde(default)]
    pub temp: Option<f64>,
}

/// The `wind` measurement block
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WindData {
    #[serde(default)]
    pub speed: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_deserializes() {
        let json = serde_json::json!({
            "name": "Moscow",
            "weather": [{"description": "clear sky", "id": 800}],
            "main": {"temp": 12.34, "humidity": 40},
            "wind": {"speed": 3.21, "deg": 250}
        });
        let resp: ApiResponse = serde_json::from_value(json).expect("deserialize");
        assert_eq!(resp.name.as_deref(), Some("Moscow"));
        assert_eq!(resp.weather[0].description.as_deref(), Some("clear sky"));
        assert_eq!(resp.main.and_then(|m| m.temp), Some(12.34));
    }

    #[test]
    fn minimal_payload_deserializes() {
        let resp: ApiResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(resp.name.is_none());
        assert!(resp.weather.is_empty());
        assert!(resp.main.is_none());
        assert!(resp.wind.is_none());
    }
}
