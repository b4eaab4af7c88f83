//! OpenWeather HTTP client

use domain::{UnitSystem, WeatherReport};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::ApiResponse;

/// Placeholder shown when the upstream omits the condition text
const DESCRIPTION_PLACEHOLDER: &str = "—";

/// Weather client errors
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    /// The HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The upstream did not respond within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The upstream answered with an error status
    ///
    /// `detail` carries the diagnostic body as returned: re-serialized
    /// JSON when parseable, raw text otherwise. The shape is
    /// inconsistent upstream, so it stays an opaque string.
    #[error("OpenWeather error {status}: {detail}")]
    Upstream { status: u16, detail: String },

    /// A success payload that is missing the mandatory temperature or
    /// cannot be decoded at all
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Any other transport failure
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// OpenWeather client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (`appid` query parameter)
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Two-letter response language code (default: "en")
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            lang: default_lang(),
        }
    }
}

/// HTTP client for the OpenWeather current-weather endpoint
///
/// One GET per query, no retries; retry policy belongs to callers.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch current weather for a named city
    #[instrument(skip(self), fields(units = %units))]
    pub async fn fetch_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<WeatherReport, OpenWeatherError> {
        let params = [
            ("q", city.to_string()),
            ("appid", self.config.api_key.clone()),
            ("units", units.api_value().to_string()),
            ("lang", self.config.lang.clone()),
        ];
        self.request(&params).await
    }

    /// Fetch current weather for a coordinate pair
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, units = %units))]
    pub async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<WeatherReport, OpenWeatherError> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.config.api_key.clone()),
            ("units", units.api_value().to_string()),
            ("lang", self.config.lang.clone()),
        ];
        self.request(&params).await
    }

    /// Issue the GET and normalize the response
    async fn request(&self, params: &[(&str, String)]) -> Result<WeatherReport, OpenWeatherError> {
        let url = format!("{}/weather", self.config.base_url);
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OpenWeatherError::Timeout
                } else {
                    OpenWeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                OpenWeatherError::Timeout
            } else {
                OpenWeatherError::RequestFailed(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(OpenWeatherError::Upstream {
                status: status.as_u16(),
                detail: upstream_detail(&body),
            });
        }

        let api_response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| OpenWeatherError::MalformedResponse(e.to_string()))?;

        Self::to_report(api_response)
    }

    /// Normalize the wire payload into a domain report
    ///
    /// The temperature is the one mandatory field; a payload without
    /// `main.temp` is unusable and fails rather than getting a
    /// fabricated default.
    fn to_report(response: ApiResponse) -> Result<WeatherReport, OpenWeatherError> {
        let temperature = response
            .main
            .and_then(|main| main.temp)
            .ok_or_else(|| OpenWeatherError::MalformedResponse("missing main.temp".to_string()))?;

        let city = response
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let description = response
            .weather
            .into_iter()
            .next()
            .and_then(|condition| condition.description)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());

        let wind_speed = response.wind.and_then(|wind| wind.speed).unwrap_or(0.0);

        Ok(WeatherReport::new(city, description, temperature, wind_speed))
    }
}

/// Render the diagnostic body of an error response
///
/// JSON bodies are compacted through serde so logs stay single-line;
/// anything else is passed through as-is.
fn upstream_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .map_or_else(|_| body.to_string(), |value| value.to_string())
}
