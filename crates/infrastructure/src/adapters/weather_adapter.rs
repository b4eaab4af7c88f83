//! Weather adapter - implements the provider port on top of
//! integration_openweather

use application::ports::{ProviderError, WeatherProvider};
use async_trait::async_trait;
use domain::{UnitSystem, WeatherReport};
use integration_openweather::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};

/// Adapter plugging the OpenWeather client into the application port
#[derive(Debug, Clone)]
pub struct WeatherAdapter {
    client: OpenWeatherClient,
}

impl WeatherAdapter {
    /// Create an adapter from the weather configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ProviderError> {
        let client = OpenWeatherClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

/// Map integration errors onto the port's classification
fn map_error(err: OpenWeatherError) -> ProviderError {
    match err {
        OpenWeatherError::Timeout => ProviderError::Timeout,
        OpenWeatherError::Upstream { status, detail } => {
            ProviderError::Upstream { status, detail }
        },
        OpenWeatherError::MalformedResponse(detail) => ProviderError::MalformedResponse(detail),
        OpenWeatherError::ConnectionFailed(detail) | OpenWeatherError::RequestFailed(detail) => {
            ProviderError::Network(detail)
        },
    }
}

#[async_trait]
impl WeatherProvider for WeatherAdapter {
    async fn fetch_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<WeatherReport, ProviderError> {
        self.client.fetch_by_city(city, units).await.map_err(map_error)
    }

    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<WeatherReport, ProviderError> {
        self.client
            .fetch_by_coordinates(latitude, longitude, units)
            .await
            .map_err(map_error)
    }
}
