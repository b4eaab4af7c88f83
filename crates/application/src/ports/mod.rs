//! Port definitions

mod weather_provider;

pub use weather_provider::{ProviderError, WeatherProvider};

#[cfg(test)]
pub use weather_provider::MockWeatherProvider;
