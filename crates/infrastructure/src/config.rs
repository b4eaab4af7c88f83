//! Application configuration

use domain::UnitSystem;
use integration_openweather::OpenWeatherConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
///
/// All values are supplied at process start and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream weather API configuration
    #[serde(default)]
    pub weather: OpenWeatherConfig,

    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Unit system used when a user has no stored preference
    #[serde(default = "default_units")]
    pub default_units: UnitSystem,
}

const fn default_units() -> UnitSystem {
    UnitSystem::Metric
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather: OpenWeatherConfig::default(),
            cache: CacheConfig::default(),
            default_units: default_units(),
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Uniform time-to-live for cached reports in seconds (default: 5 minutes)
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

const fn default_cache_ttl() -> u64 {
    5 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Precedence, lowest to highest: built-in defaults, a `config`
    /// file in the working directory, then environment variables with
    /// the `WETTERFROSCH` prefix. Sections are separated by a double
    /// underscore so field names may contain single ones
    /// (e.g. `WETTERFROSCH_WEATHER__API_KEY`,
    /// `WETTERFROSCH_CACHE__TTL_SECS`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("cache.ttl_secs", default_cache_ttl())?
            .set_default("default_units", "metric")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(env_source());

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// Environment variable source for [`AppConfig::load`]
///
/// The section separator is `__`, not `_`: every section here has a
/// field with an underscore in its name (`api_key`, `ttl_secs`), and a
/// single-underscore separator would split those into nested keys that
/// serde silently drops.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("WETTERFROSCH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
