//! Weather query orchestrator
//!
//! Ties the preference store, the response cache, and the provider
//! port together. Every public method returns a ready-to-display
//! string; provider failures are logged here and converted to fixed
//! apology texts, never surfaced verbatim.

use std::sync::Arc;

use domain::{GeoLocation, UnitSystem, UserId, WeatherReport};
use tracing::{debug, instrument, warn};

use crate::ports::{ProviderError, WeatherProvider};
use crate::services::report_formatter::format_report;
use crate::services::response_cache::{CacheKey, ResponseCache};
use crate::services::unit_preferences::UnitPreferenceStore;

/// Reply when a city lookup fails for any provider-side reason
const CITY_FETCH_FAILED: &str = "Could not fetch the weather 😔\n\n\
    Check the spelling of the city name.\n\
    Examples: <code>Paris</code>, <code>Tokyo</code>.";

/// Reply when a coordinate lookup fails for any provider-side reason
const COORDS_FETCH_FAILED: &str = "Could not fetch the weather for those coordinates 😔\n\n\
    Try again, or ask for a city by name instead.\n\
    Manual input also works, for example:\n\
    <code>48.8566, 2.3522</code> (Paris)";

/// Reply when free text looks like a coordinate attempt but does not parse
const COORDS_FORMAT_HELP: &str = "Could not read those coordinates 😔\n\
    Expected format:\n\
    <code>55.7558, 37.6176</code> (Moscow)\n\
    <code>40.7128, -74.0060</code> (New York)";

/// Per-query orchestrator
///
/// Owns the cache and the preference store; the provider is injected
/// behind its port so tests can substitute a mock. Two concurrent
/// misses for the same key may both reach the provider; the duplicate
/// fetch is accepted rather than adding per-key in-flight locking.
pub struct WeatherQueryService {
    provider: Arc<dyn WeatherProvider>,
    cache: ResponseCache,
    preferences: UnitPreferenceStore,
}

impl std::fmt::Debug for WeatherQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherQueryService")
            .field("cache", &self.cache)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl WeatherQueryService {
    /// Create the orchestrator with its injected collaborators
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        cache: ResponseCache,
        preferences: UnitPreferenceStore,
    ) -> Self {
        Self {
            provider,
            cache,
            preferences,
        }
    }

    /// Record a unit preference for `user`
    ///
    /// Unrecognized values fall back to the configured default.
    pub fn set_units(&self, user: UserId, value: &str) {
        self.preferences.set_units(user, value);
    }

    /// Resolve the unit system `user` currently gets replies in
    #[must_use]
    pub fn units_for(&self, user: UserId) -> UnitSystem {
        self.preferences.units_for(user)
    }

    /// Answer a city-name query
    #[instrument(skip(self), fields(user = %user))]
    pub async fn city_query(&self, user: UserId, city: &str) -> String {
        let units = self.preferences.units_for(user);
        let key = CacheKey::for_city(city, units);

        if let Some(report) = self.cache.get(&key) {
            debug!(city, "Answering city query from cache");
            return format_report(&report, units);
        }

        match self.provider.fetch_by_city(city.trim(), units).await {
            Ok(report) => self.store_and_format(key, report, units),
            Err(err) => {
                log_provider_error(&err, "city query failed");
                CITY_FETCH_FAILED.to_string()
            },
        }
    }

    /// Answer a coordinate query
    #[instrument(skip(self), fields(user = %user, location = %location))]
    pub async fn coordinate_query(&self, user: UserId, location: GeoLocation) -> String {
        let units = self.preferences.units_for(user);
        let key = CacheKey::for_coordinates(location, units);

        if let Some(report) = self.cache.get(&key) {
            debug!(%location, "Answering coordinate query from cache");
            return format_report(&report, units);
        }

        let fetched = self
            .provider
            .fetch_by_coordinates(location.latitude(), location.longitude(), units)
            .await;

        match fetched {
            Ok(report) => self.store_and_format(key, report, units),
            Err(err) => {
                log_provider_error(&err, "coordinate query failed");
                COORDS_FETCH_FAILED.to_string()
            },
        }
    }

    /// Triage free text as a possible manual coordinate entry
    ///
    /// Returns `Some(reply)` when the text parses as `lat, lon` (the
    /// regular coordinate path) or when it contains digits but does
    /// not parse (format help). Returns `None` for text without any
    /// digits; that is not a coordinate attempt and the adapter
    /// decides what to do with it.
    #[instrument(skip(self, text), fields(user = %user))]
    pub async fn free_text_query(&self, user: UserId, text: &str) -> Option<String> {
        match text.parse::<GeoLocation>() {
            Ok(location) => Some(self.coordinate_query(user, location).await),
            Err(_) if text.chars().any(|c| c.is_ascii_digit()) => {
                debug!("Free text looked like coordinates but did not parse");
                Some(COORDS_FORMAT_HELP.to_string())
            },
            Err(_) => None,
        }
    }

    /// Populate the cache and render the fresh report
    ///
    /// Runs only after the provider returned `Ok`; a cancelled or
    /// failed fetch never touches the cache.
    fn store_and_format(&self, key: CacheKey, report: WeatherReport, units: UnitSystem) -> String {
        self.cache.set(key, report.clone());
        format_report(&report, units)
    }
}

/// Keep provider failures observable without leaking them to users
fn log_provider_error(err: &ProviderError, context: &str) {
    match err {
        ProviderError::Upstream { status, detail } => {
            warn!(status = *status, detail = %detail, "{context}");
        },
        other => warn!(error = %other, "{context}"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::eq;

    use super::*;
    use crate::ports::MockWeatherProvider;

    fn berlin_report() -> WeatherReport {
        WeatherReport::new("Berlin", "light rain", 14.2, 3.0)
    }

    fn service_with(provider: MockWeatherProvider) -> WeatherQueryService {
        WeatherQueryService::new(
            Arc::new(provider),
            ResponseCache::new(Duration::from_secs(300)),
            UnitPreferenceStore::new(UnitSystem::Metric),
        )
    }

    #[tokio::test]
    async fn city_miss_fetches_caches_and_formats() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_city()
            .with(eq("Berlin"), eq(UnitSystem::Metric))
            .times(1)
            .returning(|_, _| Ok(berlin_report()));

        let service = service_with(provider);

        let first = service.city_query(UserId::new(1), "Berlin").await;
        assert!(first.contains("Berlin"));
        assert!(first.contains("Light rain"));
        assert!(first.contains("14.2"));
        assert!(first.contains("m/s"));

        // Second identical query must be served from cache; the mock
        // would panic on a second provider call.
        let second = service.city_query(UserId::new(1), "Berlin").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cache_hit_ignores_city_case() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_city()
            .times(1)
            .returning(|_, _| Ok(berlin_report()));

        let service = service_with(provider);
        let first = service.city_query(UserId::new(1), "Berlin").await;
        let second = service.city_query(UserId::new(1), "  berlin ").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn provider_failure_yields_city_apology_and_no_cache_write() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_fetch_by_city().times(2).returning(|_, _| {
            Err(ProviderError::Upstream {
                status: 404,
                detail: "city not found".to_string(),
            })
        });

        let service = service_with(provider);

        let reply = service.city_query(UserId::new(1), "Atlantis").await;
        assert_eq!(reply, CITY_FETCH_FAILED);
        assert!(!reply.contains("404"), "raw detail must not leak");

        // A failed query must not populate the cache: the repeat query
        // reaches the provider again (times(2) above).
        let repeat = service.city_query(UserId::new(1), "Atlantis").await;
        assert_eq!(repeat, CITY_FETCH_FAILED);
    }

    #[tokio::test]
    async fn coordinate_failure_yields_coordinate_apology() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_coordinates()
            .times(1)
            .returning(|_, _, _| Err(ProviderError::Timeout));

        let service = service_with(provider);
        let location = GeoLocation::new(48.8566, 2.3522).expect("valid");
        let reply = service.coordinate_query(UserId::new(1), location).await;
        assert_eq!(reply, COORDS_FETCH_FAILED);
    }

    #[tokio::test]
    async fn nearby_coordinates_reuse_the_cached_entry() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_coordinates()
            .times(1)
            .returning(|_, _, _| Ok(berlin_report()));

        let service = service_with(provider);
        let a = GeoLocation::new(55.75581, 37.6176).expect("valid");
        let b = GeoLocation::new(55.75578, 37.6176).expect("valid");

        let first = service.coordinate_query(UserId::new(1), a).await;
        let second = service.coordinate_query(UserId::new(1), b).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unit_preference_drives_fetch_and_labels() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_city()
            .with(eq("NYC"), eq(UnitSystem::Imperial))
            .times(1)
            .returning(|_, _| Ok(WeatherReport::new("NYC", "light rain", 50.0, 7.0)));

        let service = service_with(provider);
        service.set_units(UserId::new(7), "imperial");

        let reply = service.city_query(UserId::new(7), "NYC").await;
        assert!(reply.contains("°F"));
        assert!(reply.contains("mph"));
    }

    #[tokio::test]
    async fn users_with_different_units_do_not_share_entries() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_city()
            .with(eq("Berlin"), eq(UnitSystem::Metric))
            .times(1)
            .returning(|_, _| Ok(berlin_report()));
        provider
            .expect_fetch_by_city()
            .with(eq("Berlin"), eq(UnitSystem::Imperial))
            .times(1)
            .returning(|_, _| Ok(WeatherReport::new("Berlin", "light rain", 57.6, 6.7)));

        let service = service_with(provider);
        service.set_units(UserId::new(2), "imperial");

        let metric = service.city_query(UserId::new(1), "Berlin").await;
        let imperial = service.city_query(UserId::new(2), "Berlin").await;
        assert!(metric.contains("°C"));
        assert!(imperial.contains("°F"));
    }

    #[tokio::test]
    async fn free_text_coordinates_take_the_coordinate_path() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_by_coordinates()
            .times(1)
            .returning(|_, _, _| Ok(berlin_report()));

        let service = service_with(provider);
        let reply = service
            .free_text_query(UserId::new(1), "52.520, 13.405")
            .await;
        assert!(reply.expect("coordinate text handled").contains("Berlin"));
    }

    #[tokio::test]
    async fn free_text_with_digits_but_malformed_gets_help() {
        let provider = MockWeatherProvider::new();
        let service = service_with(provider);

        let reply = service.free_text_query(UserId::new(1), "52.520 13.405").await;
        assert_eq!(reply, Some(COORDS_FORMAT_HELP.to_string()));
    }

    #[tokio::test]
    async fn free_text_without_digits_is_ignored() {
        let provider = MockWeatherProvider::new();
        let service = service_with(provider);

        let reply = service.free_text_query(UserId::new(1), "hello there").await;
        assert_eq!(reply, None);
    }
}
