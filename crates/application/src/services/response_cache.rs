//! Time-bounded memoization of weather reports
//!
//! Bounded-lifetime cache, not a bounded-size one: entries expire
//! after a fixed TTL and are evicted lazily on the next lookup. There
//! is no capacity limit and no background sweep.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use domain::{GeoLocation, UnitSystem, WeatherReport};
use parking_lot::RwLock;
use tracing::debug;

/// Lookup key discriminating the query kind
///
/// Coordinates are stored as thousandths of a degree so the key is
/// `Eq + Hash` without comparing floats. Rounding to 3 decimals
/// (~111 m at the equator) deliberately lets near-identical positions
/// share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// City-name query, lowercased and trimmed
    City { name: String, units: UnitSystem },
    /// Coordinate query, degrees x 1000 rounded to the nearest integer
    Coordinates {
        lat_milli: i64,
        lon_milli: i64,
        units: UnitSystem,
    },
}

impl CacheKey {
    /// Build the normalized key for a city query
    #[must_use]
    pub fn for_city(city: &str, units: UnitSystem) -> Self {
        Self::City {
            name: city.trim().to_lowercase(),
            units,
        }
    }

    /// Build the normalized key for a coordinate query
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn for_coordinates(location: GeoLocation, units: UnitSystem) -> Self {
        Self::Coordinates {
            lat_milli: (location.latitude() * 1000.0).round() as i64,
            lon_milli: (location.longitude() * 1000.0).round() as i64,
            units,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    inserted_at: Instant,
    report: WeatherReport,
}

/// In-memory response cache with a uniform TTL
///
/// Thread-safe; each operation locks the map once. `get` takes the
/// write lock because an expired read also evicts.
pub struct ResponseCache {
    ttl: Duration,
    store: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.store.read().len())
            .finish()
    }
}

impl ResponseCache {
    /// Create a cache whose entries live for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Get the report stored under `key`, if present and unexpired
    ///
    /// An entry found past its TTL is removed and treated as absent.
    pub fn get(&self, key: &CacheKey) -> Option<WeatherReport> {
        let mut store = self.store.write();
        let entry = store.get(key)?;
        if entry.inserted_at.elapsed() > self.ttl {
            store.remove(key);
            debug!(?key, "Cache entry expired");
            return None;
        }
        Some(entry.report.clone())
    }

    /// Store `report` under `key`, overwriting any existing entry
    ///
    /// Unconditional write; concurrent writers for the same key race
    /// by last-write-wins.
    pub fn set(&self, key: CacheKey, report: WeatherReport) {
        let entry = CacheEntry {
            inserted_at: Instant::now(),
            report,
        };
        self.store.write().insert(key, entry);
    }

    /// Number of entries currently stored, expired or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Whether the cache holds no entries at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}
