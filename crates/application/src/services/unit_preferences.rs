//! Per-user unit system preferences

use std::collections::HashMap;

use domain::{UnitSystem, UserId};
use parking_lot::RwLock;

/// In-memory store of per-user unit preferences
///
/// Absent entries resolve to the process-wide default. Entries are
/// created on the first explicit change and live for the process
/// lifetime; losing them on restart is accepted behavior.
pub struct UnitPreferenceStore {
    default: UnitSystem,
    store: RwLock<HashMap<UserId, UnitSystem>>,
}

impl std::fmt::Debug for UnitPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitPreferenceStore")
            .field("default", &self.default)
            .field("entries", &self.store.read().len())
            .finish()
    }
}

impl UnitPreferenceStore {
    /// Create a store that falls back to `default`
    #[must_use]
    pub fn new(default: UnitSystem) -> Self {
        Self {
            default,
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Record a user's preference from raw input
    ///
    /// Unrecognized values are silently replaced by the configured
    /// default; this never errors and never stores an invalid value.
    pub fn set_units(&self, user: UserId, value: &str) {
        let units = value.parse().unwrap_or(self.default);
        self.store.write().insert(user, units);
    }

    /// Resolve a user's unit system
    #[must_use]
    pub fn units_for(&self, user: UserId) -> UnitSystem {
        self.store.read().get(&user).copied().unwrap_or(self.default)
    }
}
