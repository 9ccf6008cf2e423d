//! Tracker session state: the single mutable owner of profile and log.
//!
//! The presentation layer holds the only `Tracker` handle and calls the
//! pure functions in `estimator`, `stats` and `history` to compute derived
//! views. Every mutation here is a synchronous read-modify-persist
//! sequence. Writes are fire-and-forget: a failed write is logged and not
//! retried, and the in-memory state stays authoritative for the session.

use crate::{
    catalog::Catalog,
    store::{KeyValueStore, DRINK_LOG_KEY, PROFILE_KEY},
    DrinkLog, Error, Profile, ProfileUpdate, Result,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// In-memory tracker state bound to a persistence store
pub struct Tracker<S> {
    profile: Profile,
    drinks: DrinkLog,
    store: S,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Open tracker state from the store
    ///
    /// Missing or corrupt entries fall back to defaults (default profile,
    /// empty log) with a warning; this is never a user-visible error.
    pub fn open(store: S) -> Self {
        let profile = load_or_default(&store, PROFILE_KEY);
        let drinks = load_or_default(&store, DRINK_LOG_KEY);
        Self {
            profile,
            drinks,
            store,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn drinks(&self) -> &DrinkLog {
        &self.drinks
    }

    /// Apply a partial profile edit and persist
    pub fn set_profile(&mut self, update: ProfileUpdate) {
        self.profile.apply(update);
        let raw = serde_json::to_string(&self.profile);
        self.persist(PROFILE_KEY, raw);
    }

    /// Record a drink and persist; returns the new event's id
    pub fn add_drink(
        &mut self,
        amount_ml: f64,
        percentage: f64,
        datetime: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> i64 {
        let id = self.drinks.add(amount_ml, percentage, datetime, now);
        tracing::info!("Recorded drink {} ({} mL at {}%)", id, amount_ml, percentage);
        self.persist_drinks();
        id
    }

    /// Delete a drink by id and persist; false if no event had that id
    pub fn remove_drink(&mut self, id: i64) -> bool {
        match self.drinks.remove(id) {
            Some(removed) => {
                tracing::info!("Removed drink {} ({} mL)", removed.id, removed.amount_ml);
                self.persist_drinks();
                true
            }
            None => {
                tracing::debug!("No drink with id {} to remove", id);
                false
            }
        }
    }

    /// Record a drink from a named catalog preset
    pub fn apply_preset(
        &mut self,
        catalog: &Catalog,
        name: &str,
        datetime: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let preset = catalog
            .find_preset(name)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))?;
        Ok(self.add_drink(preset.amount_ml, preset.percentage, datetime, now))
    }

    fn persist_drinks(&mut self) {
        let raw = serde_json::to_string(&self.drinks);
        self.persist(DRINK_LOG_KEY, raw);
    }

    fn persist(&mut self, key: &str, serialized: serde_json::Result<String>) {
        match serialized {
            Ok(raw) => {
                if let Err(e) = self.store.save(key, &raw) {
                    tracing::warn!("Failed to persist '{}': {}. Continuing in memory.", key, e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize '{}': {}", key, e),
        }
    }
}

fn load_or_default<T: DeserializeOwned + Default>(
    store: &impl KeyValueStore,
    key: &str,
) -> T {
    match store.load(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to parse stored '{}': {}. Using defaults.", key, e);
                T::default()
            }
        },
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_default_catalog, store::JsonFileStore, Gender};
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    /// In-memory store for unit tests
    #[derive(Default)]
    struct MemoryStore {
        values: HashMap<String, String>,
        fail_writes: bool,
    }

    impl KeyValueStore for MemoryStore {
        fn load(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn save(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(Error::Other("disk full".into()));
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_store_uses_defaults() {
        let tracker = Tracker::open(MemoryStore::default());

        assert_eq!(tracker.profile(), &Profile::default());
        assert!(tracker.drinks().is_empty());
    }

    #[test]
    fn test_add_drink_persists_immediately() {
        let mut tracker = Tracker::open(MemoryStore::default());
        let id = tracker.add_drink(500.0, 5.0, ts(100), ts(100));

        let stored = tracker.store.values.get(DRINK_LOG_KEY).unwrap();
        assert!(stored.contains(&id.to_string()));
    }

    #[test]
    fn test_set_profile_persists_merge() {
        let mut tracker = Tracker::open(MemoryStore::default());
        tracker.set_profile(ProfileUpdate {
            gender: Some(Gender::Female),
            weight_kg: Some(60.0),
            ..Default::default()
        });

        assert_eq!(tracker.profile().gender, Gender::Female);
        assert_eq!(tracker.profile().weight_kg, 60.0);
        assert_eq!(tracker.profile().height_cm, 175.0);

        let stored = tracker.store.values.get(PROFILE_KEY).unwrap();
        let parsed: Profile = serde_json::from_str(stored).unwrap();
        assert_eq!(&parsed, tracker.profile());
    }

    #[test]
    fn test_remove_drink() {
        let mut tracker = Tracker::open(MemoryStore::default());
        let id = tracker.add_drink(500.0, 5.0, ts(100), ts(100));
        tracker.add_drink(150.0, 12.0, ts(200), ts(200));

        assert!(tracker.remove_drink(id));
        assert!(!tracker.remove_drink(id));
        assert_eq!(tracker.drinks().len(), 1);
    }

    #[test]
    fn test_apply_preset() {
        let catalog = build_default_catalog();
        let mut tracker = Tracker::open(MemoryStore::default());

        let id = tracker
            .apply_preset(&catalog, "beer", ts(100), ts(100))
            .unwrap();
        let event = tracker.drinks().events().iter().find(|e| e.id == id).unwrap();
        assert_eq!(event.amount_ml, 500.0);
        assert_eq!(event.percentage, 5.0);
    }

    #[test]
    fn test_apply_unknown_preset_is_error() {
        let catalog = build_default_catalog();
        let mut tracker = Tracker::open(MemoryStore::default());

        let result = tracker.apply_preset(&catalog, "absinthe", ts(100), ts(100));
        assert!(matches!(result, Err(Error::UnknownPreset(_))));
        assert!(tracker.drinks().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut tracker = Tracker::open(store);

        // Fire-and-forget: the add succeeds despite the failed write
        let id = tracker.add_drink(500.0, 5.0, ts(100), ts(100));
        assert!(id > 0);
        assert_eq!(tracker.drinks().len(), 1);
    }

    #[test]
    fn test_corrupt_store_falls_back_to_defaults() {
        let mut store = MemoryStore::default();
        store.save(PROFILE_KEY, "{ invalid json }").unwrap();
        store.save(DRINK_LOG_KEY, "not even close").unwrap();

        let tracker = Tracker::open(store);
        assert_eq!(tracker.profile(), &Profile::default());
        assert!(tracker.drinks().is_empty());
    }

    #[test]
    fn test_state_survives_reopen_through_file_store() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut tracker = Tracker::open(JsonFileStore::new(temp_dir.path()));
        tracker.set_profile(ProfileUpdate {
            weight_kg: Some(90.0),
            ..Default::default()
        });
        let id = tracker.add_drink(150.0, 12.0, ts(100), ts(100));
        drop(tracker);

        let reopened = Tracker::open(JsonFileStore::new(temp_dir.path()));
        assert_eq!(reopened.profile().weight_kg, 90.0);
        assert_eq!(reopened.drinks().len(), 1);
        assert_eq!(reopened.drinks().events()[0].id, id);
    }
}
