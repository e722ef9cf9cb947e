//! Upgrade persistence
//!
//! The record is one JSON blob under a single key. Reads never fail: a missing
//! blob means no prior progress, and a corrupt or partial one keeps every field
//! that still decodes and fills the rest with defaults.

use serde_json::{Map, Value};

use super::state::UpgradeState;
use crate::error::StoreError;

/// Storage key of the upgrade record
pub const STORAGE_KEY: &str = "pizza-delivery-upgrades";

/// Minimal string key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}

/// Decode a stored blob, salvaging whatever fields still decode
pub fn decode(json: &str) -> UpgradeState {
    let stored = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log::warn!("Upgrade record is not an object, starting fresh");
            return UpgradeState::default();
        }
        Err(e) => {
            log::warn!("Upgrade record is corrupt ({}), starting fresh", e);
            return UpgradeState::default();
        }
    };

    let mut state = match serde_json::from_value::<UpgradeState>(Value::Object(stored.clone())) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Upgrade record partially corrupt ({}), salvaging fields", e);
            salvage(stored)
        }
    };
    state.normalize();
    state
}

/// Apply stored fields one at a time on top of the defaults, skipping any that fail
fn salvage(stored: Map<String, Value>) -> UpgradeState {
    let Ok(Value::Object(mut merged)) = serde_json::to_value(UpgradeState::default()) else {
        return UpgradeState::default();
    };

    for (key, value) in stored {
        if !merged.contains_key(&key) {
            continue;
        }
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        if serde_json::from_value::<UpgradeState>(Value::Object(candidate.clone())).is_ok() {
            merged = candidate;
        } else {
            log::warn!("Dropping unreadable upgrade field '{}'", key);
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// Read the upgrade record at session start
pub fn load(store: &impl KeyValueStore) -> UpgradeState {
    match store.get(STORAGE_KEY) {
        Some(json) => {
            let state = decode(&json);
            log::info!(
                "Loaded upgrades ({} of {} points available)",
                state.available_points,
                state.total_points
            );
            state
        }
        None => {
            log::info!("No upgrade record found, starting fresh");
            UpgradeState::default()
        }
    }
}

/// Write the upgrade record after a change
pub fn save(store: &mut impl KeyValueStore, state: &UpgradeState) -> Result<(), StoreError> {
    let json = serde_json::to_string(state)?;
    store.set(STORAGE_KEY, &json)?;
    log::debug!("Upgrades saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::catalog::FiringMode;
    use crate::upgrades::state::Category;

    #[test]
    fn test_missing_record_is_default() {
        let store = MemoryStore::new();
        assert_eq!(load(&store), UpgradeState::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut state = UpgradeState::default();
        state.add_points(3000);
        state.purchase(Category::FiringMode, "double");
        save(&mut store, &state).unwrap();

        let loaded = load(&store);
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_blob_uses_camel_case_keys() {
        let json = serde_json::to_string(&UpgradeState::default()).unwrap();
        assert!(json.contains("\"availablePoints\""));
        assert!(json.contains("\"unlockedFiringModes\":[\"single\"]"));
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let state = decode(
            r#"{
                "totalPoints": 900,
                "availablePoints": 400,
                "unlockedBeamColors": ["plasma"]
            }"#,
        );
        assert_eq!(state.total_points, 900);
        assert_eq!(state.available_points, 400);
        assert_eq!(state.rocket_shape_id, "classic");
        assert!(state.is_unlocked(Category::BeamColor, "default"));
        assert!(state.is_unlocked(Category::BeamColor, "plasma"));
    }

    #[test]
    fn test_bad_field_is_dropped_others_kept() {
        let state = decode(
            r#"{
                "totalPoints": 1200,
                "availablePoints": 1200,
                "firingMode": "laser",
                "unlockedFiringModes": ["double"]
            }"#,
        );
        assert_eq!(state.total_points, 1200);
        assert_eq!(state.firing_mode, FiringMode::Single);
        assert_eq!(
            state.unlocked_firing_modes,
            vec![FiringMode::Single, FiringMode::Double]
        );
    }

    #[test]
    fn test_garbage_is_default() {
        assert_eq!(decode("{{{{"), UpgradeState::default());
        assert_eq!(decode("[1, 2, 3]"), UpgradeState::default());
    }
}
