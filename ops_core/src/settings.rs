//! Flat operator-configurable settings with key/value persistence and a
//! versioned export/import blob.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use bevy::prelude::Resource;
use ops_proto::{decode_settings_export, encode_settings_export, SettingValue, SettingsExport};

/// Storage key for the whole profile, one JSON document.
pub const SETTINGS_STORAGE_KEY: &str = "defense_settings";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

/// Key/value persistence capability the host supplies (browser local
/// storage in the original deployment). Only flat string payloads cross
/// this boundary.
pub trait KeyValueStore {
    fn save(&mut self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
}

/// In-memory store used by tests and the headless runner.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// The current operator configuration: a flat mapping of enumerated keys to
/// primitive values. Reads fall back to the documented defaults when a key
/// is absent.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SettingsProfile {
    values: BTreeMap<String, SettingValue>,
}

impl Default for SettingsProfile {
    fn default() -> Self {
        Self {
            values: defaults().clone(),
        }
    }
}

impl SettingsProfile {
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| defaults().get(key).cloned())
    }

    pub fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn values(&self) -> &BTreeMap<String, SettingValue> {
        &self.values
    }

    /// Reset to the documented defaults, dropping any overrides.
    pub fn reset(&mut self) {
        self.values = defaults().clone();
    }

    /// Serialize the profile into the timestamped, versioned export blob.
    /// The caller supplies the timestamp string; the core has no clock.
    pub fn export(&self, exported_at: &str) -> SettingsExport {
        SettingsExport::new(exported_at.to_string(), self.values.clone())
    }

    /// Replace the profile with the contents of an exported blob. Metadata
    /// fields are dropped; malformed input is rejected without mutation.
    pub fn import_json(data: &str) -> Result<Self, SettingsError> {
        let export =
            decode_settings_export(data).map_err(|err| SettingsError::InvalidFormat(err.to_string()))?;
        Ok(Self {
            values: export.values,
        })
    }

    pub fn save_to(&self, store: &mut dyn KeyValueStore) -> Result<(), SettingsError> {
        let payload = serde_json::to_string(&self.values)
            .map_err(|err| SettingsError::InvalidFormat(err.to_string()))?;
        store.save(SETTINGS_STORAGE_KEY, &payload);
        Ok(())
    }

    /// Load the persisted profile, falling back to defaults when nothing is
    /// stored or the stored payload does not parse.
    pub fn load_from(store: &dyn KeyValueStore) -> Self {
        let Some(payload) = store.load(SETTINGS_STORAGE_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<BTreeMap<String, SettingValue>>(&payload) {
            Ok(values) => Self { values },
            Err(err) => {
                log::warn!("stored settings unreadable, using defaults: {}", err);
                Self::default()
            }
        }
    }

    pub fn export_json(&self, exported_at: &str) -> Result<String, SettingsError> {
        encode_settings_export(&self.export(exported_at))
            .map_err(|err| SettingsError::InvalidFormat(err.to_string()))
    }
}

/// The documented defaults, built once and shared by every lookup miss.
fn defaults() -> &'static BTreeMap<String, SettingValue> {
    static DEFAULTS: OnceLock<BTreeMap<String, SettingValue>> = OnceLock::new();
    DEFAULTS.get_or_init(build_defaults)
}

fn build_defaults() -> BTreeMap<String, SettingValue> {
    let mut values = BTreeMap::new();
    // General
    values.insert("missionName".into(), SettingValue::from("DEF-OPS-2025"));
    values.insert(
        "commandLocation".into(),
        SettingValue::from("New Delhi, India"),
    );
    values.insert("timeZone".into(), SettingValue::from("IST"));
    values.insert("language".into(), SettingValue::from("en"));
    values.insert("theme".into(), SettingValue::from("dark"));
    values.insert("autoRefresh".into(), SettingValue::from(true));
    // Drones
    values.insert("maxFlightTime".into(), SettingValue::from(120i64));
    values.insert("batteryWarning".into(), SettingValue::from(20i64));
    values.insert("autoReturnLevel".into(), SettingValue::from(15i64));
    values.insert("detectionSensitivity".into(), SettingValue::from("medium"));
    values.insert("videoQuality".into(), SettingValue::from("1080p"));
    values.insert("autoDetect".into(), SettingValue::from(true));
    // Alerts
    values.insert("alertSound".into(), SettingValue::from("siren"));
    values.insert("alertVolume".into(), SettingValue::from(75i64));
    values.insert("emailAlerts".into(), SettingValue::from(true));
    values.insert("criticalDelay".into(), SettingValue::from(0i64));
    values.insert("alertRetention".into(), SettingValue::from(30i64));
    values.insert("autoAcknowledge".into(), SettingValue::from(true));
    // Security
    values.insert("encryptionLevel".into(), SettingValue::from("AES-256"));
    values.insert("sessionTimeout".into(), SettingValue::from(30i64));
    values.insert("twoFactor".into(), SettingValue::from(true));
    values.insert("accessLevel".into(), SettingValue::from("operator"));
    values.insert("logLevel".into(), SettingValue::from("info"));
    values.insert("auditLog".into(), SettingValue::from(true));
    // Communications
    values.insert("primaryChannel".into(), SettingValue::from("satellite"));
    values.insert("backupChannel".into(), SettingValue::from("radio"));
    values.insert("signalThreshold".into(), SettingValue::from(70i64));
    values.insert("updateFrequency".into(), SettingValue::from(5i64));
    values.insert("retryAttempts".into(), SettingValue::from(3i64));
    values.insert("autoReconnect".into(), SettingValue::from(true));
    // System
    values.insert("systemPerformance".into(), SettingValue::from("medium"));
    values.insert("memoryLimit".into(), SettingValue::from(80i64));
    values.insert("cpuLimit".into(), SettingValue::from(85i64));
    values.insert("dataRetention".into(), SettingValue::from(90i64));
    values.insert("backupFrequency".into(), SettingValue::from("daily"));
    values.insert("autoBackup".into(), SettingValue::from(true));
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_import_roundtrip_preserves_values() {
        let mut profile = SettingsProfile::default();
        profile.set("missionName", SettingValue::from("NIGHT-WATCH"));
        profile.set("alertVolume", SettingValue::from(40i64));

        let json = profile.export_json("2025-06-01T12:00:00Z").unwrap();
        let imported = SettingsProfile::import_json(&json).unwrap();

        // Equivalent minus the exportedAt/version metadata, which never
        // lands in the profile.
        assert_eq!(imported.values(), profile.values());
    }

    #[test]
    fn malformed_import_is_invalid_format() {
        let err = SettingsProfile::import_json("{{{").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFormat(_)));

        let err = SettingsProfile::import_json(r#"{"nested": {"x": 1}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFormat(_)));
    }

    #[test]
    fn absent_key_falls_back_to_documented_default() {
        // An imported blob may carry a subset of keys.
        let profile = SettingsProfile::import_json(r#"{"missionName": "SPARROW"}"#).unwrap();
        assert_eq!(
            profile.get("missionName"),
            Some(SettingValue::from("SPARROW"))
        );
        assert_eq!(profile.get("alertVolume"), Some(SettingValue::from(75i64)));
        assert_eq!(profile.get("noSuchKey"), None);
    }

    #[test]
    fn persistence_roundtrip_through_memory_store() {
        let mut store = MemoryStore::default();
        let mut profile = SettingsProfile::default();
        profile.set("theme", SettingValue::from("light"));
        profile.save_to(&mut store).unwrap();

        let loaded = SettingsProfile::load_from(&store);
        assert_eq!(loaded, profile);
    }

    #[test]
    fn missing_storage_yields_defaults() {
        let store = MemoryStore::default();
        let profile = SettingsProfile::load_from(&store);
        assert_eq!(profile, SettingsProfile::default());
    }

    #[test]
    fn reset_drops_overrides() {
        let mut profile = SettingsProfile::default();
        profile.set("theme", SettingValue::from("light"));
        profile.reset();
        assert_eq!(profile, SettingsProfile::default());
    }
}
