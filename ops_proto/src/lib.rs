//! Wire-level state types shared between the simulation core and its
//! consumers: per-domain snapshot records, delta framing, and the versioned
//! settings export blob.

use std::collections::BTreeMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::hash::{BuildHasher, Hasher};

pub const SETTINGS_EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotHeader {
    pub tick: u64,
    pub alert_count: u32,
    pub drone_count: u32,
    pub soldier_count: u32,
    pub hash: u64,
}

impl SnapshotHeader {
    pub fn new(tick: u64, alert_count: usize, drone_count: usize, soldier_count: usize) -> Self {
        Self {
            tick,
            alert_count: alert_count as u32,
            drone_count: drone_count as u32,
            soldier_count: soldier_count as u32,
            hash: 0,
        }
    }
}

/// Alert as it appears on the wire. Enumerations travel as small integer
/// codes; the core owns the typed representations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertState {
    pub id: u64,
    pub kind: u8,
    pub status: u8,
    pub priority: u8,
    pub title: String,
    pub description: String,
    pub location: String,
    pub assigned_to: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DroneState {
    pub id: u64,
    pub callsign: String,
    pub status: u8,
    pub battery: u8,
    pub location: String,
    pub mission: String,
    pub altitude: u32,
    pub last_update: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoldierState {
    pub id: u64,
    pub name: String,
    pub rank: String,
    pub status: u8,
    pub location: String,
    pub mission: String,
    pub equipment: u16,
    pub health: u8,
    pub battery: u8,
    pub last_seen: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpsSnapshot {
    pub header: SnapshotHeader,
    pub alerts: Vec<AlertState>,
    pub drones: Vec<DroneState>,
    pub soldiers: Vec<SoldierState>,
}

/// Changed records plus removed ids since the previous capture.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpsDelta {
    pub header: SnapshotHeader,
    pub alerts: Vec<AlertState>,
    pub removed_alerts: Vec<u64>,
    pub drones: Vec<DroneState>,
    pub removed_drones: Vec<u64>,
    pub soldiers: Vec<SoldierState>,
    pub removed_soldiers: Vec<u64>,
}

impl OpsSnapshot {
    /// Stamp the header with the content hash of the finished snapshot.
    pub fn finalize(mut self) -> Self {
        let hash = hash_snapshot(&self);
        self.header.hash = hash;
        self
    }
}

pub fn hash_snapshot(snapshot: &OpsSnapshot) -> u64 {
    let mut clone = snapshot.clone();
    clone.header.hash = 0;
    let encoded = bincode::serialize(&clone).expect("snapshot serialization for hashing");
    let mut hasher = RandomState::with_seeds(0, 0, 0, 0).build_hasher();
    hasher.write(&encoded);
    hasher.finish()
}

pub fn encode_snapshot(snapshot: &OpsSnapshot) -> bincode::Result<Vec<u8>> {
    bincode::serialize(snapshot)
}

pub fn decode_snapshot(data: &[u8]) -> bincode::Result<OpsSnapshot> {
    bincode::deserialize(data)
}

pub fn encode_delta(delta: &OpsDelta) -> bincode::Result<Vec<u8>> {
    bincode::serialize(delta)
}

pub fn encode_snapshot_json(snapshot: &OpsSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

pub fn decode_snapshot_json(data: &str) -> serde_json::Result<OpsSnapshot> {
    serde_json::from_str(data)
}

/// A single persisted configuration value. Untagged so the exported JSON
/// reads as plain primitives, the way the original flat blob did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Number(value as f64)
    }
}

/// Timestamped, versioned settings blob. The value map is flattened so the
/// serialized form stays a flat key/value object with two metadata fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsExport {
    #[serde(default)]
    pub version: String,
    #[serde(rename = "exportedAt", default)]
    pub exported_at: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, SettingValue>,
}

impl SettingsExport {
    pub fn new(exported_at: String, values: BTreeMap<String, SettingValue>) -> Self {
        Self {
            version: SETTINGS_EXPORT_VERSION.to_string(),
            exported_at,
            values,
        }
    }
}

pub fn encode_settings_export(export: &SettingsExport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(export)
}

pub fn decode_settings_export(data: &str) -> serde_json::Result<SettingsExport> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> OpsSnapshot {
        OpsSnapshot {
            header: SnapshotHeader::new(7, 1, 0, 0),
            alerts: vec![AlertState {
                id: 1,
                kind: 0,
                status: 0,
                priority: 2,
                title: "Intruder detected at Border Sector-7".to_string(),
                description: "Automated detection by AI surveillance system.".to_string(),
                location: "Sector-7".to_string(),
                assigned_to: "Drone Alpha-1".to_string(),
                timestamp: 7,
            }],
            drones: Vec::new(),
            soldiers: Vec::new(),
        }
    }

    #[test]
    fn snapshot_roundtrips_through_bincode() {
        let snapshot = sample_snapshot().finalize();
        let bytes = encode_snapshot(&snapshot).unwrap();
        let decoded = decode_snapshot(&bytes).unwrap();
        assert_eq!(decoded.header.hash, snapshot.header.hash);
        assert_eq!(decoded.alerts, snapshot.alerts);
    }

    #[test]
    fn hash_ignores_existing_header_hash() {
        let snapshot = sample_snapshot();
        let finalized = snapshot.clone().finalize();
        assert_eq!(hash_snapshot(&snapshot), finalized.header.hash);
        // Hashing an already finalized snapshot must not feed back on itself.
        assert_eq!(hash_snapshot(&finalized), finalized.header.hash);
    }

    #[test]
    fn settings_export_flattens_values() {
        let mut values = BTreeMap::new();
        values.insert("missionName".to_string(), SettingValue::from("DEF-OPS-2025"));
        values.insert("alertVolume".to_string(), SettingValue::from(75i64));
        values.insert("autoRefresh".to_string(), SettingValue::from(true));
        let export = SettingsExport::new("2025-01-01T00:00:00Z".to_string(), values);

        let json = encode_settings_export(&export).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["missionName"], "DEF-OPS-2025");
        assert_eq!(parsed["autoRefresh"], true);
        assert_eq!(parsed["version"], SETTINGS_EXPORT_VERSION);

        let decoded = decode_settings_export(&json).unwrap();
        assert_eq!(decoded.values, export.values);
    }

    #[test]
    fn malformed_settings_blob_is_rejected() {
        assert!(decode_settings_export("not json at all").is_err());
        // Nested objects are not valid primitive settings values.
        assert!(decode_settings_export(r#"{"drone": {"battery": 5}}"#).is_err());
    }
}
