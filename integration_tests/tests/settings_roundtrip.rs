mod common;

use anyhow::Result;
use ops_core::settings::{MemoryStore, SettingsError};
use ops_core::SettingsProfile;
use ops_proto::{SettingValue, SETTINGS_EXPORT_VERSION};

#[test]
fn app_profile_exports_and_reimports() -> Result<()> {
    let mut app = common::seeded_app(9);
    {
        let mut profile = app.world.resource_mut::<SettingsProfile>();
        profile.set("missionName", SettingValue::from("NIGHT-WATCH"));
        profile.set("autoRefresh", SettingValue::from(false));
    }

    let json = app
        .world
        .resource::<SettingsProfile>()
        .export_json("2025-06-01T12:00:00Z")?;

    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(parsed["version"], SETTINGS_EXPORT_VERSION);
    assert_eq!(parsed["exportedAt"], "2025-06-01T12:00:00Z");
    assert_eq!(parsed["missionName"], "NIGHT-WATCH");

    let imported = SettingsProfile::import_json(&json)?;
    assert_eq!(imported.values(), app.world.resource::<SettingsProfile>().values());
    Ok(())
}

#[test]
fn malformed_import_leaves_profile_untouched() {
    let app = common::seeded_app(10);
    let before = app.world.resource::<SettingsProfile>().clone();

    let err = SettingsProfile::import_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, SettingsError::InvalidFormat(_)));
    assert_eq!(*app.world.resource::<SettingsProfile>(), before);
}

#[test]
fn persisted_profile_survives_reload() -> Result<()> {
    let mut store = MemoryStore::default();
    let mut profile = SettingsProfile::default();
    profile.set("alertVolume", SettingValue::from(40i64));
    profile.save_to(&mut store)?;

    let reloaded = SettingsProfile::load_from(&store);
    assert_eq!(reloaded, profile);
    Ok(())
}
