//! Core simulation crate for the defense operations dashboard.
//!
//! Owns the alert, drone, and soldier rosters, the deterministic tick
//! pipeline that mutates them, and the end-of-tick snapshot capture that
//! feeds renderers. One call to [`run_tick`] resolves one ten-second step.

mod entities;
mod resources;
mod snapshot;
mod store;
mod systems;

pub mod commands;
pub mod metrics;
pub mod settings;
pub mod sink;

use bevy::prelude::*;

pub use entities::{
    Alert, AlertId, AlertKind, AlertStatus, Drone, DroneId, DroneStatus, Equipment, Priority,
    Soldier, SoldierId, SoldierStatus, Tracked,
};
pub use metrics::{OpsMetrics, TimeWindow, TICKS_PER_HOUR};
pub use resources::{AlertSequence, SimulationConfig, SimulationRng, SimulationTick};
pub use settings::SettingsProfile;
pub use snapshot::SnapshotHistory;
pub use store::{AlertStore, DroneStore, EntityStore, SoldierStore};
pub use systems::seed_initial_rosters;

/// Construct a Bevy [`App`] configured with the operations tick pipeline
/// and the default starting picture.
pub fn build_headless_app() -> App {
    build_headless_app_with_config(SimulationConfig::default())
}

/// Same pipeline with an explicit configuration, used by tests and tools
/// that need a known seed.
pub fn build_headless_app_with_config(config: SimulationConfig) -> App {
    let mut app = App::new();

    let rng = SimulationRng::from_seed(config.seed);

    app.insert_resource(config)
        .insert_resource(SimulationTick::default())
        .insert_resource(rng)
        .insert_resource(AlertSequence::default())
        .insert_resource(AlertStore::new())
        .insert_resource(DroneStore::new())
        .insert_resource(SoldierStore::new())
        .insert_resource(OpsMetrics::default())
        .insert_resource(SnapshotHistory::default())
        .insert_resource(SettingsProfile::default())
        .add_plugins(MinimalPlugins)
        .add_systems(Startup, systems::seed_initial_rosters)
        .add_systems(
            Update,
            (
                systems::spawn_incoming_alerts,
                systems::drain_drone_batteries,
                systems::walk_soldier_status,
                systems::advance_tick,
                metrics::collect_metrics,
                snapshot::capture_snapshot,
            )
                .chain(),
        );

    app
}

/// Execute a single simulation tick.
///
/// Each call processes the chained systems configured in
/// [`build_headless_app`] (alert synthesis → drone drain → soldier walk →
/// tick increment → metrics → snapshot). Operator commands run between
/// ticks, directly against the stores.
pub fn run_tick(app: &mut App) {
    app.update();
}
