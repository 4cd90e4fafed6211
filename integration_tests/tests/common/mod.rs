use bevy::prelude::App;
use ops_core::{build_headless_app_with_config, SimulationConfig};

/// App with a fixed seed so runs are reproducible across test invocations.
pub fn seeded_app(seed: u64) -> App {
    build_headless_app_with_config(SimulationConfig {
        seed,
        ..SimulationConfig::default()
    })
}
