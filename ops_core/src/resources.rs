use bevy::prelude::Resource;
use rand::{rngs::SmallRng, SeedableRng};

use crate::entities::AlertId;

/// Global configuration parameters for the headless operations simulation.
#[derive(Resource, Debug, Clone)]
pub struct SimulationConfig {
    /// Master seed; every run with the same seed produces the same snapshot
    /// stream.
    pub seed: u64,
    /// Probability that one synthetic alert is raised per tick.
    pub alert_spawn_chance: f64,
    /// Probability that a soldier's readiness state random-walks on a tick.
    pub soldier_status_chance: f64,
    /// Exclusive upper bound on per-tick drone battery drain.
    pub max_battery_drain: u8,
    /// Exclusive upper bound on per-tick soldier battery drain.
    pub max_soldier_drain: u8,
    /// A drone crossing this charge level is forced to Warning and sent
    /// back to base.
    pub battery_warning_threshold: u8,
    /// Sectors are numbered 1..=max_sector when synthesizing locations.
    pub max_sector: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x0DEF_0015,
            alert_spawn_chance: 0.3,
            soldier_status_chance: 0.1,
            max_battery_drain: 3,
            max_soldier_drain: 2,
            battery_warning_threshold: 15,
            max_sector: 10,
        }
    }
}

/// Tracks total simulation ticks elapsed.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTick(pub u64);

/// Injectable random source for the simulated mutation systems. Seeded once
/// at app construction so ticks are reproducible without wall-clock timers.
#[derive(Resource, Debug)]
pub struct SimulationRng(pub SmallRng);

impl SimulationRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed ^ 0xDEF0_0A11))
    }
}

/// Monotonic id source for synthesized alerts.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct AlertSequence(pub u64);

impl AlertSequence {
    pub fn starting_at(next: u64) -> Self {
        Self(next)
    }

    pub fn next_id(&mut self) -> AlertId {
        self.0 += 1;
        AlertId(self.0)
    }
}
