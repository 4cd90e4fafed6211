use bevy::prelude::*;

use crate::{
    commands::IDLE_MISSION,
    entities::{AlertKind, AlertStatus, DroneStatus, SoldierStatus, Tracked},
    resources::SimulationTick,
    store::{AlertStore, DroneStore, SoldierStore},
};

/// Ticks are ten-second steps, matching the original refresh cadence.
pub const TICKS_PER_HOUR: u64 = 360;

/// Derived summary counters for the dashboards. Recomputed from scratch on
/// every tick; renderers read this instead of re-deriving the logic.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct OpsMetrics {
    pub tick: u64,
    pub critical_alerts: u32,
    pub warning_alerts: u32,
    pub info_alerts: u32,
    pub resolved_alerts: u32,
    pub active_drones: u32,
    pub avg_drone_battery: f64,
    pub active_missions: u32,
    pub drone_alerts: u32,
    pub active_soldiers: u32,
    pub warning_soldiers: u32,
    pub injured_soldiers: u32,
    pub avg_soldier_health: f64,
}

pub fn collect_metrics(
    tick: Res<SimulationTick>,
    alerts: Res<AlertStore>,
    drones: Res<DroneStore>,
    soldiers: Res<SoldierStore>,
    mut metrics: ResMut<OpsMetrics>,
) {
    metrics.tick = tick.0;

    metrics.critical_alerts = count_by(alerts.iter(), |a| {
        a.kind == AlertKind::Critical && a.status == AlertStatus::Active
    }) as u32;
    metrics.warning_alerts = count_by(alerts.iter(), |a| {
        a.kind == AlertKind::Warning && a.status == AlertStatus::Active
    }) as u32;
    metrics.info_alerts = count_by(alerts.iter(), |a| {
        a.kind == AlertKind::Info && a.status == AlertStatus::Active
    }) as u32;
    metrics.resolved_alerts = count_by(alerts.iter(), |a| a.status == AlertStatus::Resolved) as u32;

    metrics.active_drones = count_by(drones.iter(), |d| d.status == DroneStatus::Active) as u32;
    metrics.avg_drone_battery = average(drones.iter(), |d| f64::from(d.battery));
    metrics.active_missions = count_by(drones.iter(), |d| {
        d.mission != IDLE_MISSION && d.status != DroneStatus::Maintenance
    }) as u32;
    metrics.drone_alerts = count_by(drones.iter(), |d| {
        matches!(d.status, DroneStatus::Warning | DroneStatus::Emergency)
    }) as u32;

    metrics.active_soldiers =
        count_by(soldiers.iter(), |s| s.status == SoldierStatus::Active) as u32;
    metrics.warning_soldiers =
        count_by(soldiers.iter(), |s| s.status == SoldierStatus::Warning) as u32;
    metrics.injured_soldiers =
        count_by(soldiers.iter(), |s| s.status == SoldierStatus::Danger) as u32;
    metrics.avg_soldier_health = average(soldiers.iter(), |s| f64::from(s.health));
}

/// Count of entities matching the predicate.
pub fn count_by<'a, T: 'a, I, P>(entities: I, predicate: P) -> usize
where
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    entities.into_iter().filter(|entity| predicate(entity)).count()
}

/// Mean of the selected field; 0.0 over empty input rather than NaN.
pub fn average<'a, T: 'a, I, F>(entities: I, selector: F) -> f64
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    let mut total = 0.0;
    let mut count = 0u64;
    for entity in entities {
        total += selector(entity);
        count += 1;
    }
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// Dashboard time filters, expressed in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    LastHour,
    LastDay,
    LastWeek,
    All,
}

impl TimeWindow {
    pub fn ticks(self) -> Option<u64> {
        match self {
            TimeWindow::LastHour => Some(TICKS_PER_HOUR),
            TimeWindow::LastDay => Some(24 * TICKS_PER_HOUR),
            TimeWindow::LastWeek => Some(7 * 24 * TICKS_PER_HOUR),
            TimeWindow::All => None,
        }
    }
}

/// Entities whose timestamp lies within `[now - window, now]`. A `None`
/// window is a pass-through.
pub fn within_window<'a, T, I>(entities: I, now: u64, window: Option<u64>) -> Vec<&'a T>
where
    T: Tracked,
    I: IntoIterator<Item = &'a T>,
{
    match window {
        None => entities.into_iter().collect(),
        Some(window) => {
            let start = now.saturating_sub(window);
            entities
                .into_iter()
                .filter(|entity| {
                    let at = entity.timestamp();
                    at >= start && at <= now
                })
                .collect()
        }
    }
}
