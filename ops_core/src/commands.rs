//! Explicit operator commands against the entity stores. Every fallible
//! command returns [`CommandError`] and leaves the store untouched on
//! failure; callers treat both variants as expected, recoverable outcomes.

use crate::entities::{AlertStatus, DroneStatus, Priority, SoldierStatus};
use crate::store::{AlertStore, DroneStore, SoldierStore};

pub const RETURN_MISSION: &str = "Returning to Base";
pub const EMERGENCY_MISSION: &str = "Emergency Landing";
pub const IDLE_MISSION: &str = "None";

/// Error raised when a command cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("no entity with id {0}")]
    NotFound(u64),
    #[error("cannot {action} an entity in state {from}")]
    InvalidTransition {
        action: &'static str,
        from: &'static str,
    },
}

// --- alerts: Active -> Acknowledged -> Resolved, Active -> Resolved ---

/// Legal only from `Active`.
pub fn acknowledge(store: &mut AlertStore, id: u64, now: u64) -> Result<(), CommandError> {
    let alert = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match alert.status {
        AlertStatus::Active => {
            alert.status = AlertStatus::Acknowledged;
            alert.timestamp = now;
            log::debug!("alert {} acknowledged", id);
            Ok(())
        }
        other => Err(CommandError::InvalidTransition {
            action: "acknowledge",
            from: other.label(),
        }),
    }
}

/// Legal from any non-terminal state; resolving an already resolved alert is
/// a well-defined no-op.
pub fn resolve(store: &mut AlertStore, id: u64, now: u64) -> Result<(), CommandError> {
    let alert = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match alert.status {
        AlertStatus::Active | AlertStatus::Acknowledged => {
            alert.status = AlertStatus::Resolved;
            alert.timestamp = now;
            log::debug!("alert {} resolved", id);
            Ok(())
        }
        AlertStatus::Resolved => Ok(()),
    }
}

/// Raises priority to the top of the order without touching status.
/// Saturating: escalating an already critical alert changes nothing.
pub fn escalate(store: &mut AlertStore, id: u64) -> Result<(), CommandError> {
    let alert = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    alert.priority = Priority::Critical;
    Ok(())
}

/// Acknowledges every active alert; returns how many changed state.
pub fn acknowledge_all(store: &mut AlertStore, now: u64) -> usize {
    let mut changed = 0;
    for alert in store.iter_mut() {
        if alert.status == AlertStatus::Active {
            alert.status = AlertStatus::Acknowledged;
            alert.timestamp = now;
            changed += 1;
        }
    }
    changed
}

/// Escalates every active critical-kind alert to critical priority.
pub fn escalate_critical(store: &mut AlertStore) -> usize {
    let mut changed = 0;
    for alert in store.iter_mut() {
        if alert.kind == crate::entities::AlertKind::Critical
            && alert.status == AlertStatus::Active
            && alert.priority != Priority::Critical
        {
            alert.priority = Priority::Critical;
            changed += 1;
        }
    }
    changed
}

/// Drops resolved alerts from the store; returns the count removed.
pub fn clear_resolved(store: &mut AlertStore) -> usize {
    store.remove_where(|alert| alert.status == AlertStatus::Resolved)
}

// --- drones: Active <-> Warning <-> Returning, Emergency from any flying
// state, Maintenance exits only through service ---

/// Assign a mission and put the drone on station. Grounded airframes
/// (maintenance, emergency) must be serviced first.
pub fn launch(store: &mut DroneStore, id: u64, mission: &str, now: u64) -> Result<(), CommandError> {
    let drone = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match drone.status {
        DroneStatus::Active | DroneStatus::Warning | DroneStatus::Returning => {
            drone.status = DroneStatus::Active;
            drone.mission = mission.to_string();
            drone.last_update = now;
            log::debug!("drone {} launched on {}", id, mission);
            Ok(())
        }
        other => Err(CommandError::InvalidTransition {
            action: "launch",
            from: other.label(),
        }),
    }
}

/// Order a flying drone back to base. Already-returning drones are left
/// alone.
pub fn recall(store: &mut DroneStore, id: u64, now: u64) -> Result<(), CommandError> {
    let drone = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match drone.status {
        DroneStatus::Active | DroneStatus::Warning => {
            drone.status = DroneStatus::Returning;
            drone.mission = RETURN_MISSION.to_string();
            drone.last_update = now;
            Ok(())
        }
        DroneStatus::Returning => Ok(()),
        other => Err(CommandError::InvalidTransition {
            action: "recall",
            from: other.label(),
        }),
    }
}

/// Immediate emergency landing, legal from any airborne state.
pub fn emergency_stop(store: &mut DroneStore, id: u64, now: u64) -> Result<(), CommandError> {
    let drone = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match drone.status {
        DroneStatus::Maintenance => Err(CommandError::InvalidTransition {
            action: "emergency-stop",
            from: drone.status.label(),
        }),
        DroneStatus::Emergency => Ok(()),
        _ => {
            drone.status = DroneStatus::Emergency;
            drone.mission = EMERGENCY_MISSION.to_string();
            drone.last_update = now;
            log::debug!("drone {} emergency stop", id);
            Ok(())
        }
    }
}

/// Ground service: the one place a battery may be reset. Legal only for
/// grounded airframes.
pub fn service(store: &mut DroneStore, id: u64, now: u64) -> Result<(), CommandError> {
    let drone = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match drone.status {
        DroneStatus::Maintenance | DroneStatus::Emergency => {
            drone.status = DroneStatus::Active;
            drone.battery = 100;
            drone.mission = IDLE_MISSION.to_string();
            drone.last_update = now;
            Ok(())
        }
        other => Err(CommandError::InvalidTransition {
            action: "service",
            from: other.label(),
        }),
    }
}

// --- soldiers: Active <-> Warning <-> Danger ---

pub fn flag_distress(store: &mut SoldierStore, id: u64, now: u64) -> Result<(), CommandError> {
    let soldier = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match soldier.status {
        SoldierStatus::Active | SoldierStatus::Warning => {
            soldier.status = SoldierStatus::Danger;
            soldier.last_seen = now;
            log::debug!("soldier {} flagged in distress", id);
            Ok(())
        }
        other => Err(CommandError::InvalidTransition {
            action: "flag-distress",
            from: other.label(),
        }),
    }
}

pub fn stand_down(store: &mut SoldierStore, id: u64, now: u64) -> Result<(), CommandError> {
    let soldier = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match soldier.status {
        SoldierStatus::Warning | SoldierStatus::Danger => {
            soldier.status = SoldierStatus::Active;
            soldier.last_seen = now;
            Ok(())
        }
        other => Err(CommandError::InvalidTransition {
            action: "stand-down",
            from: other.label(),
        }),
    }
}

/// Field treatment: the one place health may be reset.
pub fn treat(store: &mut SoldierStore, id: u64, now: u64) -> Result<(), CommandError> {
    let soldier = store.find_mut(id).ok_or(CommandError::NotFound(id))?;
    match soldier.status {
        SoldierStatus::Danger => {
            soldier.status = SoldierStatus::Active;
            soldier.health = 100;
            soldier.last_seen = now;
            Ok(())
        }
        other => Err(CommandError::InvalidTransition {
            action: "treat",
            from: other.label(),
        }),
    }
}
