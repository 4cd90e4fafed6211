use std::collections::HashMap;

use bevy::prelude::*;
use ops_proto::{
    encode_snapshot, AlertState, DroneState, OpsDelta, OpsSnapshot, SnapshotHeader, SoldierState,
};

use crate::{
    entities::{Alert, Drone, Soldier, Tracked},
    resources::SimulationTick,
    store::{AlertStore, DroneStore, SoldierStore},
};

/// Latest capture plus the per-id indexes needed to diff the next one.
#[derive(Resource, Default)]
pub struct SnapshotHistory {
    pub last_snapshot: Option<OpsSnapshot>,
    pub last_delta: Option<OpsDelta>,
    pub encoded_snapshot: Option<Vec<u8>>,
    alerts: HashMap<u64, AlertState>,
    drones: HashMap<u64, DroneState>,
    soldiers: HashMap<u64, SoldierState>,
}

/// Capture the full world state at the end of a tick. Records are ordered by
/// id so identical store contents always hash identically.
pub fn capture_snapshot(
    tick: Res<SimulationTick>,
    alerts: Res<AlertStore>,
    drones: Res<DroneStore>,
    soldiers: Res<SoldierStore>,
    mut history: ResMut<SnapshotHistory>,
) {
    let mut alert_states: Vec<AlertState> = alerts.iter().map(alert_state).collect();
    alert_states.sort_unstable_by_key(|state| state.id);

    let mut drone_states: Vec<DroneState> = drones.iter().map(drone_state).collect();
    drone_states.sort_unstable_by_key(|state| state.id);

    let mut soldier_states: Vec<SoldierState> = soldiers.iter().map(soldier_state).collect();
    soldier_states.sort_unstable_by_key(|state| state.id);

    let header = SnapshotHeader::new(
        tick.0,
        alert_states.len(),
        drone_states.len(),
        soldier_states.len(),
    );

    let snapshot = OpsSnapshot {
        header,
        alerts: alert_states,
        drones: drone_states,
        soldiers: soldier_states,
    }
    .finalize();

    history.update(snapshot);
}

impl SnapshotHistory {
    fn update(&mut self, snapshot: OpsSnapshot) -> OpsDelta {
        let mut alert_index = HashMap::with_capacity(snapshot.alerts.len());
        for state in &snapshot.alerts {
            alert_index.insert(state.id, state.clone());
        }

        let mut drone_index = HashMap::with_capacity(snapshot.drones.len());
        for state in &snapshot.drones {
            drone_index.insert(state.id, state.clone());
        }

        let mut soldier_index = HashMap::with_capacity(snapshot.soldiers.len());
        for state in &snapshot.soldiers {
            soldier_index.insert(state.id, state.clone());
        }

        let delta = OpsDelta {
            header: snapshot.header.clone(),
            alerts: diff_new(&self.alerts, &alert_index),
            removed_alerts: diff_removed(&self.alerts, &alert_index),
            drones: diff_new(&self.drones, &drone_index),
            removed_drones: diff_removed(&self.drones, &drone_index),
            soldiers: diff_new(&self.soldiers, &soldier_index),
            removed_soldiers: diff_removed(&self.soldiers, &soldier_index),
        };

        self.encoded_snapshot =
            Some(encode_snapshot(&snapshot).expect("snapshot serialization failed"));
        self.alerts = alert_index;
        self.drones = drone_index;
        self.soldiers = soldier_index;
        self.last_snapshot = Some(snapshot);
        self.last_delta = Some(delta.clone());
        delta
    }
}

fn diff_new<T>(previous: &HashMap<u64, T>, current: &HashMap<u64, T>) -> Vec<T>
where
    T: Clone + PartialEq,
{
    let mut changed: Vec<(u64, T)> = current
        .iter()
        .filter_map(|(id, state)| match previous.get(id) {
            Some(prev) if prev == state => None,
            _ => Some((*id, state.clone())),
        })
        .collect();
    changed.sort_unstable_by_key(|(id, _)| *id);
    changed.into_iter().map(|(_, state)| state).collect()
}

fn diff_removed<T>(previous: &HashMap<u64, T>, current: &HashMap<u64, T>) -> Vec<u64> {
    let mut removed: Vec<u64> = previous
        .keys()
        .filter(|id| !current.contains_key(id))
        .copied()
        .collect();
    removed.sort_unstable();
    removed
}

fn alert_state(alert: &Alert) -> AlertState {
    AlertState {
        id: alert.id_key(),
        kind: alert.kind.into(),
        status: alert.status.into(),
        priority: alert.priority.into(),
        title: alert.title.clone(),
        description: alert.description.clone(),
        location: alert.location.clone(),
        assigned_to: alert.assigned_to.clone(),
        timestamp: alert.timestamp,
    }
}

fn drone_state(drone: &Drone) -> DroneState {
    DroneState {
        id: drone.id_key(),
        callsign: drone.callsign.clone(),
        status: drone.status.into(),
        battery: drone.battery,
        location: drone.location.clone(),
        mission: drone.mission.clone(),
        altitude: drone.altitude,
        last_update: drone.last_update,
    }
}

fn soldier_state(soldier: &Soldier) -> SoldierState {
    SoldierState {
        id: soldier.id_key(),
        name: soldier.name.clone(),
        rank: soldier.rank.clone(),
        status: soldier.status.into(),
        location: soldier.location.clone(),
        mission: soldier.mission.clone(),
        equipment: soldier.equipment.bits(),
        health: soldier.health,
        battery: soldier.battery,
        last_seen: soldier.last_seen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AlertId, AlertKind, AlertStatus, Priority};
    use bevy::prelude::World;
    use bevy_ecs::system::RunSystemOnce;

    fn alert(id: u64, timestamp: u64) -> Alert {
        Alert {
            id: AlertId(id),
            kind: AlertKind::Warning,
            status: AlertStatus::Active,
            priority: Priority::Medium,
            title: format!("alert {id}"),
            description: String::new(),
            location: "Sector-2".to_string(),
            assigned_to: "Drone Beta-2".to_string(),
            timestamp,
        }
    }

    fn capture_world() -> World {
        let mut world = World::new();
        world.insert_resource(SimulationTick::default());
        world.insert_resource(AlertStore::new());
        world.insert_resource(DroneStore::new());
        world.insert_resource(SoldierStore::new());
        world.insert_resource(SnapshotHistory::default());
        world
    }

    #[test]
    fn delta_tracks_changes_and_removals() {
        let mut world = capture_world();
        world.resource_mut::<AlertStore>().upsert(alert(1, 1));
        world.resource_mut::<AlertStore>().upsert(alert(2, 2));
        world.run_system_once(capture_snapshot);

        // First capture reports everything as new.
        {
            let history = world.resource::<SnapshotHistory>();
            let delta = history.last_delta.as_ref().unwrap();
            assert_eq!(delta.alerts.len(), 2);
            assert!(delta.removed_alerts.is_empty());
        }

        {
            let mut alerts = world.resource_mut::<AlertStore>();
            let mut changed = alert(1, 9);
            changed.status = AlertStatus::Resolved;
            alerts.upsert(changed);
            alerts.remove_where(|a| a.id == AlertId(2));
        }
        world.run_system_once(capture_snapshot);

        let history = world.resource::<SnapshotHistory>();
        let delta = history.last_delta.as_ref().unwrap();
        assert_eq!(delta.alerts.len(), 1);
        assert_eq!(delta.alerts[0].id, 1);
        assert_eq!(delta.removed_alerts, vec![2]);
    }

    #[test]
    fn unchanged_stores_hash_identically() {
        let mut world = capture_world();
        world.resource_mut::<AlertStore>().upsert(alert(1, 1));
        world.run_system_once(capture_snapshot);
        let first = world
            .resource::<SnapshotHistory>()
            .last_snapshot
            .as_ref()
            .unwrap()
            .header
            .hash;

        world.run_system_once(capture_snapshot);
        let second = world
            .resource::<SnapshotHistory>()
            .last_snapshot
            .as_ref()
            .unwrap()
            .header
            .hash;
        assert_eq!(first, second);
        let delta = world.resource::<SnapshotHistory>().last_delta.clone().unwrap();
        assert!(delta.alerts.is_empty());
    }
}
