use bevy::prelude::*;
use rand::Rng;

use crate::{
    commands::{EMERGENCY_MISSION, IDLE_MISSION, RETURN_MISSION},
    entities::{
        Alert, AlertId, AlertKind, AlertStatus, Drone, DroneId, DroneStatus, Equipment, Priority,
        Soldier, SoldierId, SoldierStatus,
    },
    resources::{AlertSequence, SimulationConfig, SimulationRng, SimulationTick},
    store::{AlertStore, DroneStore, SoldierStore},
};

const ALERT_KINDS: [AlertKind; 3] = [AlertKind::Critical, AlertKind::Warning, AlertKind::Info];

const SOLDIER_WALK: [SoldierStatus; 3] = [
    SoldierStatus::Active,
    SoldierStatus::Warning,
    SoldierStatus::Danger,
];

const ALERT_TITLES: [&str; 10] = [
    "Intruder detected at Border Sector-7",
    "Suspicious boat spotted at Coastline",
    "Hostile UAV approaching Airbase",
    "Unauthorized vehicle at Checkpoint Alpha",
    "Suspicious activity at Perimeter Fence",
    "Unknown aircraft in restricted airspace",
    "Movement detected in restricted zone",
    "Anomaly detected in thermal imaging",
    "Communication interference detected",
    "Drone battery low - returning to base",
];

const SYNTHETIC_DESCRIPTION: &str = "Automated detection by AI surveillance system.";

/// Seed the three rosters with the fixed starting picture. Alert seed
/// timestamps encode relative age (higher = more recent) so the default
/// reverse-chronological listing matches the original ordering.
pub fn seed_initial_rosters(
    mut alerts: ResMut<AlertStore>,
    mut drones: ResMut<DroneStore>,
    mut soldiers: ResMut<SoldierStore>,
    mut sequence: ResMut<AlertSequence>,
) {
    for alert in seed_alerts() {
        alerts.upsert(alert);
    }
    for drone in seed_drones() {
        drones.upsert(drone);
    }
    for soldier in seed_soldiers() {
        soldiers.upsert(soldier);
    }
    // Synthesized alert ids continue after the seeded ones.
    *sequence = AlertSequence::starting_at(alerts.len() as u64);
    log::debug!(
        "seeded {} alerts, {} drones, {} soldiers",
        alerts.len(),
        drones.len(),
        soldiers.len()
    );
}

/// With configured probability, synthesize one new alert from the fixed
/// vocabulary and insert it with the current tick as its timestamp.
pub fn spawn_incoming_alerts(
    config: Res<SimulationConfig>,
    tick: Res<SimulationTick>,
    mut rng: ResMut<SimulationRng>,
    mut sequence: ResMut<AlertSequence>,
    mut alerts: ResMut<AlertStore>,
) {
    let rng = &mut rng.0;
    if !rng.gen_bool(config.alert_spawn_chance) {
        return;
    }

    let kind = ALERT_KINDS[rng.gen_range(0..ALERT_KINDS.len())];
    let title = ALERT_TITLES[rng.gen_range(0..ALERT_TITLES.len())];
    let location = format!("Sector-{}", rng.gen_range(1..=config.max_sector));
    let wing = (b'A' + rng.gen_range(0..8u8)) as char;
    let assigned_to = format!("Drone {}-{}", wing, rng.gen_range(1..=8u8));
    let priority = if kind == AlertKind::Critical {
        Priority::Critical
    } else {
        Priority::Medium
    };

    let alert = Alert {
        id: sequence.next_id(),
        kind,
        status: AlertStatus::Active,
        priority,
        title: title.to_string(),
        description: SYNTHETIC_DESCRIPTION.to_string(),
        location,
        assigned_to,
        timestamp: tick.0,
    };
    log::debug!("tick {}: raised alert {} \"{}\"", tick.0, alert.id, title);
    alerts.upsert(alert);
}

/// Drain active drone batteries by a bounded random amount. Crossing the
/// warning threshold forces the low-power transition as a side effect.
pub fn drain_drone_batteries(
    config: Res<SimulationConfig>,
    tick: Res<SimulationTick>,
    mut rng: ResMut<SimulationRng>,
    mut drones: ResMut<DroneStore>,
) {
    let rng = &mut rng.0;
    for drone in drones.iter_mut() {
        if drone.status != DroneStatus::Active || drone.battery == 0 {
            continue;
        }
        let drain = rng.gen_range(0..config.max_battery_drain);
        if drain == 0 {
            continue;
        }
        drone.battery = drone.battery.saturating_sub(drain);
        drone.last_update = tick.0;
        if drone.battery <= config.battery_warning_threshold {
            drone.status = DroneStatus::Warning;
            drone.mission = RETURN_MISSION.to_string();
            log::debug!(
                "tick {}: drone {} low battery ({}%), returning to base",
                tick.0,
                drone.id,
                drone.battery
            );
        }
    }
}

/// Random-walk soldier readiness and drain wearable batteries.
pub fn walk_soldier_status(
    config: Res<SimulationConfig>,
    tick: Res<SimulationTick>,
    mut rng: ResMut<SimulationRng>,
    mut soldiers: ResMut<SoldierStore>,
) {
    let rng = &mut rng.0;
    for soldier in soldiers.iter_mut() {
        if rng.gen_bool(config.soldier_status_chance) {
            let next = SOLDIER_WALK[rng.gen_range(0..SOLDIER_WALK.len())];
            if next != soldier.status {
                soldier.status = next;
                soldier.last_seen = tick.0;
            }
        }

        // Wearable drain has no status side effect; readiness moves only
        // through the random walk or an explicit command.
        let drain = rng.gen_range(0..config.max_soldier_drain);
        soldier.battery = soldier.battery.saturating_sub(drain);
    }
}

pub fn advance_tick(mut tick: ResMut<SimulationTick>) {
    tick.0 = tick.0.wrapping_add(1);
}

fn seed_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: AlertId(1),
            kind: AlertKind::Critical,
            status: AlertStatus::Active,
            priority: Priority::High,
            title: "Intruder detected at Border Sector-7".to_string(),
            description: "Two unidentified persons detected crossing the border fence. \
                          Night vision equipment confirmed."
                .to_string(),
            location: "Sector-7".to_string(),
            assigned_to: "Drone Alpha-1".to_string(),
            timestamp: 2,
        },
        Alert {
            id: AlertId(2),
            kind: AlertKind::Warning,
            status: AlertStatus::Acknowledged,
            priority: Priority::Medium,
            title: "Suspicious boat spotted at Coastline".to_string(),
            description: "Unidentified vessel approaching restricted waters. \
                          No response to radio hails."
                .to_string(),
            location: "Coastline Watch".to_string(),
            assigned_to: "Drone Beta-2".to_string(),
            timestamp: 0,
        },
        Alert {
            id: AlertId(3),
            kind: AlertKind::Info,
            status: AlertStatus::Resolved,
            priority: Priority::Low,
            title: "Drone battery low - returning to base".to_string(),
            description: "Drone Gamma-3 battery level below 20%. \
                          Initiating return to base protocol."
                .to_string(),
            location: "Sector-3".to_string(),
            assigned_to: "Drone Gamma-3".to_string(),
            timestamp: 3,
        },
        Alert {
            id: AlertId(4),
            kind: AlertKind::Critical,
            status: AlertStatus::Active,
            priority: Priority::Critical,
            title: "Hostile UAV approaching Airbase".to_string(),
            description: "Unknown UAV detected on collision course with military airbase. \
                          Immediate action required."
                .to_string(),
            location: "Airbase Perimeter".to_string(),
            assigned_to: "Drone Delta-4".to_string(),
            timestamp: 4,
        },
        Alert {
            id: AlertId(5),
            kind: AlertKind::Warning,
            status: AlertStatus::Active,
            priority: Priority::Medium,
            title: "Movement detected in restricted zone".to_string(),
            description: "Thermal imaging detected movement in Sector-5 restricted area. \
                          Investigation required."
                .to_string(),
            location: "Sector-5".to_string(),
            assigned_to: "Drone Echo-5".to_string(),
            timestamp: 1,
        },
    ]
}

fn seed_drones() -> Vec<Drone> {
    let roster = [
        (1, "Alpha-1", DroneStatus::Active, 87, "Sector-7", "Patrol", 1250),
        (
            2,
            "Beta-2",
            DroneStatus::Warning,
            25,
            "Checkpoint Alpha",
            "Surveillance",
            800,
        ),
        (
            3,
            "Gamma-3",
            DroneStatus::Active,
            92,
            "Perimeter Fence",
            "Search & Rescue",
            1500,
        ),
        (
            4,
            "Delta-4",
            DroneStatus::Maintenance,
            0,
            "Base Station",
            IDLE_MISSION,
            0,
        ),
        (
            5,
            "Echo-5",
            DroneStatus::Active,
            78,
            "Coastline Watch",
            "Threat Assessment",
            1100,
        ),
        (
            6,
            "Foxtrot-6",
            DroneStatus::Returning,
            15,
            "Sector-3",
            RETURN_MISSION,
            600,
        ),
        (
            7,
            "Golf-7",
            DroneStatus::Active,
            95,
            "Airbase Perimeter",
            "Patrol",
            2000,
        ),
        (
            8,
            "Hotel-8",
            DroneStatus::Emergency,
            5,
            "Sector-9",
            EMERGENCY_MISSION,
            200,
        ),
    ];
    roster
        .into_iter()
        .map(
            |(id, callsign, status, battery, location, mission, altitude)| Drone {
                id: DroneId(id),
                callsign: callsign.to_string(),
                status,
                battery,
                location: location.to_string(),
                mission: mission.to_string(),
                altitude,
                last_update: 0,
            },
        )
        .collect()
}

fn seed_soldiers() -> Vec<Soldier> {
    let roster = [
        (
            1,
            "Sgt. John Mitchell",
            "Sergeant",
            SoldierStatus::Active,
            "Sector-7",
            "Patrol",
            Equipment::RIFLE | Equipment::RADIO | Equipment::NIGHT_VISION,
            100,
            85,
        ),
        (
            2,
            "Cpl. Sarah Chen",
            "Corporal",
            SoldierStatus::Warning,
            "Checkpoint Alpha",
            "Guard Duty",
            Equipment::RIFLE | Equipment::RADIO | Equipment::MEDICAL_KIT,
            75,
            60,
        ),
        (
            3,
            "Pvt. Mike Rodriguez",
            "Private",
            SoldierStatus::Danger,
            "Perimeter Fence",
            "Emergency",
            Equipment::RIFLE | Equipment::RADIO,
            45,
            20,
        ),
        (
            4,
            "Lt. Emma Thompson",
            "Lieutenant",
            SoldierStatus::Active,
            "Command Center",
            "Command",
            Equipment::PISTOL | Equipment::RADIO | Equipment::TABLET,
            100,
            95,
        ),
        (
            5,
            "Sgt. David Park",
            "Sergeant",
            SoldierStatus::Warning,
            "Coastline Watch",
            "Surveillance",
            Equipment::RIFLE | Equipment::RADIO | Equipment::BINOCULARS,
            80,
            70,
        ),
        (
            6,
            "Cpl. Lisa Johnson",
            "Corporal",
            SoldierStatus::Active,
            "Sector-3",
            "Patrol",
            Equipment::RIFLE | Equipment::RADIO | Equipment::GRENADES,
            95,
            80,
        ),
        (
            7,
            "Pvt. Alex Kumar",
            "Private",
            SoldierStatus::Active,
            "Sector-9",
            "Patrol",
            Equipment::RIFLE | Equipment::RADIO | Equipment::FLASHLIGHT,
            90,
            75,
        ),
        (
            8,
            "Sgt. Maria Garcia",
            "Sergeant",
            SoldierStatus::Active,
            "Airbase Perimeter",
            "Guard Duty",
            Equipment::RIFLE | Equipment::RADIO | Equipment::NIGHT_VISION,
            100,
            90,
        ),
    ];
    roster
        .into_iter()
        .map(
            |(id, name, rank, status, location, mission, equipment, health, battery)| Soldier {
                id: SoldierId(id),
                name: name.to_string(),
                rank: rank.to_string(),
                status,
                location: location.to_string(),
                mission: mission.to_string(),
                equipment,
                health,
                battery,
                last_seen: 0,
            },
        )
        .collect()
}
