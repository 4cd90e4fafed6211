use std::io::BufRead;
use std::thread;

use tracing::{info, warn};

use ops_core::sink::{broadcast_latest, ChannelSink, RenderSink};
use ops_core::{
    build_headless_app, commands, run_tick, AlertStore, DroneStore, OpsMetrics, SettingsProfile,
    SimulationTick, SnapshotHistory, SoldierStore,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut app = build_headless_app();

    let (sink, frames) = ChannelSink::new();
    thread::spawn(move || {
        for frame in frames {
            info!(
                target: "ops_core::frames",
                tick = frame.snapshot.header.tick,
                hash = frame.snapshot.header.hash,
                alerts = frame.snapshot.header.alert_count,
                "frame.presented"
            );
        }
    });

    info!("operations console ready, commands on stdin");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("stdin read error: {}", err);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_command(trimmed) {
            Some(Command::Quit) => break,
            Some(command) => dispatch(&mut app, &sink, command),
            None => warn!("Invalid command: {}", trimmed),
        }
    }
}

#[derive(Debug)]
enum Command {
    Tick(u32),
    Ack(u64),
    AckAll,
    Resolve(u64),
    Escalate(u64),
    EscalateCritical,
    ClearResolved,
    Launch { id: u64, mission: String },
    Recall(u64),
    EmergencyStop(u64),
    Service(u64),
    Distress(u64),
    StandDown(u64),
    Treat(u64),
    Metrics,
    Snapshot,
    ExportSettings,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.split_whitespace();
    match parts.next()? {
        "tick" => {
            let amount = parts.next().unwrap_or("1").parse().ok()?;
            Some(Command::Tick(amount))
        }
        "ack" => match parts.next()? {
            "all" => Some(Command::AckAll),
            id => Some(Command::Ack(id.parse().ok()?)),
        },
        "resolve" => Some(Command::Resolve(parts.next()?.parse().ok()?)),
        "escalate" => match parts.next()? {
            "critical" => Some(Command::EscalateCritical),
            id => Some(Command::Escalate(id.parse().ok()?)),
        },
        "clear" => Some(Command::ClearResolved),
        "launch" => {
            let id = parts.next()?.parse().ok()?;
            let mission = parts.collect::<Vec<_>>().join(" ");
            let mission = if mission.is_empty() {
                "Patrol".to_string()
            } else {
                mission
            };
            Some(Command::Launch { id, mission })
        }
        "recall" => Some(Command::Recall(parts.next()?.parse().ok()?)),
        "estop" => Some(Command::EmergencyStop(parts.next()?.parse().ok()?)),
        "service" => Some(Command::Service(parts.next()?.parse().ok()?)),
        "distress" => Some(Command::Distress(parts.next()?.parse().ok()?)),
        "standdown" => Some(Command::StandDown(parts.next()?.parse().ok()?)),
        "treat" => Some(Command::Treat(parts.next()?.parse().ok()?)),
        "metrics" => Some(Command::Metrics),
        "snapshot" => Some(Command::Snapshot),
        "export" => Some(Command::ExportSettings),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn dispatch(app: &mut bevy::prelude::App, sink: &dyn RenderSink, command: Command) {
    let now = app.world.resource::<SimulationTick>().0;
    match command {
        Command::Tick(count) => {
            for _ in 0..count {
                run_tick(app);
                broadcast_latest(app, sink);
            }
            let metrics = app.world.resource::<OpsMetrics>();
            info!(
                target: "ops_core::console",
                tick = metrics.tick,
                critical = metrics.critical_alerts,
                active_drones = metrics.active_drones,
                "tick.completed"
            );
        }
        Command::Ack(id) => {
            let mut alerts = app.world.resource_mut::<AlertStore>();
            report("ack", commands::acknowledge(&mut alerts, id, now));
        }
        Command::AckAll => {
            let mut alerts = app.world.resource_mut::<AlertStore>();
            let changed = commands::acknowledge_all(&mut alerts, now);
            info!(target: "ops_core::console", changed, "ack_all.completed");
        }
        Command::Resolve(id) => {
            let mut alerts = app.world.resource_mut::<AlertStore>();
            report("resolve", commands::resolve(&mut alerts, id, now));
        }
        Command::Escalate(id) => {
            let mut alerts = app.world.resource_mut::<AlertStore>();
            report("escalate", commands::escalate(&mut alerts, id));
        }
        Command::EscalateCritical => {
            let mut alerts = app.world.resource_mut::<AlertStore>();
            let changed = commands::escalate_critical(&mut alerts);
            info!(target: "ops_core::console", changed, "escalate_critical.completed");
        }
        Command::ClearResolved => {
            let mut alerts = app.world.resource_mut::<AlertStore>();
            let removed = commands::clear_resolved(&mut alerts);
            info!(target: "ops_core::console", removed, "clear_resolved.completed");
        }
        Command::Launch { id, mission } => {
            let mut drones = app.world.resource_mut::<DroneStore>();
            report("launch", commands::launch(&mut drones, id, &mission, now));
        }
        Command::Recall(id) => {
            let mut drones = app.world.resource_mut::<DroneStore>();
            report("recall", commands::recall(&mut drones, id, now));
        }
        Command::EmergencyStop(id) => {
            let mut drones = app.world.resource_mut::<DroneStore>();
            report("estop", commands::emergency_stop(&mut drones, id, now));
        }
        Command::Service(id) => {
            let mut drones = app.world.resource_mut::<DroneStore>();
            report("service", commands::service(&mut drones, id, now));
        }
        Command::Distress(id) => {
            let mut soldiers = app.world.resource_mut::<SoldierStore>();
            report("distress", commands::flag_distress(&mut soldiers, id, now));
        }
        Command::StandDown(id) => {
            let mut soldiers = app.world.resource_mut::<SoldierStore>();
            report("standdown", commands::stand_down(&mut soldiers, id, now));
        }
        Command::Treat(id) => {
            let mut soldiers = app.world.resource_mut::<SoldierStore>();
            report("treat", commands::treat(&mut soldiers, id, now));
        }
        Command::Metrics => {
            let metrics = app.world.resource::<OpsMetrics>();
            info!(
                target: "ops_core::console",
                tick = metrics.tick,
                critical = metrics.critical_alerts,
                warning = metrics.warning_alerts,
                info_alerts = metrics.info_alerts,
                resolved = metrics.resolved_alerts,
                active_drones = metrics.active_drones,
                avg_drone_battery = metrics.avg_drone_battery,
                active_soldiers = metrics.active_soldiers,
                injured = metrics.injured_soldiers,
                avg_soldier_health = metrics.avg_soldier_health,
                "metrics"
            );
        }
        Command::Snapshot => {
            let history = app.world.resource::<SnapshotHistory>();
            match history.last_snapshot.as_ref() {
                Some(snapshot) => match ops_proto::encode_snapshot_json(snapshot) {
                    Ok(json) => println!("{}", json),
                    Err(err) => warn!("snapshot encode failed: {}", err),
                },
                None => warn!("no snapshot captured yet, run a tick first"),
            }
        }
        Command::ExportSettings => {
            let profile = app.world.resource::<SettingsProfile>();
            let exported_at = format!("tick-{}", now);
            match profile.export_json(&exported_at) {
                Ok(json) => println!("{}", json),
                Err(err) => warn!("settings export failed: {}", err),
            }
        }
        Command::Quit => {}
    }
}

fn report(action: &str, result: Result<(), commands::CommandError>) {
    match result {
        Ok(()) => info!(target: "ops_core::console", action, "command.applied"),
        Err(err) => warn!(target: "ops_core::console", action, %err, "command.rejected"),
    }
}
