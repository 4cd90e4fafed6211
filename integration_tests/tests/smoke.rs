mod common;

use ops_core::{run_tick, AlertStore, DroneStore, SnapshotHistory, SoldierStore};

#[test]
fn app_initializes_and_seeds_rosters() {
    let mut app = common::seeded_app(1);
    // run a single tick to ensure the schedule executes without panic
    run_tick(&mut app);

    assert!(app.world.resource::<AlertStore>().len() >= 5);
    assert_eq!(app.world.resource::<DroneStore>().len(), 8);
    assert_eq!(app.world.resource::<SoldierStore>().len(), 8);
}

#[test]
fn every_tick_captures_a_snapshot() {
    let mut app = common::seeded_app(2);
    for expected_tick in 1..=5u64 {
        run_tick(&mut app);
        let history = app.world.resource::<SnapshotHistory>();
        let snapshot = history.last_snapshot.as_ref().expect("snapshot available");
        assert_eq!(snapshot.header.tick, expected_tick);
        assert!(history.encoded_snapshot.is_some());
    }
}
