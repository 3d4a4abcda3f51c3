use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use robot_fight::{SimConfig, SimSpeed, SimulationPlugin, SimulationState, SkipMatch, Tournament};
use std::time::Duration;

/// Builds a headless app driving a small tournament with a fixed frame time
fn headless_app(seed: u64) -> App {
    let config = SimConfig {
        population_size: 4,
        seed,
        ..SimConfig::default()
    };
    let tournament = Tournament::new(&config).expect("valid config");

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    app.insert_resource(tournament);
    app.add_plugins(SimulationPlugin);
    app
}

fn total_ticks(app: &App) -> u64 {
    app.world().resource::<Tournament>().total_ticks()
}

/// The simulation advances on its own once the clock runs
#[test]
fn test_ticks_advance_with_time() {
    let mut app = headless_app(1);

    for _ in 0..5 {
        app.update();
    }

    assert!(total_ticks(&app) > 0, "tournament should have ticked");
    assert_eq!(*app.world().resource::<SimulationState>(), SimulationState::Running);
}

/// Pausing stops the tournament entirely
#[test]
fn test_pause_stops_ticking() {
    let mut app = headless_app(2);
    app.world_mut().insert_resource(SimulationState::Paused);

    for _ in 0..5 {
        app.update();
    }

    assert_eq!(total_ticks(&app), 0);
}

/// A skip request moves on to the next attacker without recording anything
#[test]
fn test_skip_match_event() {
    let mut app = headless_app(3);
    app.world_mut().insert_resource(SimulationState::Paused);
    app.update();

    let first = app.world().resource::<Tournament>().current().attacker().id();
    app.world_mut().send_event(SkipMatch);
    app.update();

    let tournament = app.world().resource::<Tournament>();
    assert_eq!(tournament.match_number(), 2);
    assert!(tournament.records().is_empty());
    assert_ne!(tournament.current().attacker().id(), first);
}

/// Speed multiplies the ticks run per frame
#[test]
fn test_speed_scales_ticks() {
    let mut slow = headless_app(4);
    let mut fast = headless_app(4);
    fast.world_mut().insert_resource(SimSpeed(4));

    for _ in 0..6 {
        slow.update();
        fast.update();
    }

    let slow_ticks = total_ticks(&slow);
    assert!(slow_ticks > 0);
    assert_eq!(total_ticks(&fast), slow_ticks * 4);
}

/// At full speed matches complete and the tournament moves on to later attackers
#[test]
fn test_completed_matches_advance_the_round() {
    let mut app = headless_app(5);
    app.world_mut().insert_resource(SimSpeed(robot_fight::config::MAX_SIM_SPEED));

    // a match lasts at most 3600 ticks; 40 frames at 64x run about 15000
    for _ in 0..40 {
        app.update();
    }

    let tournament = app.world().resource::<Tournament>();
    assert!(tournament.total_ticks() > 2 * 3600);
    assert!(tournament.match_number() > 1 || tournament.generation().number() > 1);
}

#[test]
fn test_speed_bounds() {
    let mut speed = SimSpeed::default();
    speed.slower();
    assert_eq!(speed, SimSpeed(1));

    for _ in 0..20 {
        speed.faster();
    }
    assert_eq!(speed.0, robot_fight::config::MAX_SIM_SPEED);
}
