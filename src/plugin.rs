use crate::config::{MAX_SIM_SPEED, TICKS_PER_SECOND};
use crate::round::Tournament;
use bevy::prelude::*;
use tracing::debug;

/// Resource to control simulation state
#[derive(Resource, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SimulationState {
    Running,
    Paused,
}

impl Default for SimulationState {
    fn default() -> Self {
        SimulationState::Running
    }
}

impl SimulationState {
    pub fn toggled(self) -> Self {
        match self {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
        }
    }
}

/// Simulation ticks run per elapsed tick period.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimSpeed(pub u32);

impl Default for SimSpeed {
    fn default() -> Self {
        SimSpeed(1)
    }
}

impl SimSpeed {
    pub fn faster(&mut self) {
        self.0 = (self.0 * 2).min(MAX_SIM_SPEED);
    }

    pub fn slower(&mut self) {
        self.0 = (self.0 / 2).max(1);
    }
}

/// Timer firing once per simulation tick
#[derive(Resource)]
pub struct TickClock(pub Timer);

/// Request to abort the running match and move on to the next attacker.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct SkipMatch;

/// Drives the [`Tournament`] resource from Bevy's clock.
///
/// The tournament must be inserted before the plugin is added; its arena tick
/// rate sets the length of one tick.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let tick_rate = app
            .world()
            .get_resource::<Tournament>()
            .map(|t| t.arena().tick_rate)
            .unwrap_or(TICKS_PER_SECOND);

        app.init_resource::<SimulationState>()
            .init_resource::<SimSpeed>()
            .insert_resource(TickClock(Timer::from_seconds(
                1.0 / tick_rate as f32,
                TimerMode::Repeating,
            )))
            .add_event::<SkipMatch>()
            .add_systems(
                Update,
                (
                    apply_skips,
                    advance_tournament
                        .run_if(|state: Res<SimulationState>| *state == SimulationState::Running),
                )
                    .chain(),
            );
    }
}

/// System to abort the current match when a skip was requested this frame
pub fn apply_skips(mut skips: EventReader<SkipMatch>, mut tournament: ResMut<Tournament>) {
    if skips.read().count() > 0 {
        tournament.skip_current();
    }
}

/// System to run as many ticks as the clock allows this frame
pub fn advance_tournament(
    time: Res<Time>,
    speed: Res<SimSpeed>,
    mut clock: ResMut<TickClock>,
    mut tournament: ResMut<Tournament>,
) {
    clock.0.tick(time.delta());
    let ticks = clock.0.times_finished_this_tick() * speed.0;

    for _ in 0..ticks {
        if let Some(record) = tournament.tick() {
            debug!(
                generation = record.generation,
                match_number = record.match_number,
                robot = %record.robot,
                fitness = record.fitness,
                reason = %record.reason,
                "match recorded"
            );
        }
    }
}
