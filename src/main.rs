mod camera;
mod render;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use camera::{fit_camera, setup_camera};
use render::{draw_match, spawn_floor};
use robot_fight::config::*;
use robot_fight::{Gene, SimSpeed, SimulationPlugin, SimulationState, SkipMatch, Tournament};

fn main() -> AppExit {
    let mut config = SimConfig {
        ledger_path: Some(LEDGER_FILE.into()),
        ..default()
    };
    if let Some(seed) = std::env::var(SEED_ENV).ok().and_then(|s| s.parse().ok()) {
        config.seed = seed;
    }

    let tournament = match Tournament::new(&config) {
        Ok(tournament) => tournament,
        Err(err) => {
            eprintln!("robot-fight: {err}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Robot Fight".to_string(),
                resolution: (config.arena.width, config.arena.height).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(tournament)
        .add_plugins(SimulationPlugin)
        .add_systems(Startup, (setup_camera, spawn_floor))
        .add_systems(Update, (keyboard_controls, fit_camera, draw_match, ui_system))
        .run()
}

/// Space pauses, S skips the running match, Up/Down change speed
fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<SimulationState>,
    mut speed: ResMut<SimSpeed>,
    mut skips: EventWriter<SkipMatch>,
) {
    if keys.just_pressed(KeyCode::Space) {
        *state = state.toggled();
    }
    if keys.just_pressed(KeyCode::KeyS) {
        skips.send(SkipMatch);
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        speed.faster();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        speed.slower();
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    tournament: Res<Tournament>,
    mut simulation_state: ResMut<SimulationState>,
    mut speed: ResMut<SimSpeed>,
    mut skips: EventWriter<SkipMatch>,
) {
    let current = tournament.current();
    let attacker = current.attacker();
    let defender = current.defender();
    let arena = tournament.arena();

    egui::Window::new("Robot Fight")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                let button_text = if *simulation_state == SimulationState::Running {
                    "⏸ Pause"
                } else {
                    "▶ Resume"
                };
                if ui.button(button_text).clicked() {
                    *simulation_state = simulation_state.toggled();
                }
                if ui.button("⏭ Skip").clicked() {
                    skips.send(SkipMatch);
                }
            });

            ui.horizontal(|ui| {
                if ui.button("−").clicked() {
                    speed.slower();
                }
                ui.label(format!("Speed: {}x", speed.0));
                if ui.button("+").clicked() {
                    speed.faster();
                }
            });

            ui.separator();
            ui.heading("Match");
            ui.separator();

            ui.label(format!(
                "Generation {} | Match {} / {}",
                tournament.generation().number(),
                tournament.match_number(),
                tournament.generation().len()
            ));
            ui.label(format!(
                "Time: {:.1}s / {:.0}s",
                arena.ticks_to_seconds(current.elapsed()),
                arena.ticks_to_seconds(arena.max_ticks())
            ));
            ui.label(format!("Robot #{}  phase {}", attacker.id(), attacker.phase() + 1));
            ui.label(format!("Attacker HP: {} / {}", attacker.hp(), attacker.max_hp()));
            ui.label(format!("Defender HP: {} / {}", defender.hp(), defender.max_hp()));
            ui.label(format!("Fitness: {}", attacker.fitness()));
            if let Some((left, right)) = attacker.parents() {
                ui.label(format!("Parents: #{} × #{}", left, right));
            }

            ui.separator();
            ui.label("Genome:");
            for gene in Gene::ALL {
                ui.monospace(format!("  {:<12} {:>4}", gene.name(), attacker.genome().get(gene)));
            }

            if let Some(summary) = tournament.last_summary() {
                ui.separator();
                ui.heading(format!("Generation {}", summary.number));
                ui.separator();
                ui.label(format!("Best: #{} ({})", summary.best_id, summary.best_fitness));
                ui.label(format!("Mean fitness: {:.1}", summary.mean_fitness));
            }

            let recent = tournament.records().iter().rev().take(5);
            ui.separator();
            ui.label("Recent matches:");
            for record in recent {
                ui.monospace(format!(
                    "  #{:<4} {:>5} {:>6.1}s {}",
                    record.robot, record.fitness, record.duration_secs, record.reason
                ));
            }
        });
}
