//! Configuration constants for the robot fight simulator

use crate::arena::Arena;
use crate::error::{Result, SimError};
use crate::genome::Genome;
use crate::robot::Facing;
use std::path::PathBuf;

// ============================================================================
// TIMING
// ============================================================================

/// Simulation ticks per simulated second
pub const TICKS_PER_SECOND: u32 = 60;

/// Number of behaviour phases a robot cycles through
pub const PHASE_COUNT: usize = 6;

/// Seconds each behaviour phase stays active
pub const PHASE_SECONDS: u32 = 1;

/// Seconds of continuous margin violation before a match is lost to out-of-bounds
pub const OOB_SECONDS: u32 = 3;

/// Seconds before a match ends in a timeout
pub const MATCH_SECONDS: u32 = 60;

// ============================================================================
// ARENA
// ============================================================================

/// Default arena width in pixels
pub const ARENA_WIDTH: f32 = 1000.0;

/// Default arena height in pixels
pub const ARENA_HEIGHT: f32 = 500.0;

/// Floor line as a fraction of arena height (measured from the top)
pub const FLOOR_RATIO: f32 = 0.8;

/// Arena height at which one genome size unit is one pixel
pub const REFERENCE_HEIGHT: f32 = 500.0;

// ============================================================================
// PHYSICS
// ============================================================================

/// Downward velocity gained per tick while airborne
pub const GRAVITY: f32 = 1.0;

/// Base jump impulse, scaled by base_size / chest_size
pub const JUMP_IMPULSE: f32 = 10.0;

// ============================================================================
// WEAPONS
// ============================================================================

/// Pixels a projectile travels per tick
pub const PROJECTILE_SPEED: f32 = 10.0;

/// Damage dealt by one projectile
pub const PROJECTILE_DAMAGE: i32 = 10;

/// Projectile hitbox size in pixels
pub const PROJECTILE_WIDTH: f32 = 10.0;
pub const PROJECTILE_HEIGHT: f32 = 4.0;

/// Damage dealt by one melee zone
pub const MELEE_DAMAGE: i32 = 20;

/// How far a melee zone reaches past its owner's body on every side
pub const MELEE_REACH: f32 = 20.0;

/// Seconds a melee zone stays alive
pub const MELEE_SECONDS: u32 = 1;

// ============================================================================
// EVOLUTION
// ============================================================================

/// Number of robots in each generation
pub const POPULATION_SIZE: usize = 20;

/// Per-gene probability of a fresh random draw when breeding
pub const MUTATION_RATE: f64 = 0.05;

/// Top-ranked robots copied unchanged into the next generation
pub const ELITE_COUNT: usize = 2;

// ============================================================================
// PLAYBACK
// ============================================================================

/// Upper bound on the ticks-per-period speed multiplier
pub const MAX_SIM_SPEED: u32 = 64;

/// Ledger file written by the windowed app
pub const LEDGER_FILE: &str = "matches.csv";

/// Environment variable overriding the run seed
pub const SEED_ENV: &str = "ROBOT_FIGHT_SEED";

/// Everything a run needs at construction time.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub defender_genome: Genome,
    pub defender_facing: Facing,
    pub arena: Arena,
    pub seed: u64,
    /// Where completed matches are written as CSV; `None` disables the ledger.
    pub ledger_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            mutation_rate: MUTATION_RATE,
            defender_genome: Genome::sentry(),
            defender_facing: Facing::Left,
            arena: Arena::default(),
            seed: 0,
            ledger_path: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SimError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimError::InvalidMutationRate(self.mutation_rate));
        }
        self.arena.validate()
    }
}
