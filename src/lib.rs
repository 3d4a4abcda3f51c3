//! Evolves fighting robots with a genetic algorithm.
//!
//! Each robot's genome is scored by a deterministic tick-based match against a
//! fixed defender; the best robots survive and breed the next generation.

pub mod arena;
pub mod attack;
pub mod combat;
pub mod config;
pub mod error;
pub mod generation;
pub mod genome;
pub mod ledger;
pub mod plugin;
pub mod robot;
pub mod round;

pub use arena::Arena;
pub use combat::{EndReason, Match, MatchSnapshot, MatchStatus};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use generation::Generation;
pub use genome::{Action, Arm, Gene, Genome};
pub use ledger::{MatchLedger, MatchRecord};
pub use plugin::{SimSpeed, SimulationPlugin, SimulationState, SkipMatch};
pub use robot::{Facing, Robot, RobotId};
pub use round::Tournament;
