use crate::genome::Gene;
use thiserror::Error;

/// Validation failures raised while building engine objects.
///
/// The tick loop itself never fails; everything here is rejected up front.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("gene {gene} value {value} is outside {min}..={max}")]
    GeneOutOfRange {
        gene: Gene,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("population needs at least 2 robots, got {size}")]
    PopulationTooSmall { size: usize },
    #[error("mutation rate {0} must be between 0.0 and 1.0")]
    InvalidMutationRate(f64),
    #[error("invalid arena: {0}")]
    InvalidArena(&'static str),
    #[error("robot id {0} appears more than once in the population")]
    DuplicateRobot(u64),
    #[error("the defender id is reserved and cannot join the population")]
    DefenderInPopulation,
    #[error("robot {0} cannot fight itself")]
    SameCombatant(u64),
    #[error("ledger write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
