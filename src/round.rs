use crate::arena::Arena;
use crate::combat::{Match, MatchStatus};
use crate::config::SimConfig;
use crate::error::Result;
use crate::generation::Generation;
use crate::ledger::{MatchLedger, MatchRecord};
use crate::robot::{Robot, RobotId};
use bevy::prelude::Resource;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tracing::{info, warn};

pub type LedgerWriter = Box<dyn Write + Send + Sync>;

/// Result of a fully evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    pub number: u32,
    pub best_id: RobotId,
    pub best_fitness: i32,
    pub mean_fitness: f64,
}

/// Round driver: runs every attacker of the current generation against the
/// shared defender in population order, logs completed matches and breeds
/// the next generation once the population is exhausted.
///
/// All randomness of a run comes from the single seeded generator held here.
#[derive(Resource)]
pub struct Tournament {
    arena: Arena,
    rng: ChaCha8Rng,
    generation: Generation,
    cursor: usize,
    current: Match,
    records: Vec<MatchRecord>,
    last_summary: Option<GenerationSummary>,
    ledger: Option<MatchLedger<LedgerWriter>>,
    total_ticks: u64,
}

impl Tournament {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let generation = Generation::new_random(config.population_size, config.mutation_rate, &mut rng)?;
        let defender = Robot::defender(config.defender_genome, config.defender_facing);
        let first = generation.robots()[0].clone();
        let current = Match::new(first, defender, config.arena)?;

        let ledger = match &config.ledger_path {
            Some(path) => {
                let file = std::fs::File::create(path)?;
                let writer: LedgerWriter = Box::new(std::io::BufWriter::new(file));
                Some(MatchLedger::new(writer)?)
            }
            None => None,
        };

        info!(
            population = config.population_size,
            mutation_rate = config.mutation_rate,
            seed = config.seed,
            "tournament started"
        );

        Ok(Self {
            arena: config.arena,
            rng,
            generation,
            cursor: 0,
            current,
            records: Vec::new(),
            last_summary: None,
            ledger,
            total_ticks: 0,
        })
    }

    /// Replaces the ledger with one writing to `writer`.
    pub fn with_ledger<W: Write + Send + Sync + 'static>(mut self, writer: W) -> Result<Self> {
        let writer: LedgerWriter = Box::new(writer);
        self.ledger = Some(MatchLedger::new(writer)?);
        Ok(self)
    }

    /// Advances the current match by one tick. Returns the record when that
    /// tick completed the match; the next attacker is already lined up.
    pub fn tick(&mut self) -> Option<MatchRecord> {
        self.total_ticks += 1;
        match self.current.tick() {
            MatchStatus::Running => None,
            MatchStatus::Finished(reason) => {
                let attacker = self.current.attacker();
                let record = MatchRecord {
                    generation: self.generation.number(),
                    match_number: self.cursor as u32 + 1,
                    robot: attacker.id(),
                    genome: *attacker.genome(),
                    duration_secs: self.arena.ticks_to_seconds(attacker.match_duration()),
                    fitness: attacker.fitness(),
                    reason,
                    parents: attacker.parents(),
                };
                if let Some(ledger) = &mut self.ledger {
                    if let Err(err) = ledger.append(&record) {
                        warn!(%err, "could not write match record");
                    }
                }
                self.records.push(record.clone());

                let finished = self.current.attacker().clone();
                self.advance(finished);
                Some(record)
            }
            MatchStatus::Aborted => {
                self.skip_current();
                None
            }
        }
    }

    /// Aborts the current match. The attacker is stored unscored, ranked as
    /// if it had survived the full match without landing a hit.
    pub fn skip_current(&mut self) {
        self.current.abort();
        let mut skipped = self.current.attacker().clone();
        skipped.reset_vitals();
        skipped.finish_match(self.arena.max_ticks());
        info!(robot = %skipped.id(), "match skipped");
        self.advance(skipped);
    }

    /// Runs matches until the current generation has been bred, returning the
    /// records of its completed matches.
    pub fn run_generation(&mut self) -> Vec<MatchRecord> {
        let number = self.generation.number();
        let mut records = Vec::new();
        while self.generation.number() == number {
            if let Some(record) = self.tick() {
                records.push(record);
            }
        }
        records
    }

    fn advance(&mut self, finished: Robot) {
        self.generation.record(self.cursor, finished);
        self.cursor += 1;
        if self.cursor >= self.generation.len() {
            self.close_generation();
        }
        let next = self.generation.robots()[self.cursor].clone();
        self.current.rematch(next);
    }

    fn close_generation(&mut self) {
        if let Some(best) = self.generation.best() {
            let summary = GenerationSummary {
                number: self.generation.number(),
                best_id: best.id(),
                best_fitness: best.fitness(),
                mean_fitness: self.generation.mean_fitness(),
            };
            info!(
                generation = summary.number,
                best = %summary.best_id,
                best_fitness = summary.best_fitness,
                mean_fitness = summary.mean_fitness,
                "generation complete"
            );
            self.last_summary = Some(summary);
        }
        self.generation = self.generation.breed(&mut self.rng);
        self.cursor = 0;
        self.records.clear();
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    pub fn current(&self) -> &Match {
        &self.current
    }

    /// 1-based number of the running match within its generation.
    pub fn match_number(&self) -> u32 {
        self.cursor as u32 + 1
    }

    /// Completed matches of the current generation.
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn last_summary(&self) -> Option<&GenerationSummary> {
        self.last_summary.as_ref()
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}
