use crate::config::PHASE_COUNT;
use crate::error::{Result, SimError};
use rand::Rng;
use std::fmt;

/// The sixteen named genes, in their fixed layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gene {
    ChestSize,
    BaseSize,
    ArmOne,
    ArmTwo,
    MoveOne,
    MoveTwo,
    MoveThree,
    JumpOne,
    JumpTwo,
    JumpThree,
    ActionOne,
    ActionTwo,
    ActionThree,
    ActionFour,
    ActionFive,
    ActionSix,
}

impl Gene {
    pub const COUNT: usize = 16;

    pub const ALL: [Gene; Gene::COUNT] = [
        Gene::ChestSize,
        Gene::BaseSize,
        Gene::ArmOne,
        Gene::ArmTwo,
        Gene::MoveOne,
        Gene::MoveTwo,
        Gene::MoveThree,
        Gene::JumpOne,
        Gene::JumpTwo,
        Gene::JumpThree,
        Gene::ActionOne,
        Gene::ActionTwo,
        Gene::ActionThree,
        Gene::ActionFour,
        Gene::ActionFive,
        Gene::ActionSix,
    ];

    const MOVES: [Gene; 3] = [Gene::MoveOne, Gene::MoveTwo, Gene::MoveThree];
    const JUMPS: [Gene; 3] = [Gene::JumpOne, Gene::JumpTwo, Gene::JumpThree];
    const ACTIONS: [Gene; PHASE_COUNT] = [
        Gene::ActionOne,
        Gene::ActionTwo,
        Gene::ActionThree,
        Gene::ActionFour,
        Gene::ActionFive,
        Gene::ActionSix,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn kind(self) -> GeneKind {
        match self {
            Gene::ChestSize | Gene::BaseSize => GeneKind::Size,
            Gene::ArmOne | Gene::ArmTwo => GeneKind::Arm,
            Gene::MoveOne | Gene::MoveTwo | Gene::MoveThree => GeneKind::Move,
            Gene::JumpOne | Gene::JumpTwo | Gene::JumpThree => GeneKind::Jump,
            Gene::ActionOne
            | Gene::ActionTwo
            | Gene::ActionThree
            | Gene::ActionFour
            | Gene::ActionFive
            | Gene::ActionSix => GeneKind::Action,
        }
    }

    /// Column name used in the match ledger.
    pub fn name(self) -> &'static str {
        match self {
            Gene::ChestSize => "chest_size",
            Gene::BaseSize => "base_size",
            Gene::ArmOne => "arm_one",
            Gene::ArmTwo => "arm_two",
            Gene::MoveOne => "move_one",
            Gene::MoveTwo => "move_two",
            Gene::MoveThree => "move_three",
            Gene::JumpOne => "jump_one",
            Gene::JumpTwo => "jump_two",
            Gene::JumpThree => "jump_three",
            Gene::ActionOne => "action_one",
            Gene::ActionTwo => "action_two",
            Gene::ActionThree => "action_three",
            Gene::ActionFour => "action_four",
            Gene::ActionFive => "action_five",
            Gene::ActionSix => "action_six",
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Genes sharing a value domain. Mutation redraws from the gene's own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneKind {
    Size,
    Arm,
    Move,
    Jump,
    Action,
}

impl GeneKind {
    pub fn min(self) -> i32 {
        match self {
            GeneKind::Size => 10,
            GeneKind::Arm | GeneKind::Jump | GeneKind::Action => 0,
            GeneKind::Move => -10,
        }
    }

    pub fn max(self) -> i32 {
        match self {
            GeneKind::Size => 100,
            GeneKind::Arm | GeneKind::Action => 2,
            GeneKind::Move => 10,
            GeneKind::Jump => 1,
        }
    }

    pub fn contains(self, value: i32) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> i32 {
        rng.gen_range(self.min()..=self.max())
    }
}

/// What an arm does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    Empty,
    Ranged,
    Melee,
}

impl Arm {
    /// Decodes an arm gene. `Genome` only ever holds in-domain values, so
    /// anything outside 0..=2 is a broken invariant.
    fn from_gene(value: i32) -> Self {
        match value {
            0 => Arm::Empty,
            1 => Arm::Ranged,
            2 => Arm::Melee,
            other => unreachable!("arm gene {other} outside its domain"),
        }
    }
}

/// What a robot does on entering a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Idle,
    UseArmOne,
    UseArmTwo,
}

impl Action {
    /// Decodes an action gene; same domain guarantee as [`Arm::from_gene`].
    fn from_gene(value: i32) -> Self {
        match value {
            0 => Action::Idle,
            1 => Action::UseArmOne,
            2 => Action::UseArmTwo,
            other => unreachable!("action gene {other} outside its domain"),
        }
    }
}

/// Fixed-layout genome. Every value is inside its gene's domain; the only
/// ways to build one either validate or draw from the domain table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Genome {
    genes: [i32; Gene::COUNT],
}

impl Genome {
    pub fn from_genes(genes: [i32; Gene::COUNT]) -> Result<Self> {
        for gene in Gene::ALL {
            check(gene, genes[gene.index()])?;
        }
        Ok(Self { genes })
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut genes = [0; Gene::COUNT];
        for gene in Gene::ALL {
            genes[gene.index()] = gene.kind().sample(rng);
        }
        Self { genes }
    }

    /// An unarmed robot that never moves, jumps or acts.
    pub fn sentry() -> Self {
        let mut genes = [0; Gene::COUNT];
        genes[Gene::ChestSize.index()] = 20;
        genes[Gene::BaseSize.index()] = 50;
        Self { genes }
    }

    /// Copy with one gene replaced.
    pub fn with(mut self, gene: Gene, value: i32) -> Result<Self> {
        check(gene, value)?;
        self.genes[gene.index()] = value;
        Ok(self)
    }

    pub fn get(&self, gene: Gene) -> i32 {
        self.genes[gene.index()]
    }

    pub fn genes(&self) -> &[i32; Gene::COUNT] {
        &self.genes
    }

    pub fn chest_size(&self) -> i32 {
        self.get(Gene::ChestSize)
    }

    pub fn base_size(&self) -> i32 {
        self.get(Gene::BaseSize)
    }

    pub fn arm_one(&self) -> Arm {
        Arm::from_gene(self.get(Gene::ArmOne))
    }

    pub fn arm_two(&self) -> Arm {
        Arm::from_gene(self.get(Gene::ArmTwo))
    }

    pub fn move_for(&self, phase: usize) -> i32 {
        self.get(Gene::MOVES[phase % Gene::MOVES.len()])
    }

    pub fn jump_for(&self, phase: usize) -> bool {
        self.get(Gene::JUMPS[phase % Gene::JUMPS.len()]) == 1
    }

    pub fn action_for(&self, phase: usize) -> Action {
        Action::from_gene(self.get(Gene::ACTIONS[phase % PHASE_COUNT]))
    }

    /// Two-point crossover with explicit cut points. The cuts are ordered and
    /// clamped to the genome length, so any pair of points is accepted.
    ///
    /// The first child keeps `self` outside `[start, end)` and takes `other`
    /// inside it; the second child is the mirror image.
    pub fn crossover_at(&self, other: &Genome, cut_a: usize, cut_b: usize) -> (Genome, Genome) {
        let start = cut_a.min(cut_b).min(Gene::COUNT);
        let end = cut_a.max(cut_b).min(Gene::COUNT);

        let mut first = *self;
        let mut second = *other;
        first.genes[start..end].copy_from_slice(&other.genes[start..end]);
        second.genes[start..end].copy_from_slice(&self.genes[start..end]);
        (first, second)
    }

    pub fn crossover<R: Rng + ?Sized>(&self, other: &Genome, rng: &mut R) -> (Genome, Genome) {
        let cut_a = rng.gen_range(0..=Gene::COUNT);
        let cut_b = rng.gen_range(0..=Gene::COUNT);
        self.crossover_at(other, cut_a, cut_b)
    }

    /// Copy where each gene is independently redrawn from its own domain with
    /// probability `rate`.
    ///
    /// Callers pass a rate already validated by [`SimConfig`](crate::config::SimConfig)
    /// or [`Generation`](crate::generation::Generation). Anything else is
    /// clamped into [0, 1], and NaN counts as 0.
    pub fn mutate<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Self {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        let mut mutated = *self;
        for gene in Gene::ALL {
            if rng.gen_bool(rate) {
                mutated.genes[gene.index()] = gene.kind().sample(rng);
            }
        }
        mutated
    }
}

fn check(gene: Gene, value: i32) -> Result<()> {
    let kind = gene.kind();
    if kind.contains(value) {
        Ok(())
    } else {
        Err(SimError::GeneOutOfRange {
            gene,
            value,
            min: kind.min(),
            max: kind.max(),
        })
    }
}
