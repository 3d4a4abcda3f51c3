use crate::arena::Arena;
use crate::attack::{Arsenal, MeleeZone, Projectile};
use crate::config::*;
use crate::genome::{Action, Arm, Genome};
use bevy::color::Color;
use bevy::math::{Rect, Vec2};
use std::fmt;

/// Stable identity of a robot across matches and generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(pub u64);

impl RobotId {
    /// Reserved for the defender; population ids start at 1.
    pub const DEFENDER: RobotId = RobotId(0);
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Which half of the arena a robot starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn start_ratio(self) -> f32 {
        match self {
            Side::Left => 0.25,
            Side::Right => 0.75,
        }
    }
}

/// A fighter: an immutable genome plus the runtime state one match mutates.
#[derive(Debug, Clone)]
pub struct Robot {
    id: RobotId,
    genome: Genome,
    parents: Option<(RobotId, RobotId)>,
    side: Side,
    home_facing: Facing,

    hp: i32,
    position: Vec2,
    size: Vec2,
    velocity_y: f32,
    facing: Facing,
    phase: usize,
    phase_ticks: u32,
    oob_ticks: u32,
    fitness: i32,
    match_duration: u32,
}

impl Robot {
    /// A first-generation attacker.
    pub fn new(id: RobotId, genome: Genome) -> Self {
        Self::spawn(id, genome, None, Side::Left, Facing::Right)
    }

    /// An attacker bred from two parents.
    pub fn offspring(id: RobotId, genome: Genome, parents: (RobotId, RobotId)) -> Self {
        Self::spawn(id, genome, Some(parents), Side::Left, Facing::Right)
    }

    pub fn defender(genome: Genome, facing: Facing) -> Self {
        Self::spawn(RobotId::DEFENDER, genome, None, Side::Right, facing)
    }

    fn spawn(
        id: RobotId,
        genome: Genome,
        parents: Option<(RobotId, RobotId)>,
        side: Side,
        facing: Facing,
    ) -> Self {
        let mut robot = Self {
            id,
            genome,
            parents,
            side,
            home_facing: facing,
            hp: 0,
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            velocity_y: 0.0,
            facing,
            phase: 0,
            phase_ticks: 0,
            oob_ticks: 0,
            fitness: 0,
            match_duration: 0,
        };
        robot.reset_vitals();
        robot
    }

    /// Restores everything a match changes except placement.
    pub fn reset_vitals(&mut self) {
        self.hp = self.max_hp();
        self.velocity_y = 0.0;
        self.facing = self.home_facing;
        self.phase = 0;
        self.phase_ticks = 0;
        self.oob_ticks = 0;
        self.fitness = 0;
        self.match_duration = 0;
    }

    /// Full reset: vitals plus size and starting position on the floor.
    pub fn reset(&mut self, arena: &Arena) {
        self.reset_vitals();
        let scale = arena.scale();
        self.size = Vec2::new(
            self.genome.base_size() as f32 * scale,
            (self.genome.chest_size() + self.genome.base_size()) as f32 * scale,
        );
        self.position = Vec2::new(
            arena.width * self.side.start_ratio() - self.size.x / 2.0,
            arena.floor_y() - self.size.y,
        );
    }

    pub fn max_hp(&self) -> i32 {
        self.genome.chest_size() * 2
    }

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn parents(&self) -> Option<(RobotId, RobotId)> {
        self.parents
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn body(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn oob_ticks(&self) -> u32 {
        self.oob_ticks
    }

    pub fn fitness(&self) -> i32 {
        self.fitness
    }

    pub fn match_duration(&self) -> u32 {
        self.match_duration
    }

    pub fn is_defender(&self) -> bool {
        self.id == RobotId::DEFENDER
    }

    pub fn tint(&self) -> Color {
        if self.is_defender() {
            Color::srgb(0.25, 0.35, 0.8)
        } else {
            Color::srgb(
                self.genome.chest_size() as f32 / 100.0,
                self.genome.base_size() as f32 / 100.0,
                0.3,
            )
        }
    }

    pub fn on_floor(&self, arena: &Arena) -> bool {
        self.position.y + self.size.y >= arena.floor_y()
    }

    /// Advances the behaviour state machine and kinematics by one tick.
    /// Attacks are spawned into `arsenal`.
    pub fn update(&mut self, arena: &Arena, arsenal: &mut Arsenal) {
        self.phase_ticks += 1;
        if self.phase_ticks >= arena.ticks_per_phase() {
            self.phase = (self.phase + 1) % PHASE_COUNT;
            self.phase_ticks = 0;

            if self.on_floor(arena) && self.genome.jump_for(self.phase) {
                self.jump();
            }
            match self.genome.action_for(self.phase) {
                Action::Idle => {}
                Action::UseArmOne => self.use_arm(self.genome.arm_one(), arena, arsenal),
                Action::UseArmTwo => self.use_arm(self.genome.arm_two(), arena, arsenal),
            }
        }

        self.position.x += self.genome.move_for(self.phase) as f32 * self.facing.sign();

        if !self.on_floor(arena) {
            self.velocity_y += GRAVITY;
            self.position.y += self.velocity_y;
        }
        if self.on_floor(arena) {
            self.position.y = arena.floor_y() - self.size.y;
            self.velocity_y = 0.0;
        }

        let margin = self.size.x;
        let outside = self.position.x < -margin || self.position.x > arena.width + margin;
        if outside {
            self.oob_ticks += 1;
        } else {
            self.oob_ticks = self.oob_ticks.saturating_sub(1);
        }
    }

    /// Launches upward with an impulse scaled by body proportions. Chest size
    /// is at least 10 by construction, so the division is always defined.
    pub fn jump(&mut self) {
        self.velocity_y =
            -JUMP_IMPULSE * self.genome.base_size() as f32 / self.genome.chest_size() as f32;
        self.position.y -= 1.0;
    }

    fn use_arm(&mut self, arm: Arm, arena: &Arena, arsenal: &mut Arsenal) {
        match arm {
            Arm::Empty => {}
            Arm::Ranged => self.shoot(arsenal),
            Arm::Melee => self.melee(arena, arsenal),
        }
    }

    pub fn shoot(&self, arsenal: &mut Arsenal) {
        arsenal.fire(Projectile::new(self.body().center(), self.facing.sign()));
    }

    pub fn melee(&self, arena: &Arena, arsenal: &mut Arsenal) {
        arsenal.swing(MeleeZone::around(self.body(), arena.melee_lifetime()));
    }

    pub(crate) fn take_damage(&mut self, damage: i32) {
        self.hp -= damage;
    }

    pub(crate) fn adjust_fitness(&mut self, delta: i32) {
        self.fitness += delta;
    }

    pub(crate) fn finish_match(&mut self, elapsed: u32) {
        self.match_duration = elapsed;
    }
}
