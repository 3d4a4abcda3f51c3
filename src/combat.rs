use crate::arena::Arena;
use crate::attack::Arsenal;
use crate::error::{Result, SimError};
use crate::robot::Robot;
use bevy::color::Color;
use bevy::math::Rect;
use std::fmt;
use tracing::debug;

/// Why a completed match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    DefenderDefeated,
    AttackerDefeated,
    OutOfBounds,
    Timeout,
}

impl EndReason {
    pub fn label(self) -> &'static str {
        match self {
            EndReason::DefenderDefeated => "DefenderDefeated",
            EndReason::AttackerDefeated => "AttackerDefeated",
            EndReason::OutOfBounds => "OutOfBounds",
            EndReason::Timeout => "Timeout",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Running,
    Finished(EndReason),
    /// Stopped from outside; never scored or recorded.
    Aborted,
}

/// What a drawable thing is, so the renderer can layer and style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Attacker,
    Defender,
    Projectile,
    Melee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rect: Rect,
    pub color: Color,
}

/// Read-only view of a match for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    pub shapes: Vec<Shape>,
    pub attacker_hp: i32,
    pub defender_hp: i32,
    pub fitness: i32,
    pub elapsed: u32,
    pub status: MatchStatus,
}

/// One attacker against the defender.
///
/// The match owns both robots for its duration. The defender is reset as soon
/// as the match stops and handed back through [`Match::into_robots`] or
/// [`Match::rematch`].
#[derive(Debug, Clone)]
pub struct Match {
    arena: Arena,
    attacker: Robot,
    defender: Robot,
    attacker_arsenal: Arsenal,
    defender_arsenal: Arsenal,
    elapsed: u32,
    status: MatchStatus,
}

impl Match {
    pub fn new(mut attacker: Robot, mut defender: Robot, arena: Arena) -> Result<Self> {
        arena.validate()?;
        if attacker.id() == defender.id() {
            return Err(SimError::SameCombatant(attacker.id().0));
        }
        attacker.reset(&arena);
        defender.reset(&arena);
        Ok(Self {
            arena,
            attacker,
            defender,
            attacker_arsenal: Arsenal::default(),
            defender_arsenal: Arsenal::default(),
            elapsed: 0,
            status: MatchStatus::Running,
        })
    }

    /// Runs one tick. Does nothing once the match has stopped.
    pub fn tick(&mut self) -> MatchStatus {
        if self.status != MatchStatus::Running {
            return self.status;
        }
        self.elapsed += 1;

        self.attacker.update(&self.arena, &mut self.attacker_arsenal);
        self.defender.update(&self.arena, &mut self.defender_arsenal);
        self.attacker_arsenal.update(self.attacker.body(), &self.arena);
        self.defender_arsenal.update(self.defender.body(), &self.arena);
        self.resolve_collisions();

        if let Some(reason) = self.end_condition() {
            self.finish(reason);
        }
        self.status
    }

    /// Runs until the match stops.
    pub fn run(&mut self) -> MatchStatus {
        while self.tick() == MatchStatus::Running {}
        self.status
    }

    fn resolve_collisions(&mut self) {
        for damage in self.attacker_arsenal.strike(self.defender.body()) {
            self.defender.take_damage(damage);
            self.attacker.adjust_fitness(damage);
        }
        for damage in self.defender_arsenal.strike(self.attacker.body()) {
            self.attacker.take_damage(damage);
            self.attacker.adjust_fitness(-damage);
        }
    }

    fn end_condition(&self) -> Option<EndReason> {
        if self.defender.hp() <= 0 {
            Some(EndReason::DefenderDefeated)
        } else if self.attacker.hp() <= 0 {
            Some(EndReason::AttackerDefeated)
        } else if self.attacker.oob_ticks() >= self.arena.oob_limit() {
            Some(EndReason::OutOfBounds)
        } else if self.elapsed >= self.arena.max_ticks() {
            Some(EndReason::Timeout)
        } else {
            None
        }
    }

    fn finish(&mut self, reason: EndReason) {
        debug!(
            attacker = %self.attacker.id(),
            fitness = self.attacker.fitness(),
            ticks = self.elapsed,
            %reason,
            "match finished"
        );
        self.attacker.finish_match(self.elapsed);
        self.stand_down();
        self.status = MatchStatus::Finished(reason);
    }

    /// Stops a running match without a result.
    pub fn abort(&mut self) {
        if self.status != MatchStatus::Running {
            return;
        }
        debug!(attacker = %self.attacker.id(), ticks = self.elapsed, "match aborted");
        self.stand_down();
        self.status = MatchStatus::Aborted;
    }

    fn stand_down(&mut self) {
        self.defender.reset(&self.arena);
        self.attacker_arsenal.clear();
        self.defender_arsenal.clear();
    }

    /// Starts a fresh match against the same defender and returns the
    /// previous attacker.
    pub fn rematch(&mut self, mut attacker: Robot) -> Robot {
        if self.status == MatchStatus::Running {
            self.abort();
        }
        attacker.reset(&self.arena);
        self.elapsed = 0;
        self.status = MatchStatus::Running;
        std::mem::replace(&mut self.attacker, attacker)
    }

    pub fn into_robots(self) -> (Robot, Robot) {
        (self.attacker, self.defender)
    }

    pub fn is_finished(&self) -> bool {
        self.status != MatchStatus::Running
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.status {
            MatchStatus::Finished(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn attacker(&self) -> &Robot {
        &self.attacker
    }

    pub fn defender(&self) -> &Robot {
        &self.defender
    }

    pub fn attacker_arsenal(&self) -> &Arsenal {
        &self.attacker_arsenal
    }

    pub fn defender_arsenal(&self) -> &Arsenal {
        &self.defender_arsenal
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut shapes = vec![
            Shape {
                kind: ShapeKind::Attacker,
                rect: self.attacker.body(),
                color: self.attacker.tint(),
            },
            Shape {
                kind: ShapeKind::Defender,
                rect: self.defender.body(),
                color: self.defender.tint(),
            },
        ];
        for arsenal in [&self.attacker_arsenal, &self.defender_arsenal] {
            shapes.extend(arsenal.projectiles().iter().map(|p| Shape {
                kind: ShapeKind::Projectile,
                rect: p.hitbox(),
                color: Color::srgb(0.95, 0.75, 0.1),
            }));
            shapes.extend(arsenal.melee().iter().map(|z| Shape {
                kind: ShapeKind::Melee,
                rect: z.area,
                color: Color::srgba(0.9, 0.2, 0.2, 0.35),
            }));
        }

        MatchSnapshot {
            shapes,
            attacker_hp: self.attacker.hp(),
            defender_hp: self.defender.hp(),
            fitness: self.attacker.fitness(),
            elapsed: self.elapsed,
            status: self.status,
        }
    }
}
