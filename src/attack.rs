use crate::arena::{Arena, overlaps};
use crate::config::*;
use bevy::math::{Rect, Vec2};

/// A bullet flying horizontally at constant speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub direction: f32,
    pub damage: i32,
}

impl Projectile {
    pub fn new(position: Vec2, direction: f32) -> Self {
        Self {
            position,
            direction,
            damage: PROJECTILE_DAMAGE,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }

    fn advance(&mut self) {
        self.position.x += self.direction * PROJECTILE_SPEED;
    }
}

/// A short-lived strike area surrounding its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct MeleeZone {
    pub area: Rect,
    pub damage: i32,
    /// Updates the zone survives; it is live for `lifetime` collision passes
    /// and dropped on the update after this reaches 0.
    pub ticks_left: u32,
}

impl MeleeZone {
    pub fn around(body: Rect, lifetime: u32) -> Self {
        Self {
            area: body.inflate(MELEE_REACH),
            damage: MELEE_DAMAGE,
            ticks_left: lifetime,
        }
    }

    fn follow(&mut self, body: Rect) {
        self.area = body.inflate(MELEE_REACH);
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }
}

/// One side's live attacks.
#[derive(Debug, Clone, Default)]
pub struct Arsenal {
    projectiles: Vec<Projectile>,
    melee: Vec<MeleeZone>,
}

impl Arsenal {
    pub fn fire(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn swing(&mut self, zone: MeleeZone) {
        self.melee.push(zone);
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn melee(&self) -> &[MeleeZone] {
        &self.melee
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.melee.is_empty()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.melee.clear();
    }

    /// Moves projectiles and drops the ones that left the arena, then drops
    /// expired melee zones and recenters the rest on the owner's body.
    pub fn update(&mut self, owner_body: Rect, arena: &Arena) {
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| arena.spans(p.position.x));

        self.melee.retain(|z| z.ticks_left > 0);
        for zone in &mut self.melee {
            zone.follow(owner_body);
        }
    }

    /// Consumes every attack overlapping `target` and returns the damage of
    /// each hit, projectiles first.
    pub fn strike(&mut self, target: Rect) -> Vec<i32> {
        let mut hits = Vec::new();
        self.projectiles.retain(|p| {
            if overlaps(&p.hitbox(), &target) {
                hits.push(p.damage);
                false
            } else {
                true
            }
        });
        self.melee.retain(|z| {
            if overlaps(&z.area, &target) {
                hits.push(z.damage);
                false
            } else {
                true
            }
        });
        hits
    }
}
