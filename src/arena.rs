use crate::config::*;
use crate::error::{Result, SimError};
use bevy::math::Rect;

/// Arena geometry and clock rate.
///
/// Coordinates are screen-style: x grows right, y grows down, and the floor
/// is a horizontal line at `floor_y()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub tick_rate: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            tick_rate: TICKS_PER_SECOND,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32, tick_rate: u32) -> Result<Self> {
        let arena = Self {
            width,
            height,
            tick_rate,
        };
        arena.validate()?;
        Ok(arena)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0) {
            return Err(SimError::InvalidArena("width must be positive"));
        }
        if !(self.height > 0.0) {
            return Err(SimError::InvalidArena("height must be positive"));
        }
        if self.tick_rate == 0 {
            return Err(SimError::InvalidArena("tick rate must be positive"));
        }
        Ok(())
    }

    pub fn floor_y(&self) -> f32 {
        self.height * FLOOR_RATIO
    }

    /// Pixels per genome size unit.
    pub fn scale(&self) -> f32 {
        self.height / REFERENCE_HEIGHT
    }

    pub fn ticks_per_phase(&self) -> u32 {
        self.tick_rate * PHASE_SECONDS
    }

    pub fn max_ticks(&self) -> u32 {
        self.tick_rate * MATCH_SECONDS
    }

    pub fn oob_limit(&self) -> u32 {
        self.tick_rate * OOB_SECONDS
    }

    pub fn melee_lifetime(&self) -> u32 {
        self.tick_rate * MELEE_SECONDS
    }

    pub fn ticks_to_seconds(&self, ticks: u32) -> f32 {
        ticks as f32 / self.tick_rate as f32
    }

    /// Whether a point lies within the horizontal span of the arena.
    pub fn spans(&self, x: f32) -> bool {
        (0.0..=self.width).contains(&x)
    }
}

/// Axis-aligned overlap with strict inequalities, so touching edges do not hit.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}
