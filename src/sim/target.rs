//! Targets and their random placement

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::box_corners;
use super::grid::Grid;
use super::lifecycle::Lifecycle;
use super::worm::Worm;
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::error::SimError;

/// A pickup the worm has to reach
#[derive(Debug, Clone)]
pub struct Target {
    pos: Vec2,
    radius: f32,
    lifecycle: Lifecycle,
}

impl Target {
    /// Target whose bounding box starts at `pos` and is `2 * radius` wide
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            lifecycle: Lifecycle::new("target"),
        }
    }

    /// Top-left corner of the bounding box
    pub fn pos(&self) -> Result<Vec2, SimError> {
        self.lifecycle.check("pos")?;
        Ok(self.pos)
    }

    pub fn size(&self) -> Result<Vec2, SimError> {
        self.lifecycle.check("size")?;
        Ok(Vec2::splat(self.radius * 2.0))
    }

    pub fn center(&self) -> Result<Vec2, SimError> {
        self.lifecycle.check("center")?;
        Ok(self.pos + Vec2::splat(self.radius))
    }

    pub fn radius(&self) -> Result<f32, SimError> {
        self.lifecycle.check("radius")?;
        Ok(self.radius)
    }

    /// Worm head within pickup range
    pub fn is_hit_by(&self, worm: &Worm) -> Result<bool, SimError> {
        self.lifecycle.check("is_hit_by")?;
        worm.collides_circle(self.pos + Vec2::splat(self.radius), self.radius)
    }

    pub fn dispose(&mut self) -> Result<(), SimError> {
        self.lifecycle.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }
}

/// Rejection sampler for free target spots.
///
/// Only the four corners of the target box are tested against solid tiles,
/// so a target may straddle a thin wall corner-free; tiles are at least as
/// large as targets in practice.
#[derive(Debug, Clone)]
pub struct TargetPositioner {
    rng: Pcg32,
    radius: f32,
    max_attempts: u32,
    last_attempts: u32,
}

impl TargetPositioner {
    pub fn new(seed: u64, radius: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            radius,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            last_attempts: 0,
        }
    }

    pub fn target_size(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0)
    }

    /// Samples used by the most recent `find_spot`
    pub fn last_attempts(&self) -> u32 {
        self.last_attempts
    }

    /// Random top-left for a target whose corners touch no solid tile
    pub fn find_spot(&mut self, grid: &Grid) -> Result<Vec2, SimError> {
        let size = self.target_size();
        let span = (grid.pixel_size() - size).max(Vec2::ZERO);

        for attempt in 1..=self.max_attempts {
            self.last_attempts = attempt;
            let pos = Vec2::new(
                self.rng.random_range(0.0..=span.x),
                self.rng.random_range(0.0..=span.y),
            );
            let blocked = box_corners(pos, size)
                .iter()
                .any(|&corner| grid.solid_tile_at(corner).is_some());
            if !blocked {
                log::debug!("Target spot {:?} found after {} attempts", pos, attempt);
                return Ok(pos);
            }
            log::trace!("Target spot {:?} rejected", pos);
        }

        log::error!(
            "No free target spot after {} attempts, level too crowded",
            self.max_attempts
        );
        Err(SimError::PlacementExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Place a fresh target
    pub fn spawn(&mut self, grid: &Grid) -> Result<Target, SimError> {
        let pos = self.find_spot(grid)?;
        Ok(Target::new(pos, self.radius))
    }
}
