//! The worm: a head steered by input and a chain of trailing segments
//!
//! Segments are stored in chain order (first body segment first, tail
//! last). Between every leader/follower pair sits a `TrailBuffer` holding the
//! positions the leader vacated; a follower only moves when that buffer
//! overflows, so the gap between two segments stays at
//! `trail_capacity * step_size` no matter how the head's movement is split
//! into ticks.

use glam::Vec2;

use super::collision::{point_in_box, point_in_circle};
use super::lifecycle::Lifecycle;
use super::state::{Direction, RoundConfig};
use super::trail::TrailBuffer;
use crate::error::SimError;

#[derive(Debug, Clone)]
pub struct Worm {
    head: Vec2,
    direction: Direction,
    spawn: Vec2,
    step_size: f32,
    trail_capacity: usize,
    /// Body positions, head excluded
    segments: Vec<Vec2>,
    /// `trails[i]` feeds `segments[i]`
    trails: Vec<TrailBuffer>,
    lifecycle: Lifecycle,
}

impl Worm {
    /// Worm coiled up at `spawn` with `length` body segments
    pub fn new(spawn: Vec2, direction: Direction, length: u32, config: &RoundConfig) -> Self {
        let mut worm = Self {
            head: spawn,
            direction,
            spawn,
            step_size: config.step_size,
            trail_capacity: config.trail_capacity(),
            segments: Vec::with_capacity(length as usize),
            trails: Vec::with_capacity(length as usize),
            lifecycle: Lifecycle::new("worm"),
        };
        for _ in 0..length {
            worm.push_segment();
        }
        worm
    }

    fn push_segment(&mut self) {
        let at = self.segments.last().copied().unwrap_or(self.head);
        self.segments.push(at);
        self.trails.push(TrailBuffer::new(self.trail_capacity));
    }

    /// Append one segment at the current tail position
    pub fn grow(&mut self) -> Result<(), SimError> {
        self.lifecycle.check("grow")?;
        self.push_segment();
        Ok(())
    }

    pub fn grow_by(&mut self, count: u32) -> Result<(), SimError> {
        self.lifecycle.check("grow_by")?;
        for _ in 0..count {
            self.push_segment();
        }
        Ok(())
    }

    /// Takes effect on the next step
    pub fn change_dir(&mut self, direction: Direction) -> Result<(), SimError> {
        self.lifecycle.check("change_dir")?;
        self.direction = direction;
        Ok(())
    }

    pub fn direction(&self) -> Result<Direction, SimError> {
        self.lifecycle.check("direction")?;
        Ok(self.direction)
    }

    /// Move the head one `step_size` and let the chain follow
    pub fn step(&mut self) -> Result<(), SimError> {
        self.lifecycle.check("step")?;
        let mut vacated = self.head;
        self.head += self.direction.unit() * self.step_size;

        for (segment, trail) in self.segments.iter_mut().zip(self.trails.iter_mut()) {
            match trail.enqueue(vacated) {
                Some(next) => vacated = std::mem::replace(segment, next),
                None => break,
            }
        }
        Ok(())
    }

    /// Step until at least `distance` pixels were covered, or until `blocked`
    /// holds for the new head position; returns the step count.
    ///
    /// Overshoots by less than one step, never undershoots unless blocked.
    pub fn advance(
        &mut self,
        distance: f32,
        mut blocked: impl FnMut(Vec2) -> bool,
    ) -> Result<u32, SimError> {
        self.lifecycle.check("advance")?;
        let mut moved = 0.0;
        let mut steps = 0;
        while moved < distance {
            self.step()?;
            moved += self.step_size;
            steps += 1;
            if blocked(self.head) {
                break;
            }
        }
        Ok(steps)
    }

    pub fn head(&self) -> Result<Vec2, SimError> {
        self.lifecycle.check("head")?;
        Ok(self.head)
    }

    pub fn spawn(&self) -> Result<Vec2, SimError> {
        self.lifecycle.check("spawn")?;
        Ok(self.spawn)
    }

    /// Body segments from the first one behind the head to the tail
    pub fn segments(&self) -> Result<&[Vec2], SimError> {
        self.lifecycle.check("segments")?;
        Ok(&self.segments)
    }

    /// Number of body segments
    pub fn len(&self) -> Result<usize, SimError> {
        self.lifecycle.check("len")?;
        Ok(self.segments.len())
    }

    pub fn is_empty(&self) -> Result<bool, SimError> {
        self.lifecycle.check("is_empty")?;
        Ok(self.segments.is_empty())
    }

    /// Terminal segment of the chain; the head itself when there is no body
    pub fn last_tail(&self) -> Result<Vec2, SimError> {
        self.lifecycle.check("last_tail")?;
        Ok(self.segments.last().copied().unwrap_or(self.head))
    }

    /// Head within `radius` of `center`
    pub fn collides_circle(&self, center: Vec2, radius: f32) -> Result<bool, SimError> {
        self.lifecycle.check("collides_circle")?;
        Ok(point_in_circle(self.head, center, radius))
    }

    /// Head inside the box at `top_left` with size `dims`
    pub fn collides_sized_box(&self, top_left: Vec2, dims: Vec2) -> Result<bool, SimError> {
        self.lifecycle.check("collides_sized_box")?;
        Ok(point_in_box(self.head, top_left, dims))
    }

    /// Index of the first body segment within `radius` of the head.
    ///
    /// Skipped while the first body segment has not left the spawn point:
    /// the body is still coiled there and overlaps by construction.
    pub fn self_collision(&self, radius: f32) -> Result<Option<usize>, SimError> {
        self.lifecycle.check("self_collision")?;
        if self.segments.first() == Some(&self.spawn) {
            return Ok(None);
        }
        Ok(self
            .segments
            .iter()
            .position(|&segment| point_in_circle(segment, self.head, radius)))
    }

    pub fn dispose(&mut self) -> Result<(), SimError> {
        self.lifecycle.dispose()?;
        self.segments = Vec::new();
        self.trails = Vec::new();
        log::debug!("Worm disposed");
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> RoundConfig {
        RoundConfig {
            step_size: 1.0,
            segment_spacing: 4.0,
            ..Default::default()
        }
    }

    fn worm(length: u32) -> Worm {
        Worm::new(Vec2::new(100.0, 100.0), Direction::E, length, &config())
    }

    #[test]
    fn test_new_worm_is_coiled_at_spawn() {
        let worm = worm(3);
        assert_eq!(worm.len().unwrap(), 3);
        assert_eq!(worm.head().unwrap(), Vec2::new(100.0, 100.0));
        assert!(worm.segments().unwrap().iter().all(|&s| s == Vec2::new(100.0, 100.0)));
        assert_eq!(worm.last_tail().unwrap(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_first_segment_waits_for_spacing() {
        let mut worm = worm(2);
        for _ in 0..4 {
            worm.step().unwrap();
        }
        // buffer of 4 is full but nothing displaced yet
        assert_eq!(worm.head().unwrap(), Vec2::new(104.0, 100.0));
        assert_eq!(worm.segments().unwrap()[0], Vec2::new(100.0, 100.0));

        worm.step().unwrap();
        assert_eq!(worm.segments().unwrap()[0], Vec2::new(100.0, 100.0));
        worm.step().unwrap();
        assert_eq!(worm.segments().unwrap()[0], Vec2::new(101.0, 100.0));
        assert_eq!(worm.segments().unwrap()[1], Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_turn_is_followed() {
        let mut worm = worm(1);
        for _ in 0..4 {
            worm.step().unwrap();
        }
        worm.change_dir(Direction::S).unwrap();
        for _ in 0..10 {
            worm.step().unwrap();
        }
        assert_eq!(worm.head().unwrap(), Vec2::new(104.0, 110.0));
        // segment follows the same path, 4 steps behind
        assert_eq!(worm.segments().unwrap()[0], Vec2::new(104.0, 105.0));
    }

    #[test]
    fn test_advance_never_undershoots() {
        let mut worm = worm(0);
        assert_eq!(worm.advance(0.0, |_| false).unwrap(), 0);
        assert_eq!(worm.advance(2.5, |_| false).unwrap(), 3);
        assert_eq!(worm.head().unwrap(), Vec2::new(103.0, 100.0));
        assert_eq!(worm.advance(3.0, |_| false).unwrap(), 3);
    }

    #[test]
    fn test_advance_stops_when_blocked() {
        let mut worm = worm(0);
        let steps = worm.advance(50.0, |head| head.x >= 110.0).unwrap();
        assert_eq!(steps, 10);
        assert_eq!(worm.head().unwrap(), Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_grow_appends_at_tail() {
        let mut worm = worm(1);
        for _ in 0..20 {
            worm.step().unwrap();
        }
        let tail = worm.last_tail().unwrap();
        worm.grow().unwrap();
        assert_eq!(worm.len().unwrap(), 2);
        assert_eq!(worm.last_tail().unwrap(), tail);
        worm.grow_by(3).unwrap();
        assert_eq!(worm.len().unwrap(), 5);
    }

    #[test]
    fn test_headless_tail_is_head() {
        let mut worm = worm(0);
        worm.step().unwrap();
        assert_eq!(worm.last_tail().unwrap(), worm.head().unwrap());
    }

    #[test]
    fn test_collision_predicates() {
        let worm = worm(0);
        assert!(worm.collides_circle(Vec2::new(105.0, 100.0), 5.0).unwrap());
        assert!(!worm.collides_circle(Vec2::new(106.0, 100.0), 5.0).unwrap());
        assert!(worm.collides_sized_box(Vec2::new(90.0, 90.0), Vec2::splat(10.0)).unwrap());
        assert!(!worm.collides_sized_box(Vec2::new(101.0, 90.0), Vec2::splat(10.0)).unwrap());
    }

    #[test]
    fn test_spawn_guard_suppresses_self_collision() {
        let worm = worm(5);
        // everything overlaps at spawn, but the worm has not uncoiled yet
        assert_eq!(worm.self_collision(50.0).unwrap(), None);
    }

    #[test]
    fn test_self_collision_after_uncoiling() {
        let mut worm = worm(5);
        for _ in 0..10 {
            worm.step().unwrap();
        }
        assert_ne!(worm.segments().unwrap()[0], Vec2::new(100.0, 100.0));
        assert_eq!(worm.self_collision(2.0).unwrap(), None);
        assert_eq!(worm.self_collision(5.0).unwrap(), Some(0));
    }

    #[test]
    fn test_reversal_runs_into_body() {
        let mut worm = worm(3);
        for _ in 0..20 {
            worm.step().unwrap();
        }
        worm.change_dir(Direction::W).unwrap();
        worm.step().unwrap();
        worm.step().unwrap();
        assert_eq!(worm.self_collision(2.0).unwrap(), Some(0));
    }

    #[test]
    fn test_dispose() {
        let mut worm = worm(3);
        worm.dispose().unwrap();
        assert!(worm.is_disposed());
        assert!(matches!(worm.step(), Err(SimError::Disposed { entity: "worm", op: "step" })));
        assert!(matches!(worm.change_dir(Direction::N), Err(SimError::Disposed { .. })));
        assert!(matches!(worm.segments(), Err(SimError::Disposed { .. })));
        assert!(matches!(worm.dispose(), Err(SimError::Disposed { op: "dispose", .. })));
    }

    proptest! {
        #[test]
        fn prop_grow_extends_by_one(n in 0u32..200) {
            let mut worm = worm(0);
            for i in 0..n {
                prop_assert_eq!(worm.len().unwrap(), i as usize);
                worm.grow().unwrap();
            }
            prop_assert_eq!(worm.segments().unwrap().len(), n as usize);
        }

        #[test]
        fn prop_spacing_converges(
            length in 1u32..12,
            spacing in 2u32..12,
            dir_index in 0usize..4,
        ) {
            let config = RoundConfig {
                step_size: 1.0,
                segment_spacing: spacing as f32,
                ..Default::default()
            };
            let dir = Direction::ALL[dir_index];
            let mut worm = Worm::new(Vec2::new(500.0, 500.0), dir, length, &config);
            let needed = (length + 2) * (spacing + 1);
            for _ in 0..needed {
                worm.step().unwrap();
            }

            let mut leader = worm.head().unwrap();
            for &segment in worm.segments().unwrap() {
                let gap = leader.distance(segment);
                prop_assert!((gap - spacing as f32).abs() <= config.step_size,
                    "gap {} vs spacing {}", gap, spacing);
                leader = segment;
            }
        }
    }
}
