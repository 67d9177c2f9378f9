//! Time-based round tick
//!
//! Each tick converts elapsed wall time into a pixel budget, walks the worm
//! forward in fixed sub-steps, then resolves collisions in priority order:
//! wall, self, target. The exit and start-gate checks run afterwards.

use super::round::Round;
use super::state::{RoundEvent, RoundPhase, RoundResult, RoundStatus};
use crate::error::SimError;

impl Round {
    /// Advance the round to `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> Result<RoundStatus, SimError> {
        self.lifecycle.check("tick")?;
        match self.phase {
            RoundPhase::NotStarted => return Err(SimError::NotRunning),
            RoundPhase::Won => return Ok(RoundStatus::Finished(RoundResult::Won)),
            RoundPhase::Lost => return Ok(RoundStatus::Finished(RoundResult::Lost)),
            RoundPhase::Running => {}
        }

        // Time spent paused is dropped, so resuming never bursts
        let elapsed = match self.last_tick_ms {
            Some(last) => (now_ms - last).clamp(0.0, self.config.max_tick_ms),
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);
        if self.paused {
            return Ok(RoundStatus::Running);
        }

        let multiplier = if self.high_speed {
            self.config.high_speed_multiplier
        } else {
            1.0
        };
        let budget = self.speed * elapsed as f32 * multiplier;
        // Stop on the first solid tile so a large budget cannot skip a wall
        let grid = &self.grid;
        let steps = self
            .worm
            .advance(budget, |head| grid.solid_tile_at(head).is_some())?;
        log::trace!("Tick {:.1}ms: {} steps", elapsed, steps);

        let head = self.worm.head()?;
        if let Some(tile) = self.grid.solid_tile_at(head) {
            let cell = tile.cell();
            log::info!("Wall hit at {:?}", cell);
            return Ok(self.finish(
                RoundResult::Lost,
                RoundEvent::WallHit {
                    row: cell.row,
                    col: cell.col,
                },
            ));
        }

        if let Some(segment) = self.worm.self_collision(self.config.self_collision_radius)? {
            log::info!("Worm ran into segment {}", segment);
            return Ok(self.finish(RoundResult::Lost, RoundEvent::SelfHit { segment }));
        }

        let hit = match &self.target {
            Some(target) => target.is_hit_by(&self.worm)?,
            None => false,
        };
        if hit {
            self.collect_target()?;
        }

        let tail = self.worm.last_tail()?;
        if self.grid.exit_contains(tail) {
            log::info!("Worm left through the exit");
            return Ok(self.finish(RoundResult::Won, RoundEvent::Exited));
        }

        if self.grid.is_start_open()
            && !self.grid.start().collides_regardless_of_state(tail)
            && self.grid.close_start()
        {
            log::info!("Start gate closed");
            self.events.push(RoundEvent::StartClosed);
        }

        Ok(RoundStatus::Running)
    }

    fn collect_target(&mut self) -> Result<(), SimError> {
        if let Some(mut target) = self.target.take() {
            target.dispose()?;
        }
        self.targets_left = self.targets_left.saturating_sub(1);
        self.worm.grow_by(self.config.growth_per_target)?;
        self.speed *= self.config.speed_gain;
        log::info!(
            "Target collected, {} left, speed {:.3}px/ms",
            self.targets_left,
            self.speed
        );
        self.events.push(RoundEvent::TargetCollected {
            remaining: self.targets_left,
        });

        if self.targets_left == 0 {
            self.open_exit();
            Ok(())
        } else {
            self.spawn_target()
        }
    }

    fn finish(&mut self, result: RoundResult, event: RoundEvent) -> RoundStatus {
        self.phase = match result {
            RoundResult::Won => RoundPhase::Won,
            RoundResult::Lost => RoundPhase::Lost,
        };
        self.events.push(event);
        log::info!("Round finished: {:?}", result);
        RoundStatus::Finished(result)
    }
}
