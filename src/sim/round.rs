//! One attempt at a level
//!
//! A round owns its grid (for gate state), its worm and the current target.
//! It is driven either tick by tick (`begin` + `tick`) or as a whole with
//! `start`, which awaits a `TickSource` until the round is decided.

use super::clock::TickSource;
use super::grid::Grid;
use super::lifecycle::Lifecycle;
use super::state::{Direction, InputSignal, RoundConfig, RoundEvent, RoundPhase, RoundResult};
use super::target::{Target, TargetPositioner};
use super::worm::Worm;
use crate::assets::{Level, Tileset};
use crate::error::SimError;

#[derive(Debug)]
pub struct Round {
    pub(crate) config: RoundConfig,
    pub(crate) grid: Grid,
    pub(crate) worm: Worm,
    pub(crate) positioner: TargetPositioner,
    pub(crate) target: Option<Target>,
    pub(crate) phase: RoundPhase,
    pub(crate) paused: bool,
    pub(crate) high_speed: bool,
    /// Pixels per millisecond before the high speed multiplier
    pub(crate) speed: f32,
    pub(crate) targets_left: u32,
    /// Time of the last tick, paused or not
    pub(crate) last_tick_ms: Option<f64>,
    pub(crate) events: Vec<RoundEvent>,
    pub(crate) lifecycle: Lifecycle,
}

impl Round {
    /// Build the grid and spawn the worm; gates and targets are set up by `begin`
    pub fn new(
        level: &Level,
        tileset: &Tileset,
        config: RoundConfig,
        seed: u64,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let grid = Grid::build(level, tileset)?;
        let worm = Worm::new(
            grid.spawn_position(),
            level.start_dir,
            config.initial_length,
            &config,
        );
        let positioner = TargetPositioner::new(seed, config.target_radius);
        let speed = grid.tile_size().x * config.tiles_per_second / 1000.0;

        log::info!(
            "New round '{}': {}x{} tiles, {} targets, seed {}",
            level.meta.name,
            grid.col_count(),
            grid.row_count(),
            level.targets,
            seed
        );

        Ok(Self {
            config,
            grid,
            worm,
            positioner,
            target: None,
            phase: RoundPhase::NotStarted,
            paused: false,
            high_speed: false,
            speed,
            targets_left: level.targets,
            last_tick_ms: None,
            events: Vec::new(),
            lifecycle: Lifecycle::new("round"),
        })
    }

    /// Open the start gate, close the exit and place the first target.
    ///
    /// A level without targets gets its exit opened right away. If the first
    /// target cannot be placed the gates are put back and the round stays
    /// `NotStarted`.
    pub fn begin(&mut self) -> Result<(), SimError> {
        self.lifecycle.check("begin")?;
        if self.phase != RoundPhase::NotStarted {
            return Err(SimError::AlreadyStarted);
        }

        if self.targets_left == 0 {
            self.grid.open_start();
            self.grid.close_exits();
            self.open_exit();
        } else {
            // placement has to see the exit closed
            let start_opened = self.grid.open_start();
            let exits_closed = self.grid.close_exits();
            if let Err(err) = self.spawn_target() {
                if start_opened {
                    self.grid.close_start();
                }
                if exits_closed {
                    self.grid.open_exits();
                }
                return Err(err);
            }
        }

        self.phase = RoundPhase::Running;
        log::info!("Round started");
        Ok(())
    }

    /// Play the round to its end, ticking whenever `ticks` yields
    pub async fn start<T: TickSource>(&mut self, ticks: &mut T) -> Result<RoundResult, SimError> {
        self.begin()?;
        loop {
            let input = ticks.next_tick().await;
            for signal in input.signals {
                self.apply(signal)?;
            }
            if let Some(result) = self.tick(input.now_ms)?.result() {
                return Ok(result);
            }
        }
    }

    pub fn change_dir(&mut self, direction: Direction) -> Result<(), SimError> {
        self.lifecycle.check("change_dir")?;
        self.worm.change_dir(direction)
    }

    pub fn toggle_pause(&mut self) -> Result<(), SimError> {
        self.lifecycle.check("toggle_pause")?;
        self.set_paused(!self.paused)
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<(), SimError> {
        self.lifecycle.check("set_paused")?;
        if self.paused != paused {
            log::info!("Round {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
        Ok(())
    }

    pub fn set_high_speed(&mut self, high_speed: bool) -> Result<(), SimError> {
        self.lifecycle.check("set_high_speed")?;
        self.high_speed = high_speed;
        Ok(())
    }

    /// Route an input signal to the matching mutator
    pub fn apply(&mut self, signal: InputSignal) -> Result<(), SimError> {
        match signal {
            InputSignal::Turn(direction) => self.change_dir(direction),
            InputSignal::TogglePause => self.toggle_pause(),
            InputSignal::HighSpeed(on) => self.set_high_speed(on),
        }
    }

    /// Events since the previous call, oldest first
    pub fn drain_events(&mut self) -> Result<Vec<RoundEvent>, SimError> {
        self.lifecycle.check("drain_events")?;
        Ok(std::mem::take(&mut self.events))
    }

    pub fn grid(&self) -> Result<&Grid, SimError> {
        self.lifecycle.check("grid")?;
        Ok(&self.grid)
    }

    pub fn worm(&self) -> Result<&Worm, SimError> {
        self.lifecycle.check("worm")?;
        Ok(&self.worm)
    }

    pub fn target(&self) -> Result<Option<&Target>, SimError> {
        self.lifecycle.check("target")?;
        Ok(self.target.as_ref())
    }

    pub fn phase(&self) -> Result<RoundPhase, SimError> {
        self.lifecycle.check("phase")?;
        Ok(self.phase)
    }

    pub fn targets_left(&self) -> Result<u32, SimError> {
        self.lifecycle.check("targets_left")?;
        Ok(self.targets_left)
    }

    /// Current base speed in pixels per millisecond
    pub fn speed(&self) -> Result<f32, SimError> {
        self.lifecycle.check("speed")?;
        Ok(self.speed)
    }

    pub fn is_paused(&self) -> Result<bool, SimError> {
        self.lifecycle.check("is_paused")?;
        Ok(self.paused)
    }

    pub fn is_high_speed(&self) -> Result<bool, SimError> {
        self.lifecycle.check("is_high_speed")?;
        Ok(self.high_speed)
    }

    /// Release the worm and target; every later call fails
    pub fn dispose(&mut self) -> Result<(), SimError> {
        self.lifecycle.dispose()?;
        if let Some(mut target) = self.target.take() {
            target.dispose()?;
        }
        self.worm.dispose()?;
        self.events.clear();
        log::info!("Round disposed");
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }

    pub(crate) fn spawn_target(&mut self) -> Result<(), SimError> {
        let target = self.positioner.spawn(&self.grid)?;
        let pos = target.pos()?;
        self.target = Some(target);
        self.events.push(RoundEvent::TargetSpawned { pos });
        Ok(())
    }

    pub(crate) fn open_exit(&mut self) {
        if self.grid.open_exits() {
            log::info!("Exit opened");
            self.events.push(RoundEvent::ExitOpened);
        }
    }
}
