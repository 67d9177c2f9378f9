//! Keyboard and pointer-drag translation into round input signals
//!
//! Both mappers are plain state machines over key names and pointer
//! positions, so the browser glue only forwards raw events.

use glam::Vec2;

use crate::sim::{Direction, InputSignal};

/// Arrow keys (and optionally WASD) turn; holding the arrow that was just
/// pressed turns key-repeat into high speed until it is released.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    wasd: bool,
    held: Option<Direction>,
    boosting: bool,
}

impl KeyboardInput {
    pub fn new(wasd: bool) -> Self {
        Self {
            wasd,
            ..Default::default()
        }
    }

    fn direction_for(&self, key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::N),
            "ArrowRight" => Some(Direction::E),
            "ArrowDown" => Some(Direction::S),
            "ArrowLeft" => Some(Direction::W),
            "w" | "W" if self.wasd => Some(Direction::N),
            "d" | "D" if self.wasd => Some(Direction::E),
            "s" | "S" if self.wasd => Some(Direction::S),
            "a" | "A" if self.wasd => Some(Direction::W),
            _ => None,
        }
    }

    /// `key` is a DOM `KeyboardEvent.key` value
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<InputSignal> {
        if matches!(key, " " | "p" | "P" | "Escape") {
            return (!repeat).then_some(InputSignal::TogglePause);
        }

        let dir = self.direction_for(key)?;
        if repeat {
            if self.held == Some(dir) && !self.boosting {
                self.boosting = true;
                return Some(InputSignal::HighSpeed(true));
            }
            return None;
        }

        self.held = Some(dir);
        Some(InputSignal::Turn(dir))
    }

    pub fn key_up(&mut self, key: &str) -> Option<InputSignal> {
        let dir = self.direction_for(key)?;
        if self.held != Some(dir) {
            return None;
        }
        self.held = None;
        if self.boosting {
            self.boosting = false;
            return Some(InputSignal::HighSpeed(false));
        }
        None
    }
}

/// A drag past `threshold` pixels turns toward its dominant axis and holds
/// high speed until the pointer is released.
#[derive(Debug, Clone)]
pub struct DragInput {
    threshold: f32,
    origin: Option<Vec2>,
    last_dir: Option<Direction>,
    boosting: bool,
}

impl DragInput {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            origin: None,
            last_dir: None,
            boosting: false,
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.origin = Some(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> Vec<InputSignal> {
        let Some(origin) = self.origin else {
            return Vec::new();
        };
        let delta = pos - origin;
        if delta.length() < self.threshold {
            return Vec::new();
        }

        // Screen space: y grows downward
        let dir = if delta.x.abs() >= delta.y.abs() {
            if delta.x > 0.0 { Direction::E } else { Direction::W }
        } else if delta.y > 0.0 {
            Direction::S
        } else {
            Direction::N
        };

        let mut signals = Vec::new();
        if self.last_dir != Some(dir) {
            self.last_dir = Some(dir);
            signals.push(InputSignal::Turn(dir));
        }
        if !self.boosting {
            self.boosting = true;
            signals.push(InputSignal::HighSpeed(true));
        }
        // Measure the next gesture segment from here
        self.origin = Some(pos);
        signals
    }

    pub fn pointer_up(&mut self) -> Option<InputSignal> {
        self.origin = None;
        self.last_dir = None;
        if self.boosting {
            self.boosting = false;
            return Some(InputSignal::HighSpeed(false));
        }
        None
    }
}
