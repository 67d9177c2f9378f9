//! Round state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Heading of the worm head. Screen space: north is -y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Unit vector for one pixel of travel
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::N => Vec2::new(0.0, -1.0),
            Direction::E => Vec2::new(1.0, 0.0),
            Direction::S => Vec2::new(0.0, 1.0),
            Direction::W => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::E => Direction::W,
            Direction::S => Direction::N,
            Direction::W => Direction::E,
        }
    }
}

/// Discrete input delivered to a round, whatever device produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSignal {
    Turn(Direction),
    TogglePause,
    HighSpeed(bool),
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Built, gates untouched, no target yet
    NotStarted,
    /// Simulation advancing (possibly paused)
    Running,
    /// Tail left through the exit
    Won,
    /// Head hit a wall or the body
    Lost,
}

/// Final outcome handed back to the level/game wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Won,
    Lost,
}

/// What a tick reports back to its driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Running,
    Finished(RoundResult),
}

impl RoundStatus {
    /// The outcome once the round is decided
    pub fn result(self) -> Option<RoundResult> {
        match self {
            RoundStatus::Running => None,
            RoundStatus::Finished(result) => Some(result),
        }
    }
}

/// Notable state changes, drained by the caller for rendering/HUD updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    /// A new target appeared (top-left corner)
    TargetSpawned { pos: Vec2 },
    /// Head picked up the current target
    TargetCollected { remaining: u32 },
    ExitOpened,
    StartClosed,
    /// Head ran into a solid tile at (row, col)
    WallHit { row: usize, col: usize },
    /// Head ran into its own body segment
    SelfHit { segment: usize },
    /// Tail passed into the exit
    Exited,
}

/// Simulation tuning for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub step_size: f32,
    pub segment_spacing: f32,
    pub initial_length: u32,
    pub self_collision_radius: f32,
    pub tiles_per_second: f32,
    pub high_speed_multiplier: f32,
    pub speed_gain: f32,
    pub growth_per_target: u32,
    pub max_tick_ms: f64,
    pub target_radius: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            step_size: STEP_SIZE,
            segment_spacing: SEGMENT_SPACING,
            initial_length: INITIAL_LENGTH,
            self_collision_radius: SELF_COLLISION_RADIUS,
            tiles_per_second: TILES_PER_SECOND,
            high_speed_multiplier: HIGH_SPEED_MULTIPLIER,
            speed_gain: SPEED_GAIN,
            growth_per_target: GROWTH_PER_TARGET,
            max_tick_ms: MAX_TICK_MS,
            target_radius: TARGET_RADIUS,
        }
    }
}

impl RoundConfig {
    /// Number of head steps buffered between two segments
    pub fn trail_capacity(&self) -> usize {
        ((self.segment_spacing / self.step_size).round() as usize).max(1)
    }

    /// Reject tuning the simulation cannot run with.
    ///
    /// Settings are user-editable, so this runs before any round is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("step_size", self.step_size)?;
        positive("segment_spacing", self.segment_spacing)?;
        if self.segment_spacing < self.step_size {
            return Err(invalid(
                "segment_spacing",
                self.segment_spacing,
                "smaller than step_size",
            ));
        }
        if self.segment_spacing / self.step_size > MAX_TRAIL_STEPS {
            return Err(invalid(
                "segment_spacing",
                self.segment_spacing,
                "too many steps between segments",
            ));
        }
        if self.initial_length > MAX_INITIAL_LENGTH {
            return Err(invalid(
                "initial_length",
                self.initial_length,
                "too many segments",
            ));
        }
        if self.growth_per_target > MAX_INITIAL_LENGTH {
            return Err(invalid(
                "growth_per_target",
                self.growth_per_target,
                "too many segments",
            ));
        }
        if !(self.self_collision_radius.is_finite() && self.self_collision_radius >= 0.0) {
            return Err(invalid(
                "self_collision_radius",
                self.self_collision_radius,
                "must be finite and not negative",
            ));
        }
        positive("tiles_per_second", self.tiles_per_second)?;
        positive("high_speed_multiplier", self.high_speed_multiplier)?;
        positive("speed_gain", self.speed_gain)?;
        if !(self.max_tick_ms.is_finite() && self.max_tick_ms >= 0.0) {
            return Err(invalid(
                "max_tick_ms",
                self.max_tick_ms,
                "must be finite and not negative",
            ));
        }
        positive("target_radius", self.target_radius)
    }
}

fn invalid(field: &'static str, value: impl Into<f64>, reason: &'static str) -> ConfigError {
    ConfigError::InvalidTuning {
        field,
        value: value.into(),
        reason,
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_units_are_screen_space() {
        assert_eq!(Direction::N.unit(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::S.unit(), Vec2::new(0.0, 1.0));
        for dir in Direction::ALL {
            assert_eq!(dir.unit() + dir.reverse().unit(), Vec2::ZERO);
        }
    }

    #[test]
    fn test_trail_capacity() {
        let config = RoundConfig {
            step_size: 0.5,
            segment_spacing: 8.0,
            ..Default::default()
        };
        assert_eq!(config.trail_capacity(), 16);
        assert_eq!(RoundConfig::default().trail_capacity(), 8);
    }

    fn rejected_field(config: RoundConfig) -> &'static str {
        match config.validate() {
            Err(ConfigError::InvalidTuning { field, .. }) => field,
            other => panic!("expected invalid tuning, got {:?}", other),
        }
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(RoundConfig::default().validate().is_ok());
    }

    #[test]
    fn test_step_size_must_be_positive() {
        for step_size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = RoundConfig {
                step_size,
                ..Default::default()
            };
            assert_eq!(rejected_field(config), "step_size");
        }
    }

    #[test]
    fn test_segment_spacing_bounds() {
        for segment_spacing in [0.0, f32::NAN, 0.5, 1.0e9] {
            let config = RoundConfig {
                step_size: 1.0,
                segment_spacing,
                ..Default::default()
            };
            assert_eq!(rejected_field(config), "segment_spacing");
        }
        let config = RoundConfig {
            step_size: 1.0,
            segment_spacing: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_segment_counts_bounded() {
        let config = RoundConfig {
            initial_length: u32::MAX,
            ..Default::default()
        };
        assert_eq!(rejected_field(config), "initial_length");
        let config = RoundConfig {
            growth_per_target: u32::MAX,
            ..Default::default()
        };
        assert_eq!(rejected_field(config), "growth_per_target");
    }

    #[test]
    fn test_self_collision_radius_not_negative() {
        let config = RoundConfig {
            self_collision_radius: -2.0,
            ..Default::default()
        };
        assert_eq!(rejected_field(config), "self_collision_radius");
    }

    #[test]
    fn test_max_tick_must_be_finite_and_not_negative() {
        for max_tick_ms in [-1.0, f64::NAN, f64::INFINITY] {
            let config = RoundConfig {
                max_tick_ms,
                ..Default::default()
            };
            assert_eq!(rejected_field(config), "max_tick_ms");
        }
        let config = RoundConfig {
            max_tick_ms: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_speed_factors_must_be_positive() {
        let cases = [
            RoundConfig {
                tiles_per_second: 0.0,
                ..Default::default()
            },
            RoundConfig {
                high_speed_multiplier: -4.0,
                ..Default::default()
            },
            RoundConfig {
                speed_gain: f32::NAN,
                ..Default::default()
            },
        ];
        let fields: Vec<_> = cases.into_iter().map(rejected_field).collect();
        assert_eq!(
            fields,
            vec!["tiles_per_second", "high_speed_multiplier", "speed_gain"]
        );
    }

    #[test]
    fn test_target_radius_must_be_positive() {
        for target_radius in [0.0, f32::INFINITY] {
            let config = RoundConfig {
                target_radius,
                ..Default::default()
            };
            assert_eq!(rejected_field(config), "target_radius");
        }
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: RoundConfig = serde_json::from_str(r#"{ "initial_length": 3 }"#).unwrap();
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.segment_spacing, SEGMENT_SPACING);
    }
}
