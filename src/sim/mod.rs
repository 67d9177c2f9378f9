//! Deterministic simulation module
//!
//! All round logic lives here. This module must stay pure and deterministic:
//! - Time only enters through `Round::tick(now_ms)`
//! - Seeded RNG only
//! - Stable iteration order (row-major tiles, chain-ordered segments)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod grid;
pub mod lifecycle;
pub mod round;
pub mod state;
pub mod target;
pub mod tick;
pub mod trail;
pub mod worm;

pub use autopilot::choose_direction;
pub use clock::{TickInput, TickSource};
pub use grid::{Cell, Grid, Tile};
pub use round::Round;
pub use state::{
    Direction, InputSignal, RoundConfig, RoundEvent, RoundPhase, RoundResult, RoundStatus,
};
pub use target::{Target, TargetPositioner};
pub use trail::TrailBuffer;
pub use worm::Worm;

/// Tuning used by round tests: 32px tiles at 1px per ms, segments 4px apart
#[cfg(test)]
pub(crate) fn test_config() -> RoundConfig {
    RoundConfig {
        step_size: 1.0,
        segment_spacing: 4.0,
        initial_length: 0,
        tiles_per_second: 31.25,
        ..Default::default()
    }
}
