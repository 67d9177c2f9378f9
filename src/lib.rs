//! Worm Gate - a tile-grid worm arcade game
//!
//! Core modules:
//! - `sim`: Round simulation (worm movement, collisions, targets, gates)
//! - `assets`: Level / tileset / spriteset models and their validation
//! - `platform`: Tick sources, input mapping and the browser binding
//! - `settings`: Tuning and control preferences

pub mod assets;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Distance the head travels per sub-step (pixels)
    pub const STEP_SIZE: f32 = 1.0;
    /// Distance kept between consecutive worm segments (pixels)
    pub const SEGMENT_SPACING: f32 = 8.0;
    /// Body segments grown when a round starts
    pub const INITIAL_LENGTH: u32 = 30;
    /// Head-vs-body hit radius (pixels), must stay below the spacing
    pub const SELF_COLLISION_RADIUS: f32 = 4.0;

    /// Base worm speed, in tiles per second
    pub const TILES_PER_SECOND: f32 = 1.0;
    /// Speed multiplier while the high speed signal is held
    pub const HIGH_SPEED_MULTIPLIER: f32 = 4.0;
    /// Speed gain per collected target (multiplicative)
    pub const SPEED_GAIN: f32 = 1.1;
    /// Segments added per collected target
    pub const GROWTH_PER_TARGET: u32 = 3;
    /// Longest frame gap fed into a single tick (ms)
    pub const MAX_TICK_MS: f64 = 100.0;
    /// Upper bound on head steps buffered between two segments
    pub const MAX_TRAIL_STEPS: f32 = 1024.0;
    /// Upper bound on body segments added at once (start or pickup)
    pub const MAX_INITIAL_LENGTH: u32 = 10_000;

    /// Target collision radius (pixels); the target box is twice this wide
    pub const TARGET_RADIUS: f32 = 8.0;
    /// Consecutive rejected samples before target placement gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
}
