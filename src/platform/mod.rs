//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (`ticks`)
//! - Input events mapped to round signals (`input`)
//! - The browser binding driven from `requestAnimationFrame` (`web`)

pub mod input;
pub mod ticks;

#[cfg(target_arch = "wasm32")]
pub mod web;
