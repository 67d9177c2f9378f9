//! Asset models: levels, tilesets and spritesets
//!
//! Fetching the JSON files is the page's job; this module only parses and
//! validates what it is handed, so a `Level` or `Tileset` that exists is
//! already consistent.

pub mod level;
pub mod sprites;
pub mod tileset;

pub use level::Level;
pub use sprites::{SpriteIndex, Spriteset};
pub use tileset::{SpriteKey, TileDef, TileKind, Tileset};

use serde::{Deserialize, Serialize};

/// Descriptive header carried by every asset file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: u32,
}

/// Width/height pair as written in asset files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}
