//! Tileset model: maps level characters to tile definitions

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprites::{SpriteIndex, split_id};
use super::{Dimensions, Meta};
use crate::error::ConfigError;

/// Gameplay role of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Wall,
    Floor,
    Start,
    Exit,
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Wall => "wall",
            TileKind::Floor => "floor",
            TileKind::Start => "start",
            TileKind::Exit => "exit",
        }
    }

    /// Start and exit tiles are gates with open/closed states
    pub fn is_openable(&self) -> bool {
        matches!(self, TileKind::Start | TileKind::Exit)
    }
}

/// Sprite reference: a single `<spriteset>/<name>` id or a stack of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpriteKey {
    Single(String),
    Stacked(Vec<String>),
}

impl SpriteKey {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        let ids = match self {
            SpriteKey::Single(id) => std::slice::from_ref(id),
            SpriteKey::Stacked(ids) => ids.as_slice(),
        };
        ids.iter().map(String::as_str)
    }
}

/// Tile definition as written in a tileset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileDef {
    Openable {
        #[serde(rename = "type")]
        kind: TileKind,
        open: SpriteKey,
        closed: SpriteKey,
    },
    Basic {
        #[serde(rename = "type")]
        kind: TileKind,
        sprite: SpriteKey,
    },
}

impl TileDef {
    pub fn kind(&self) -> TileKind {
        match self {
            TileDef::Openable { kind, .. } | TileDef::Basic { kind, .. } => *kind,
        }
    }

    fn sprite_keys(&self) -> Vec<&SpriteKey> {
        match self {
            TileDef::Openable { open, closed, .. } => vec![open, closed],
            TileDef::Basic { sprite, .. } => vec![sprite],
        }
    }
}

/// Tileset file as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTileset {
    #[serde(default)]
    pub meta: Meta,
    pub tile_dimensions: Dimensions,
    /// Spriteset collections to load, keyed by collection name
    #[serde(default)]
    pub spritesets: BTreeMap<String, Vec<String>>,
    pub tiles: BTreeMap<String, TileDef>,
    #[serde(default)]
    pub target: Option<String>,
}

/// A validated tileset.
///
/// Every key is a single character and every start/exit definition carries
/// both gate visuals (and only those do).
#[derive(Debug, Clone)]
pub struct Tileset {
    pub meta: Meta,
    pub spritesets: BTreeMap<String, Vec<String>>,
    tile_size: Vec2,
    tiles: BTreeMap<char, TileDef>,
    target: Option<String>,
}

impl Tileset {
    pub fn new(tileset: JsonTileset) -> Result<Self, ConfigError> {
        let Dimensions { width, height } = tileset.tile_dimensions;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidTileDimensions { width, height });
        }

        let mut tiles = BTreeMap::new();
        for (key, def) in tileset.tiles {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => return Err(ConfigError::InvalidTileKey(key)),
            };

            let kind = def.kind();
            match (&def, kind.is_openable()) {
                (TileDef::Openable { .. }, false) => {
                    return Err(ConfigError::GateMismatch {
                        ch,
                        kind: kind.as_str(),
                        found: "open/closed sprites",
                    });
                }
                (TileDef::Basic { .. }, true) => {
                    return Err(ConfigError::GateMismatch {
                        ch,
                        kind: kind.as_str(),
                        found: "a single sprite",
                    });
                }
                _ => {}
            }
            for sprite in def.sprite_keys() {
                for id in sprite.ids() {
                    split_id(id)?;
                }
            }
            tiles.insert(ch, def);
        }
        if let Some(id) = &tileset.target {
            split_id(id)?;
        }

        Ok(Self {
            meta: tileset.meta,
            spritesets: tileset.spritesets,
            tile_size: Vec2::new(width, height),
            tiles,
            target: tileset.target,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tileset: JsonTileset = serde_json::from_str(json)?;
        Self::new(tileset)
    }

    /// Pixel size of one tile
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn get(&self, ch: char) -> Result<&TileDef, ConfigError> {
        self.tiles.get(&ch).ok_or(ConfigError::UnknownTileChar(ch))
    }

    /// Sprite id drawn for targets
    pub fn target_sprite(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Spriteset files this tileset draws from, across all collections
    pub fn spriteset_files(&self) -> impl Iterator<Item = &str> {
        self.spritesets.values().flatten().map(String::as_str)
    }

    /// Verify every sprite id the tileset references exists in `index`
    pub fn check_sprites(&self, index: &SpriteIndex) -> Result<(), ConfigError> {
        for def in self.tiles.values() {
            for key in def.sprite_keys() {
                for id in key.ids() {
                    index.resolve(id)?;
                }
            }
        }
        if let Some(id) = &self.target {
            index.resolve(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures;

    #[test]
    fn test_fixture_tileset() {
        let tileset = fixtures::tileset();
        assert_eq!(tileset.tile_size(), Vec2::new(32.0, 32.0));
        assert_eq!(tileset.get('#').unwrap().kind(), TileKind::Wall);
        assert_eq!(tileset.get('S').unwrap().kind(), TileKind::Start);
        assert!(matches!(tileset.get('E').unwrap(), TileDef::Openable { .. }));
        assert_eq!(tileset.target_sprite(), Some("tiles/apple"));
        assert!(matches!(tileset.get('x'), Err(ConfigError::UnknownTileChar('x'))));
    }

    #[test]
    fn test_stacked_sprite() {
        let json = r#"{
            "tileDimensions": { "width": 16, "height": 16 },
            "tiles": { "w": { "type": "wall", "sprite": ["a/base", "a/moss"] } }
        }"#;
        let tileset = Tileset::from_json(json).unwrap();
        match tileset.get('w').unwrap() {
            TileDef::Basic { sprite, .. } => {
                assert_eq!(sprite.ids().collect::<Vec<_>>(), vec!["a/base", "a/moss"]);
            }
            other => panic!("expected basic tile, got {:?}", other),
        }
    }

    #[test]
    fn test_sprite_without_spriteset_rejected() {
        let json = r##"{
            "tileDimensions": { "width": 16, "height": 16 },
            "tiles": { "#": { "type": "wall", "sprite": "wall" } }
        }"##;
        assert!(matches!(
            Tileset::from_json(json),
            Err(ConfigError::MalformedSpriteId(id)) if id == "wall"
        ));
    }

    #[test]
    fn test_malformed_gate_and_target_sprites_rejected() {
        let gate = r#"{
            "tileDimensions": { "width": 16, "height": 16 },
            "tiles": { "E": { "type": "exit", "open": "a/exit", "closed": ["a/base", "x"] } }
        }"#;
        assert!(matches!(
            Tileset::from_json(gate),
            Err(ConfigError::MalformedSpriteId(id)) if id == "x"
        ));

        let target = r#"{
            "tileDimensions": { "width": 16, "height": 16 },
            "tiles": {},
            "target": "a/b/c"
        }"#;
        assert!(matches!(
            Tileset::from_json(target),
            Err(ConfigError::MalformedSpriteId(_))
        ));
    }

    #[test]
    fn test_multi_char_key_rejected() {
        let json = r#"{
            "tileDimensions": { "width": 16, "height": 16 },
            "tiles": { "ww": { "type": "wall", "sprite": "a/wall" } }
        }"#;
        assert!(matches!(
            Tileset::from_json(json),
            Err(ConfigError::InvalidTileKey(key)) if key == "ww"
        ));
    }

    #[test]
    fn test_start_without_gate_sprites_rejected() {
        let json = r#"{
            "tileDimensions": { "width": 16, "height": 16 },
            "tiles": { "S": { "type": "start", "sprite": "a/start" } }
        }"#;
        assert!(matches!(
            Tileset::from_json(json),
            Err(ConfigError::GateMismatch { ch: 'S', .. })
        ));
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let json = r#"{
            "tileDimensions": { "width": 0, "height": 16 },
            "tiles": {}
        }"#;
        assert!(matches!(
            Tileset::from_json(json),
            Err(ConfigError::InvalidTileDimensions { .. })
        ));
    }
}
