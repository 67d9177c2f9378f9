//! Spriteset index used to validate sprite ids referenced by tilesets
//!
//! Only sprite *names* matter to the simulation; frame geometry is left to
//! the renderer, so sprite bodies are kept as raw JSON.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Meta;
use crate::error::ConfigError;

/// Spriteset file as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spriteset {
    pub meta: Meta,
    #[serde(default)]
    pub standard_sprite_size: Option<f32>,
    pub sprites: BTreeMap<String, serde_json::Value>,
}

impl Spriteset {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All addressable sprite names.
    ///
    /// Static (`cell` or `pos`+`dim`) and animated (`frames`) sprites are
    /// addressed by their own name; a multi-part sprite exposes one name per
    /// part, e.g. `wall.NW`.
    pub fn sprite_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for (name, body) in &self.sprites {
            match body.as_object() {
                Some(obj) if !is_single_sprite(obj) => {
                    for part in obj.keys() {
                        names.insert(format!("{}.{}", name, part));
                    }
                }
                _ => {
                    names.insert(name.clone());
                }
            }
        }
        names
    }
}

fn is_single_sprite(obj: &serde_json::Map<String, serde_json::Value>) -> bool {
    obj.contains_key("cell")
        || obj.contains_key("frames")
        || (obj.contains_key("pos") && obj.contains_key("dim"))
}

/// Lookup of `<spriteset>/<name>` ids across loaded spritesets
#[derive(Debug, Clone, Default)]
pub struct SpriteIndex {
    sets: BTreeMap<String, BTreeSet<String>>,
}

impl SpriteIndex {
    pub fn new<'a>(spritesets: impl IntoIterator<Item = &'a Spriteset>) -> Self {
        let mut sets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for spriteset in spritesets {
            sets.entry(spriteset.meta.name.clone())
                .or_default()
                .extend(spriteset.sprite_names());
        }
        Self { sets }
    }

    /// Split and check a sprite id, returning `(spriteset, name)`
    pub fn resolve<'a>(&self, id: &'a str) -> Result<(&'a str, &'a str), ConfigError> {
        let (spriteset, name) = split_id(id)?;
        let Some(names) = self.sets.get(spriteset) else {
            return Err(ConfigError::UnknownSpriteset {
                spriteset: spriteset.to_string(),
                id: id.to_string(),
            });
        };
        if !names.contains(name) {
            return Err(ConfigError::SpriteNotFound {
                spriteset: spriteset.to_string(),
                name: name.to_string(),
            });
        }
        Ok((spriteset, name))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_ok()
    }
}

/// `(spriteset, name)` of a `<spriteset>/<name>` id
pub(crate) fn split_id(id: &str) -> Result<(&str, &str), ConfigError> {
    let mut parts = id.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(spriteset), Some(name), None) if !spriteset.is_empty() && !name.is_empty() => {
            Ok((spriteset, name))
        }
        _ => Err(ConfigError::MalformedSpriteId(id.to_string())),
    }
}
