//! Level model: a character map plus round parameters

use serde::{Deserialize, Serialize};

use super::Meta;
use crate::error::ConfigError;
use crate::sim::Direction;

/// Level file as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLevel {
    #[serde(default)]
    pub meta: Meta,
    pub targets: u32,
    pub width: usize,
    pub height: usize,
    pub start_dir: Direction,
    pub map: Vec<String>,
}

/// A validated level: every row is exactly `width` characters long and
/// there are exactly `height` rows.
#[derive(Debug, Clone)]
pub struct Level {
    pub meta: Meta,
    pub targets: u32,
    pub start_dir: Direction,
    width: usize,
    height: usize,
    map: Vec<Vec<char>>,
}

impl Level {
    pub fn new(level: JsonLevel) -> Result<Self, ConfigError> {
        if level.map.len() != level.height {
            return Err(ConfigError::HeightMismatch {
                expected: level.height,
                actual: level.map.len(),
            });
        }

        let mut map = Vec::with_capacity(level.height);
        for (row, line) in level.map.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != level.width {
                return Err(ConfigError::WidthMismatch {
                    row,
                    expected: level.width,
                    actual: chars.len(),
                });
            }
            map.push(chars);
        }

        Ok(Self {
            meta: level.meta,
            targets: level.targets,
            start_dir: level.start_dir,
            width: level.width,
            height: level.height,
            map,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: JsonLevel = serde_json::from_str(json)?;
        Self::new(level)
    }

    /// Build a level straight from map rows; width is taken from the first row.
    pub fn from_map(map: &[&str], targets: u32, start_dir: Direction) -> Result<Self, ConfigError> {
        Self::new(JsonLevel {
            meta: Meta::default(),
            targets,
            width: map.first().map(|row| row.chars().count()).unwrap_or(0),
            height: map.len(),
            start_dir,
            map: map.iter().map(|row| row.to_string()).collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major character rows
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.map.iter().map(Vec::as_slice)
    }

    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.map.get(row).and_then(|r| r.get(col)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_json() {
        let json = r##"{
            "$schema": "../../schema/level.json",
            "meta": { "name": "first", "author": "someone", "version": 2 },
            "targets": 3,
            "width": 4,
            "height": 2,
            "startDir": "E",
            "map": ["#S.#", "#.E#"]
        }"##;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.meta.name, "first");
        assert_eq!(level.targets, 3);
        assert_eq!(level.start_dir, Direction::E);
        assert_eq!((level.width(), level.height()), (4, 2));
        assert_eq!(level.char_at(1, 2), Some('E'));
        assert_eq!(level.char_at(2, 0), None);
    }

    #[test]
    fn test_height_mismatch() {
        let json = r###"{ "targets": 0, "width": 2, "height": 3, "startDir": "N", "map": ["##", "##"] }"###;
        match Level::from_json(json) {
            Err(ConfigError::HeightMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("expected height mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_width_mismatch_reports_row() {
        let err = Level::from_map(&["###", "#S", "###"], 0, Direction::N).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WidthMismatch { row: 1, expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_bad_direction_is_json_error() {
        let json = r##"{ "targets": 0, "width": 1, "height": 1, "startDir": "X", "map": ["#"] }"##;
        assert!(matches!(Level::from_json(json), Err(ConfigError::Json(_))));
    }
}
