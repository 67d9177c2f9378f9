//! Error types shared by asset loading and the round simulation

/// Fatal problems in level, tileset or spriteset data.
///
/// Raised while building a level; the caller aborts the level load.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected height: expected {expected}, actual {actual}")]
    HeightMismatch { expected: usize, actual: usize },
    #[error("unexpected line width in line {row}: expected {expected}, actual {actual}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("no tile for char '{0}'")]
    UnknownTileChar(char),
    #[error("tile key {0:?} must be exactly one character")]
    InvalidTileKey(String),
    #[error("tile '{ch}' of type {kind} declares {found}")]
    GateMismatch {
        ch: char,
        kind: &'static str,
        found: &'static str,
    },
    #[error("invalid tile dimensions {width}x{height}")]
    InvalidTileDimensions { width: f32, height: f32 },
    #[error("no start tile found")]
    MissingStart,
    #[error("found {0} start tiles, expected exactly one")]
    MultipleStarts(usize),
    #[error("no exit tile found")]
    MissingExit,
    #[error("unexpected sprite format {0:?}, expected <spriteset>/<name>")]
    MalformedSpriteId(String),
    #[error("unknown spriteset {spriteset:?} in sprite id {id:?}")]
    UnknownSpriteset { spriteset: String, id: String },
    #[error("spriteset {spriteset:?} has no sprite named {name:?}")]
    SpriteNotFound { spriteset: String, name: String },
    #[error("invalid tuning: {field} = {value} ({reason})")]
    InvalidTuning {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Errors raised while a round is built or simulated.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("did not find a free target position after {attempts} attempts")]
    PlacementExhausted { attempts: u32 },
    #[error("can not call {op} on disposed {entity}")]
    Disposed {
        entity: &'static str,
        op: &'static str,
    },
    #[error("round already started")]
    AlreadyStarted,
    #[error("round is not running")]
    NotRunning,
}
