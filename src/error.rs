use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinefieldError {
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} field")]
    IndexOutOfRange {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
    #[error("Open cell mine count must be within 0..=8, got {0}")]
    InvalidMineCount(u8),
    #[error("Failed to load sprite {path}: {source}")]
    SpriteLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Sprite {path} is {width}x{height}, expected {expected}x{expected}")]
    SpriteSize {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },
    #[error("Sprite sheet needs {expected} sprites, got {actual}")]
    SpriteCount { expected: usize, actual: usize },
    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    ConfigValue(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MinefieldError>;
