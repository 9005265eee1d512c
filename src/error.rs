use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {width}x{height}")]
    BoardTooSmall { width: usize, height: usize, min: usize },
    #[error("color count must be between 1 and {max}, got {got}")]
    ColorCount { got: u8, max: u8 },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("failed to access score file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("score file {path} is not valid")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
