use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::LINE_SCORES;
use crate::error::ScoreStoreError;

/// Points for clearing `rows` rows with one piece.
pub fn line_clear_points(rows: usize) -> u32 {
    match rows {
        0 => 0,
        n => LINE_SCORES[n.min(LINE_SCORES.len()) - 1],
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
struct ScoreRecord {
    max_score: u32,
}

/// Best score across games, optionally backed by a JSON file.
#[derive(Debug, Default)]
pub struct HighScore {
    best: u32,
    path: Option<PathBuf>,
}

impl HighScore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Reads the best score from `path`. A missing file counts as 0.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScoreStoreError> {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(text) => {
                let record: ScoreRecord = serde_json::from_str(&text).map_err(|source| {
                    ScoreStoreError::Format { path: path.clone(), source }
                })?;
                record.max_score
            }
            Err(err) if err.kind() == ErrorKind::NotFound => 0,
            Err(source) => return Err(ScoreStoreError::Io { path, source }),
        };
        debug!(best, path = %path.display(), "loaded high score");
        Ok(Self { best, path: Some(path) })
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Compares `score` with the best so far and persists a new maximum.
    /// Returns whether the best score went up.
    pub fn record(&mut self, score: u32) -> Result<bool, ScoreStoreError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        if let Some(path) = &self.path {
            let record = ScoreRecord { max_score: score };
            let text = serde_json::to_string(&record).map_err(|source| ScoreStoreError::Format {
                path: path.clone(),
                source,
            })?;
            if let Err(source) = fs::write(path, text) {
                warn!(path = %path.display(), "could not save high score");
                return Err(ScoreStoreError::Io { path: path.clone(), source });
            }
        }
        Ok(true)
    }
}
