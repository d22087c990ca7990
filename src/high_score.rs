//! Durable best score.
//!
//! The file format is a small JSON document, `{"high_score": 1200}`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {} is not valid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere a best score can be read from and written back to.
pub trait HighScoreStore {
    /// The stored score; 0 when nothing has been saved yet.
    fn load(&self) -> Result<u32, HighScoreError>;
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;

    /// Like [`HighScoreStore::load`], but a broken store reads as 0 with a warning.
    fn load_or_default(&self) -> u32 {
        self.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not load high score, starting from 0");
            0
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file on disk. The parent directory is created on first save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> HighScoreError {
        HighScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_err(e)),
        };
        let file: HighScoreFile =
            serde_json::from_str(&text).map_err(|source| HighScoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_string(&HighScoreFile { high_score: score }).map_err(|source| {
            HighScoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_err(e))
    }
}

/// Keeps the score for the life of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u32,
}

impl MemoryStore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, HighScoreError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        self.score = score;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), 0);
        store.save(700).unwrap();
        assert_eq!(store.load_or_default(), 700);
    }
}
