//! High score persistence
//!
//! The only durable state is a single number. It is read once when the clock
//! is created and written whenever a finished session beats it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "snake_arcade";
const HIGH_SCORE_FILE: &str = "high_score.json";

/// Durable key-value home of the high score
pub trait HighScoreStore {
    /// Stored high score, zero when nothing has been saved yet
    fn load(&self) -> Result<u32>;

    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// Keeps the score for the lifetime of the process only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.high_score = high_score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// JSON document on disk, `{"high_score": n}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory
    /// (`~/.local/share/snake_arcade/high_score.json` on Linux)
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(HIGH_SCORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("Malformed high score file {:?}", self.path))?;

        Ok(record.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score })
            .context("Failed to serialize high score")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// Application data directory, created lazily by the writers
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .context("Could not determine a data directory")?;
    Ok(base.join(APP_DIR))
}
