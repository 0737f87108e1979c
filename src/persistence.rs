//! # Seed Persistence
//!
//! Only the seed survives between runs. Turn history and mid-game state are
//! never written; a world is rebuilt by generating from the stored seed.

use crate::{GameResult, Session};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Somewhere a seed can be kept between runs.
pub trait SeedStore {
    /// The stored seed, or None if nothing has been saved yet.
    fn load(&self) -> GameResult<Option<u32>>;

    /// Replaces the stored seed.
    fn save(&mut self, seed: u32) -> GameResult<()>;

    /// Remembers the seed of a running session.
    fn remember(&mut self, session: &Session) -> GameResult<()> {
        self.save(session.seed())
    }
}

/// On-disk format of a seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSeed {
    pub seed: u32,
}

/// Seed stored as `{"seed": N}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSeedFile {
    path: PathBuf,
}

impl JsonSeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedStore for JsonSeedFile {
    fn load(&self) -> GameResult<Option<u32>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let saved: SavedSeed = serde_json::from_str(&json)?;
        debug!("Loaded seed {} from {}", saved.seed, self.path.display());
        Ok(Some(saved.seed))
    }

    fn save(&mut self, seed: u32) -> GameResult<()> {
        let json = serde_json::to_string_pretty(&SavedSeed { seed })?;
        fs::write(&self.path, json)?;
        debug!("Saved seed {} to {}", seed, self.path.display());
        Ok(())
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySeedStore {
    seed: Option<u32>,
}

impl MemorySeedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeedStore for MemorySeedStore {
    fn load(&self) -> GameResult<Option<u32>> {
        Ok(self.seed)
    }

    fn save(&mut self, seed: u32) -> GameResult<()> {
        self.seed = Some(seed);
        Ok(())
    }
}
