//! High score persistence
//!
//! Backends:
//! - `MemoryStore`: tests and throwaway runs
//! - `JsonFileStore`: native runner, one small JSON document on disk
//! - `LocalStorageStore`: browser LocalStorage (wasm only)
//!
//! Storage is never allowed to stop the game. `load_or_default` turns any
//! failure into a zero score with a warning.

use std::path::PathBuf;

use crate::error::StoreError;
use crate::highscores::HighScore;

/// Persistence collaborator for the best score
pub trait HighScoreStore {
    fn load(&mut self) -> Result<HighScore, StoreError>;
    fn save(&mut self, high_score: HighScore) -> Result<(), StoreError>;

    /// Load, falling back to an empty record
    fn load_or_default(&mut self) -> HighScore {
        match self.load() {
            Ok(hs) => {
                log::info!("Loaded high score {}", hs.best);
                hs
            }
            Err(e) => {
                log::warn!("No usable high score ({e}), starting fresh");
                HighScore::default()
            }
        }
    }
}

/// Keeps the score in memory only
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub stored: Option<HighScore>,
    /// Number of successful saves
    pub saves: u32,
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<HighScore, StoreError> {
        Ok(self.stored.unwrap_or_default())
    }

    fn save(&mut self, high_score: HighScore) -> Result<(), StoreError> {
        self.stored = Some(high_score);
        self.saves += 1;
        Ok(())
    }
}

/// JSON file on disk. A missing file reads as an empty record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<HighScore, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HighScore::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, high_score: HighScore) -> Result<(), StoreError> {
        // Write beside the target, then swap in
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_string(&high_score)?)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", high_score.best, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "gold_rush_highscore";
}

/// The window's LocalStorage, if the browser grants it
#[cfg(target_arch = "wasm32")]
pub(crate) fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StoreError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<HighScore, StoreError> {
        let storage = local_storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(serde_json::from_str(&json)?),
            Ok(None) => Ok(HighScore::default()),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn save(&mut self, high_score: HighScore) -> Result<(), StoreError> {
        let storage = local_storage()?;
        let json = serde_json::to_string(&high_score)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable)?;
        log::info!("High score {} saved", high_score.best);
        Ok(())
    }
}
