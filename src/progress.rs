//! Level progress persistence
//!
//! Only one number survives between sessions: the level the player resumes
//! at. Stores are pluggable so the simulation never touches a filesystem or
//! browser API directly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid progress JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere to keep the level a player resumes at
pub trait ProgressStore {
    /// Saved level, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<u32>, ProgressError>;

    fn save(&mut self, level: u32) -> Result<(), ProgressError>;
}

/// On-disk/LocalStorage document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ProgressRecord {
    level_progress: u32,
}

impl ProgressRecord {
    fn parse(json: &str) -> Result<u32, ProgressError> {
        let record: ProgressRecord = serde_json::from_str(json)?;
        Ok(record.level_progress)
    }

    fn encode(level: u32) -> Result<String, ProgressError> {
        Ok(serde_json::to_string(&ProgressRecord {
            level_progress: level,
        })?)
    }
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    level: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: u32) -> Self {
        Self { level: Some(level) }
    }

    pub fn level(&self) -> Option<u32> {
        self.level
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, ProgressError> {
        Ok(self.level)
    }

    fn save(&mut self, level: u32) -> Result<(), ProgressError> {
        self.level = Some(level);
        Ok(())
    }
}

/// JSON file store
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> Result<Option<u32>, ProgressError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => ProgressRecord::parse(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, level: u32) -> Result<(), ProgressError> {
        let json = ProgressRecord::encode(level)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Saved level {} to {}", level, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    const STORAGE_KEY: &'static str = "rink_hockey_progress";

    fn storage() -> Result<web_sys::Storage, ProgressError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| ProgressError::Unavailable("no LocalStorage".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStore for LocalStore {
    fn load(&self) -> Result<Option<u32>, ProgressError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => ProgressRecord::parse(&json).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(ProgressError::Unavailable(format!("{:?}", e))),
        }
    }

    fn save(&mut self, level: u32) -> Result<(), ProgressError> {
        let storage = Self::storage()?;
        let json = ProgressRecord::encode(level)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| ProgressError::Unavailable(format!("{:?}", e)))
    }
}
