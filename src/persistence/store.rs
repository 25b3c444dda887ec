//! Save stores for [`MetaState`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bevy::prelude::*;
use ron::ser::PrettyConfig;

use super::error::{PersistenceError, Result};
use crate::core::MetaState;

/// Where progress is kept between runs.
///
/// `load` returns `None` when nothing has been saved yet.
pub trait MetaStore: Send + Sync {
    fn save(&self, meta: &MetaState) -> Result<()>;

    fn load(&self) -> Result<Option<MetaState>>;

    fn clear(&self) -> Result<()>;
}

/// RON file on disk, written through a temp file and an atomic rename.
pub struct RonFileStore {
    path: PathBuf,
}

impl RonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetaStore for RonFileStore {
    fn save(&self, meta: &MetaState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = ron::ser::to_string_pretty(meta, PrettyConfig::default())?;
        let temp_path = self.path.with_extension("ron.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("Saved progress to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<MetaState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let meta = ron::from_str(&contents)?;
        info!("Loaded progress from {}", self.path.display());
        Ok(Some(meta))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Deleted save file {}", self.path.display());
        }
        Ok(())
    }
}

/// In-memory store for tests and headless runs.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Option<MetaState>>,
}

impl MemoryStore {
    pub fn with_state(meta: MetaState) -> Self {
        Self {
            saved: Mutex::new(Some(meta)),
        }
    }
}

impl MetaStore for MemoryStore {
    fn save(&self, meta: &MetaState) -> Result<()> {
        let mut saved = self.saved.lock().map_err(|_| PersistenceError::LockPoisoned)?;
        *saved = Some(meta.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<MetaState>> {
        let saved = self.saved.lock().map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(saved.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut saved = self.saved.lock().map_err(|_| PersistenceError::LockPoisoned)?;
        *saved = None;
        Ok(())
    }
}
