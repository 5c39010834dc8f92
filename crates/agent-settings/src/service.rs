//! Settings refresh service.

use crate::settings::{Disks, Networks, Settings};
use agent_error::{SettingsError, SettingsResult};
use std::fs;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Source of the agent's settings.
///
/// Implementations own their concurrency safety; callers may share one service across threads.
pub trait SettingsService: Send + Sync {
    /// Re-read settings from the backing source.
    fn load_settings(&self) -> SettingsResult<()>;

    /// Snapshot of the most recently loaded settings.
    fn settings(&self) -> Settings;

    fn disks(&self) -> Disks {
        self.settings().disks
    }

    fn networks(&self) -> Networks {
        self.settings().networks
    }
}

/// Settings backed by a JSON file on disk.
#[derive(Debug)]
pub struct FileSettingsService {
    path: PathBuf,
    current: RwLock<Settings>,
}

impl FileSettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Settings::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        match self.current.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SettingsService for FileSettingsService {
    fn load_settings(&self) -> SettingsResult<()> {
        let content = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })?;

        log::debug!(
            "Loaded settings from {} ({} persistent disk(s))",
            self.path.display(),
            settings.disks.persistent.len()
        );
        *self.write() = settings;
        Ok(())
    }

    fn settings(&self) -> Settings {
        self.read().clone()
    }
}
