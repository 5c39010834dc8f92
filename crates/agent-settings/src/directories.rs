//! Canonical agent directory layout.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoriesProvider {
    base_dir: PathBuf,
}

impl DirectoriesProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Primary persistent disk mount point.
    pub fn store_dir(&self) -> PathBuf {
        self.base_dir.join("store")
    }

    /// Where a second persistent disk lands while the primary slot is still occupied.
    pub fn store_migration_dir(&self) -> PathBuf {
        self.base_dir.join("store_migration_target")
    }

    /// Ephemeral disk mount point.
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base_dir.join("bosh").join("settings.json")
    }
}

impl Default for DirectoriesProvider {
    fn default() -> Self {
        Self::new("/var/vcap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_base_dir() {
        let dirs = DirectoriesProvider::new("/fake-base");
        assert_eq!(dirs.store_dir(), PathBuf::from("/fake-base/store"));
        assert_eq!(
            dirs.store_migration_dir(),
            PathBuf::from("/fake-base/store_migration_target")
        );
        assert_eq!(dirs.data_dir(), PathBuf::from("/fake-base/data"));
        assert_eq!(
            dirs.settings_path(),
            PathBuf::from("/fake-base/bosh/settings.json")
        );
    }

    #[test]
    fn default_base_is_var_vcap() {
        assert_eq!(DirectoriesProvider::default().base_dir(), Path::new("/var/vcap"));
    }
}
