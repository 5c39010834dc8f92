//! Fake disk capabilities for testing.
//!
//! Records every mount and mount point query without touching the system, and keeps a set
//! of "mounted" paths so later queries see earlier mounts.

use super::{DiskMounter, MountPoints};
use agent_error::{PlatformError, PlatformResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOperation {
    IsMountPoint { path: PathBuf },
    MountPersistentDisk { device: PathBuf, target: PathBuf },
}

#[derive(Debug, Default)]
struct FakeMountsState {
    operations: Vec<MountOperation>,
    mounted_paths: HashSet<PathBuf>,
    mount_error: Option<String>,
    check_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeMounts {
    state: Arc<Mutex<FakeMountsState>>,
}

impl FakeMounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `path` is already a mount point.
    pub fn with_mounted(self, path: impl Into<PathBuf>) -> Self {
        self.lock().mounted_paths.insert(path.into());
        self
    }

    pub fn fail_mount(&self, message: impl Into<String>) {
        self.lock().mount_error = Some(message.into());
    }

    pub fn fail_is_mount_point(&self, message: impl Into<String>) {
        self.lock().check_error = Some(message.into());
    }

    pub fn operations(&self) -> Vec<MountOperation> {
        self.lock().operations.clone()
    }

    pub fn operation_count(&self) -> usize {
        self.lock().operations.len()
    }

    /// `(device, target)` of every recorded mount, in order.
    pub fn mounts(&self) -> Vec<(PathBuf, PathBuf)> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MountOperation::MountPersistentDisk { device, target } => {
                    Some((device.clone(), target.clone()))
                }
                MountOperation::IsMountPoint { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.operations.clear();
        state.mounted_paths.clear();
    }

    fn lock(&self) -> MutexGuard<'_, FakeMountsState> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl MountPoints for FakeMounts {
    fn is_mount_point(&self, path: &Path) -> PlatformResult<bool> {
        let mut state = self.lock();
        state.operations.push(MountOperation::IsMountPoint {
            path: path.to_path_buf(),
        });
        if let Some(msg) = &state.check_error {
            return Err(PlatformError::Other(msg.clone()));
        }
        let mounted = state.mounted_paths.contains(path);
        log::info!("FAKE: is_mount_point({}) = {}", path.display(), mounted);
        Ok(mounted)
    }
}

impl DiskMounter for FakeMounts {
    fn mount_persistent_disk(&self, device_path: &Path, mount_point: &Path) -> PlatformResult<()> {
        let mut state = self.lock();
        state.operations.push(MountOperation::MountPersistentDisk {
            device: device_path.to_path_buf(),
            target: mount_point.to_path_buf(),
        });
        if let Some(msg) = &state.mount_error {
            return Err(PlatformError::Other(msg.clone()));
        }
        log::info!(
            "FAKE: mount {} -> {}",
            device_path.display(),
            mount_point.display()
        );
        state.mounted_paths.insert(mount_point.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_is_visible_to_later_queries() {
        let fake = FakeMounts::new();
        let target = Path::new("/var/vcap/store");

        assert!(!fake.is_mount_point(target).unwrap());
        fake.mount_persistent_disk(Path::new("/dev/sdb"), target)
            .unwrap();
        assert!(fake.is_mount_point(target).unwrap());

        assert_eq!(fake.operation_count(), 3);
        assert_eq!(
            fake.mounts(),
            vec![(PathBuf::from("/dev/sdb"), PathBuf::from("/var/vcap/store"))]
        );
    }

    #[test]
    fn injected_failures_are_still_recorded() {
        let fake = FakeMounts::new().with_mounted("/mnt");
        fake.fail_is_mount_point("mountinfo unreadable");
        fake.fail_mount("device busy");

        assert!(fake.is_mount_point(Path::new("/mnt")).is_err());
        assert!(fake
            .mount_persistent_disk(Path::new("/dev/sdb"), Path::new("/mnt"))
            .is_err());
        assert_eq!(fake.operation_count(), 2);
    }

    #[test]
    fn clear_forgets_everything() {
        let fake = FakeMounts::new().with_mounted("/mnt");
        let _ = fake.is_mount_point(Path::new("/mnt"));
        fake.clear();
        assert_eq!(fake.operation_count(), 0);
        assert!(!fake.is_mount_point(Path::new("/mnt")).unwrap());
    }
}
