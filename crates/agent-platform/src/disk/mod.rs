//! Disk capabilities consumed by actions.

pub mod fake_mounts;
pub mod linux_mounter;
pub mod mount_points;

pub use fake_mounts::{FakeMounts, MountOperation};
pub use linux_mounter::LinuxDiskMounter;
pub use mount_points::ProcMountPoints;

use agent_error::PlatformResult;
use std::path::Path;

/// Answers whether a path currently has a filesystem mounted on it.
pub trait MountPoints: Send + Sync {
    fn is_mount_point(&self, path: &Path) -> PlatformResult<bool>;
}

/// Attaches a persistent disk's filesystem to a directory.
///
/// Not idempotent: callers must not mount onto an occupied target.
pub trait DiskMounter: Send + Sync {
    fn mount_persistent_disk(&self, device_path: &Path, mount_point: &Path) -> PlatformResult<()>;
}
