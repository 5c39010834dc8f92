use super::MountPoints;
use crate::procfs::mountinfo;
use agent_error::PlatformResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Mount point inspector backed by a mountinfo file.
#[derive(Debug, Clone)]
pub struct ProcMountPoints {
    mountinfo_path: PathBuf,
}

impl ProcMountPoints {
    pub fn new(mountinfo_path: impl Into<PathBuf>) -> Self {
        Self {
            mountinfo_path: mountinfo_path.into(),
        }
    }
}

impl Default for ProcMountPoints {
    fn default() -> Self {
        Self::new("/proc/self/mountinfo")
    }
}

impl MountPoints for ProcMountPoints {
    fn is_mount_point(&self, path: &Path) -> PlatformResult<bool> {
        let content = fs::read_to_string(&self.mountinfo_path)?;
        let entries = mountinfo::parse_mountinfo(&content);
        match mountinfo::find_mount(path, &entries) {
            Some(entry) => {
                log::debug!(
                    "{} is a mount point ({} {})",
                    path.display(),
                    entry.fs_type,
                    entry.source
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_error::PlatformError;

    #[test]
    fn reports_mounted_and_unmounted_paths() {
        let dir = tempfile::tempdir().unwrap();
        let info = dir.path().join("mountinfo");
        fs::write(
            &info,
            "36 28 0:31 / / rw - ext4 /dev/sda1 rw\n\
             37 28 0:32 / /var/vcap/store rw - ext4 /dev/sdc rw\n",
        )
        .unwrap();

        let mounts = ProcMountPoints::new(&info);
        assert!(mounts.is_mount_point(Path::new("/var/vcap/store")).unwrap());
        assert!(!mounts
            .is_mount_point(Path::new("/var/vcap/store_migration_target"))
            .unwrap());
    }

    #[test]
    fn unreadable_mountinfo_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mounts = ProcMountPoints::new(dir.path().join("missing"));
        let err = mounts.is_mount_point(Path::new("/")).unwrap_err();
        assert!(matches!(err, PlatformError::Io(_)));
    }
}
