//! Persistent disk mounting on Linux via `blkid`, `mkfs.ext4` and `mount`.

use super::DiskMounter;
use crate::cmd::{path_arg, CmdRunner};
use agent_error::{PlatformError, PlatformResult};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const FORMAT_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const MOUNT_TIMEOUT: Duration = Duration::from_secs(60);

const FS_TYPE: &str = "ext4";

#[derive(Clone)]
pub struct LinuxDiskMounter {
    runner: Arc<dyn CmdRunner>,
}

impl LinuxDiskMounter {
    pub fn new(runner: Arc<dyn CmdRunner>) -> Self {
        Self { runner }
    }

    /// Filesystem type on `device`, or `None` for a blank device.
    pub fn filesystem_type(&self, device: &Path) -> PlatformResult<Option<String>> {
        let dev = path_arg(device)?;
        match self.runner.run_command(
            "blkid",
            &["-p", "-s", "TYPE", "-o", "value", dev],
            PROBE_TIMEOUT,
        ) {
            Ok(out) => {
                let fs_type = out.stdout.trim();
                Ok((!fs_type.is_empty()).then(|| fs_type.to_string()))
            }
            // blkid exits 2 when nothing was detected.
            Err(PlatformError::CommandFailed { code: Some(2), .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create `mount_point`, put an ext4 filesystem on a blank `device`, then mount it.
    pub fn format_and_mount(&self, device: &Path, mount_point: &Path) -> PlatformResult<()> {
        fs::create_dir_all(mount_point)?;

        let dev = path_arg(device)?;
        match self.filesystem_type(device)? {
            Some(existing) => log::debug!("{} already has a {} filesystem", dev, existing),
            None => {
                log::info!("Formatting {} as {}", dev, FS_TYPE);
                self.runner
                    .run_command("mkfs.ext4", &["-F", dev], FORMAT_TIMEOUT)?;
            }
        }

        let target = path_arg(mount_point)?;
        log::info!("Mounting {} at {}", dev, target);
        self.runner
            .run_command("mount", &["-t", FS_TYPE, dev, target], MOUNT_TIMEOUT)?;
        Ok(())
    }
}

impl std::fmt::Debug for LinuxDiskMounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinuxDiskMounter").finish_non_exhaustive()
    }
}

impl DiskMounter for LinuxDiskMounter {
    fn mount_persistent_disk(&self, device_path: &Path, mount_point: &Path) -> PlatformResult<()> {
        self.format_and_mount(device_path, mount_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::FakeCmdRunner;

    fn blkid(dev: &str) -> String {
        format!("blkid -p -s TYPE -o value {dev}")
    }

    #[test]
    fn formats_blank_device_before_mounting() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("store");
        let runner = FakeCmdRunner::new();
        runner.add_failure(&blkid("/dev/sdc"), Some(2), "");

        let mounter = LinuxDiskMounter::new(Arc::new(runner.clone()));
        mounter
            .mount_persistent_disk(Path::new("/dev/sdc"), &target)
            .unwrap();

        assert!(target.is_dir());
        assert_eq!(
            runner.command_lines(),
            vec![
                blkid("/dev/sdc"),
                "mkfs.ext4 -F /dev/sdc".to_string(),
                format!("mount -t ext4 /dev/sdc {}", target.display()),
            ]
        );
    }

    #[test]
    fn keeps_existing_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeCmdRunner::new();
        runner.add_output(&blkid("/dev/sdc"), "ext4\n");

        let mounter = LinuxDiskMounter::new(Arc::new(runner.clone()));
        mounter
            .mount_persistent_disk(Path::new("/dev/sdc"), dir.path())
            .unwrap();

        assert!(!runner
            .command_lines()
            .iter()
            .any(|c| c.starts_with("mkfs")));
    }

    #[test]
    fn mount_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeCmdRunner::new();
        runner.add_output(&blkid("/dev/sdc"), "ext4\n");
        runner.add_failure(
            &format!("mount -t ext4 /dev/sdc {}", dir.path().display()),
            Some(32),
            "already mounted",
        );

        let mounter = LinuxDiskMounter::new(Arc::new(runner));
        let err = mounter
            .mount_persistent_disk(Path::new("/dev/sdc"), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("already mounted"));
    }

    #[test]
    fn probe_failure_other_than_blank_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeCmdRunner::new();
        runner.add_failure(&blkid("/dev/sdc"), Some(4), "usage");

        let mounter = LinuxDiskMounter::new(Arc::new(runner.clone()));
        assert!(mounter
            .mount_persistent_disk(Path::new("/dev/sdc"), dir.path())
            .is_err());
        assert_eq!(runner.commands().len(), 1);
    }
}
