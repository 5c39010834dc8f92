//! Platform that performs no OS effects.
//!
//! Used where agent side effects must be suppressed (sandboxes, dry runs) while keeping the
//! exact call contract of a real platform.

use super::Platform;
use crate::disk::{DiskMounter, MountPoints};
use crate::stats::{DummyStatsCollector, StatsCollector};
use agent_error::PlatformResult;
use agent_settings::Networks;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct DummyPlatform;

impl DummyPlatform {
    pub fn new() -> Self {
        Self
    }
}

/// Disk capabilities of the dummy platform: nothing is ever mounted, mounts succeed.
#[derive(Debug, Clone, Copy, Default)]
struct NoopDisks;

impl DiskMounter for NoopDisks {
    fn mount_persistent_disk(&self, device_path: &Path, mount_point: &Path) -> PlatformResult<()> {
        log::debug!(
            "dummy platform: skipping mount {} -> {}",
            device_path.display(),
            mount_point.display()
        );
        Ok(())
    }
}

impl MountPoints for NoopDisks {
    fn is_mount_point(&self, _path: &Path) -> PlatformResult<bool> {
        Ok(false)
    }
}

impl Platform for DummyPlatform {
    fn setup_ssh(&self, _public_key: &str, _username: &str) -> PlatformResult<()> {
        Ok(())
    }

    fn setup_dhcp(&self, _networks: &Networks) -> PlatformResult<()> {
        Ok(())
    }

    fn setup_ephemeral_disk_with_path(
        &self,
        _device_path: &Path,
        _mount_point: &Path,
    ) -> PlatformResult<()> {
        Ok(())
    }

    fn stats_collector(&self) -> Arc<dyn StatsCollector> {
        Arc::new(DummyStatsCollector)
    }

    fn disk_mounter(&self) -> Arc<dyn DiskMounter> {
        Arc::new(NoopDisks)
    }

    fn mount_points(&self) -> Arc<dyn MountPoints> {
        Arc::new(NoopDisks)
    }
}
