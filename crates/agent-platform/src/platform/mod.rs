//! Platform capability set.
//!
//! Callers hold one `Arc<dyn Platform>` and never branch on which implementation it is.

pub mod dummy_platform;
pub mod linux_platform;

pub use dummy_platform::DummyPlatform;
pub use linux_platform::{LinuxOptions, LinuxPlatform};

use crate::disk::{DiskMounter, MountPoints};
use crate::stats::StatsCollector;
use agent_error::PlatformResult;
use agent_settings::Networks;
use std::path::Path;
use std::sync::Arc;

pub trait Platform: Send + Sync {
    /// Install `public_key` as the sole authorized key for `username`.
    fn setup_ssh(&self, public_key: &str, username: &str) -> PlatformResult<()>;

    /// Point the DHCP client at the DNS servers of the default network.
    fn setup_dhcp(&self, networks: &Networks) -> PlatformResult<()>;

    /// Prepare `mount_point` and mount the ephemeral disk on it.
    ///
    /// An empty `device_path` means the VM has no ephemeral disk; only the directory is
    /// created.
    fn setup_ephemeral_disk_with_path(
        &self,
        device_path: &Path,
        mount_point: &Path,
    ) -> PlatformResult<()>;

    fn stats_collector(&self) -> Arc<dyn StatsCollector>;

    fn disk_mounter(&self) -> Arc<dyn DiskMounter>;

    fn mount_points(&self) -> Arc<dyn MountPoints>;
}
