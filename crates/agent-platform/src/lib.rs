//! Host agent platform layer.
//!
//! Everything that touches the OS (spawning commands, mounting, writing system config,
//! reading `/proc`) goes through the traits in this crate so actions can run against a
//! real Linux host, a no-op platform, or recording fakes without code changes.

pub mod cmd;
pub mod disk;
pub mod platform;
pub mod procfs;
pub mod stats;

pub use agent_error::{PlatformError, PlatformResult};
pub use cmd::{CmdOutput, CmdRunner, ExecCmdRunner, FakeCmdRunner, RecordedCommand};
pub use disk::{
    DiskMounter, FakeMounts, LinuxDiskMounter, MountOperation, MountPoints, ProcMountPoints,
};
pub use platform::{DummyPlatform, LinuxOptions, LinuxPlatform, Platform};
pub use stats::{
    CpuLoad, CpuStats, DiskStats, DummyStatsCollector, ProcStatsCollector, StatsCollector, Usage,
};
