//! Host statistics reported back to the orchestrator.

pub mod dummy;
pub mod proc_collector;

pub use dummy::DummyStatsCollector;
pub use proc_collector::ProcStatsCollector;

use agent_error::PlatformResult;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuLoad {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Cumulative CPU ticks since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuStats {
    pub user: u64,
    pub sys: u64,
    pub wait: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub used: u64,
    pub total: u64,
}

impl Usage {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskStats {
    /// Bytes.
    pub disk_usage: Usage,
    pub inode_usage: Usage,
}

pub trait StatsCollector: Send + Sync {
    fn cpu_load(&self) -> PlatformResult<CpuLoad>;

    fn cpu_stats(&self) -> PlatformResult<CpuStats>;

    /// Bytes.
    fn mem_stats(&self) -> PlatformResult<Usage>;

    /// Bytes.
    fn swap_stats(&self) -> PlatformResult<Usage>;

    fn disk_stats(&self, mount_point: &Path) -> PlatformResult<DiskStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_percent_handles_empty_total() {
        assert_eq!(Usage::default().percent(), 0.0);
        assert_eq!(Usage { used: 25, total: 100 }.percent(), 25.0);
    }
}
