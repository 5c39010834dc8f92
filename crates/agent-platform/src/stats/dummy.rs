use super::{CpuLoad, CpuStats, DiskStats, StatsCollector, Usage};
use agent_error::PlatformResult;
use std::path::Path;

/// Collector that reports zero for everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyStatsCollector;

impl StatsCollector for DummyStatsCollector {
    fn cpu_load(&self) -> PlatformResult<CpuLoad> {
        Ok(CpuLoad::default())
    }

    fn cpu_stats(&self) -> PlatformResult<CpuStats> {
        Ok(CpuStats::default())
    }

    fn mem_stats(&self) -> PlatformResult<Usage> {
        Ok(Usage::default())
    }

    fn swap_stats(&self) -> PlatformResult<Usage> {
        Ok(Usage::default())
    }

    fn disk_stats(&self, _mount_point: &Path) -> PlatformResult<DiskStats> {
        Ok(DiskStats::default())
    }
}
