//! Stats collector reading `/proc` and `statvfs`.

use super::{CpuLoad, CpuStats, DiskStats, StatsCollector, Usage};
use crate::procfs::{loadavg, meminfo, stat};
use agent_error::{PlatformError, PlatformResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProcStatsCollector {
    proc_root: PathBuf,
}

impl ProcStatsCollector {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    fn read(&self, name: &str) -> PlatformResult<String> {
        Ok(fs::read_to_string(self.proc_root.join(name))?)
    }

    fn meminfo(&self) -> PlatformResult<meminfo::MemInfo> {
        meminfo::parse_meminfo(&self.read("meminfo")?)
            .ok_or_else(|| PlatformError::Parse("meminfo: missing MemTotal".to_string()))
    }
}

impl Default for ProcStatsCollector {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl StatsCollector for ProcStatsCollector {
    fn cpu_load(&self) -> PlatformResult<CpuLoad> {
        let (one, five, fifteen) = loadavg::parse_loadavg(&self.read("loadavg")?)
            .ok_or_else(|| PlatformError::Parse("loadavg".to_string()))?;
        Ok(CpuLoad { one, five, fifteen })
    }

    fn cpu_stats(&self) -> PlatformResult<CpuStats> {
        let ticks = stat::parse_cpu_ticks(&self.read("stat")?)
            .ok_or_else(|| PlatformError::Parse("stat: no aggregate cpu line".to_string()))?;
        Ok(CpuStats {
            user: ticks.user,
            sys: ticks.sys,
            wait: ticks.wait,
            total: ticks.total,
        })
    }

    fn mem_stats(&self) -> PlatformResult<Usage> {
        let info = self.meminfo()?;
        Ok(Usage {
            used: info.mem_used_kb() * 1024,
            total: info.mem_total_kb * 1024,
        })
    }

    fn swap_stats(&self) -> PlatformResult<Usage> {
        let info = self.meminfo()?;
        Ok(Usage {
            used: info.swap_used_kb() * 1024,
            total: info.swap_total_kb * 1024,
        })
    }

    fn disk_stats(&self, mount_point: &Path) -> PlatformResult<DiskStats> {
        let vfs = nix::sys::statvfs::statvfs(mount_point)?;
        let frag = vfs.fragment_size() as u64;
        let blocks = vfs.blocks() as u64;
        let blocks_free = vfs.blocks_free() as u64;
        let files = vfs.files() as u64;
        let files_free = vfs.files_free() as u64;

        Ok(DiskStats {
            disk_usage: Usage {
                used: blocks.saturating_sub(blocks_free) * frag,
                total: blocks * frag,
            },
            inode_usage: Usage {
                used: files.saturating_sub(files_free),
                total: files,
            },
        })
    }
}
