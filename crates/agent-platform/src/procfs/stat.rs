//! Parsing helper for the aggregate `cpu` line of `/proc/stat`.

/// Jiffies since boot, folded the way the orchestrator reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub sys: u64,
    pub wait: u64,
    pub total: u64,
}

pub fn parse_cpu_ticks(content: &str) -> Option<CpuTicks> {
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))?;
    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    if values.len() < 4 {
        return None;
    }

    // user nice system idle iowait irq softirq steal ...
    let at = |i: usize| values.get(i).copied().unwrap_or(0);
    Some(CpuTicks {
        user: at(0) + at(1),
        sys: at(2) + at(5) + at(6),
        wait: at(4),
        total: values.iter().take(8).sum(),
    })
}
