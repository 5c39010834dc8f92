//! Host agent entry point: wires settings, platform and actions for one invocation.

pub mod cli;
pub mod config;
pub mod logging;

use agent_action::{Action, MountDiskAction};
use agent_platform::{
    DummyPlatform, ExecCmdRunner, LinuxOptions, LinuxPlatform, Platform, StatsCollector,
};
use agent_settings::{FileSettingsService, SettingsService};
use anyhow::Context;
use clap::Parser;
use cli::{Command, PlatformKind};
use config::Config;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

pub fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init();

    let config = Config::from_cli(&cli);
    let platform = build_platform(config.platform);
    let settings: Arc<dyn SettingsService> =
        Arc::new(FileSettingsService::new(config.settings_path.clone()));

    let value = execute(&config, platform.as_ref(), settings, &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn build_platform(kind: PlatformKind) -> Arc<dyn Platform> {
    match kind {
        PlatformKind::Linux => Arc::new(LinuxPlatform::new(
            LinuxOptions::default(),
            Arc::new(ExecCmdRunner::new()),
        )),
        PlatformKind::Dummy => Arc::new(DummyPlatform::new()),
    }
}

pub fn execute(
    config: &Config,
    platform: &dyn Platform,
    settings: Arc<dyn SettingsService>,
    command: &Command,
) -> anyhow::Result<Value> {
    let dirs = config.directories();

    match command {
        Command::MountDisk { disk_cid } => {
            let action = MountDiskAction::from_platform(settings, platform, dirs);
            log::debug!(
                "mount_disk: asynchronous={} persistent={}",
                action.is_asynchronous(),
                action.is_persistent()
            );
            action
                .run(&[json!(disk_cid)])
                .with_context(|| format!("mount_disk {}", disk_cid))
        }
        Command::SetupSsh { user, key } => {
            platform
                .setup_ssh(key, user)
                .with_context(|| format!("Setting up ssh for {}", user))?;
            Ok(json!({}))
        }
        Command::SetupDhcp => {
            settings.load_settings().context("Refreshing the settings")?;
            platform
                .setup_dhcp(&settings.networks())
                .context("Setting up DHCP")?;
            Ok(json!({}))
        }
        Command::SetupEphemeralDisk => {
            settings.load_settings().context("Refreshing the settings")?;
            let device = settings.disks().ephemeral.unwrap_or_default();
            platform
                .setup_ephemeral_disk_with_path(Path::new(&device), &dirs.data_dir())
                .context("Setting up ephemeral disk")?;
            Ok(json!({}))
        }
        Command::Stats => collect_stats(platform, &dirs.store_dir()),
    }
}

fn collect_stats(platform: &dyn Platform, store_dir: &Path) -> anyhow::Result<Value> {
    let stats = platform.stats_collector();
    let load = stats.cpu_load().context("Getting CPU load")?;
    let cpu = stats.cpu_stats().context("Getting CPU stats")?;
    let mem = stats.mem_stats().context("Getting memory stats")?;
    let swap = stats.swap_stats().context("Getting swap stats")?;

    let mut disks = serde_json::Map::new();
    disks.insert("system".to_string(), disk_json(stats.as_ref(), Path::new("/"))?);
    if platform.mount_points().is_mount_point(store_dir)? {
        disks.insert("persistent".to_string(), disk_json(stats.as_ref(), store_dir)?);
    }

    Ok(json!({
        "load": [load.one, load.five, load.fifteen],
        "cpu": {"user": cpu.user, "sys": cpu.sys, "wait": cpu.wait, "total": cpu.total},
        "mem": {"used": mem.used, "total": mem.total, "percent": mem.percent()},
        "swap": {"used": swap.used, "total": swap.total, "percent": swap.percent()},
        "disk": disks,
    }))
}

fn disk_json(stats: &dyn StatsCollector, mount_point: &Path) -> anyhow::Result<Value> {
    let disk = stats
        .disk_stats(mount_point)
        .with_context(|| format!("Getting disk stats for {}", mount_point.display()))?;
    Ok(json!({
        "percent": disk.disk_usage.percent(),
        "inode_percent": disk.inode_usage.percent(),
    }))
}
