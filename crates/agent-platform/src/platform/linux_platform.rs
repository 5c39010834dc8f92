//! Linux platform implementation.

use super::Platform;
use crate::cmd::{path_arg, CmdRunner};
use crate::disk::{DiskMounter, LinuxDiskMounter, MountPoints, ProcMountPoints};
use crate::stats::{ProcStatsCollector, StatsCollector};
use agent_error::{PlatformError, PlatformResult};
use agent_settings::{default_network_for, Networks};
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const CHOWN_TIMEOUT: Duration = Duration::from_secs(30);
const NETWORK_RESTART_TIMEOUT: Duration = Duration::from_secs(2 * 60);

const SSH_DIR_MODE: u32 = 0o700;
const AUTHORIZED_KEYS_MODE: u32 = 0o600;
const EPHEMERAL_DIR_MODE: u32 = 0o750;

/// Host paths the Linux platform reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinuxOptions {
    pub home_root: PathBuf,
    pub dhclient_conf_path: PathBuf,
    pub mountinfo_path: PathBuf,
    pub proc_root: PathBuf,
}

impl Default for LinuxOptions {
    fn default() -> Self {
        Self {
            home_root: PathBuf::from("/home"),
            dhclient_conf_path: PathBuf::from("/etc/dhcp/dhclient.conf"),
            mountinfo_path: PathBuf::from("/proc/self/mountinfo"),
            proc_root: PathBuf::from("/proc"),
        }
    }
}

pub struct LinuxPlatform {
    options: LinuxOptions,
    runner: Arc<dyn CmdRunner>,
    disk_mounter: Arc<LinuxDiskMounter>,
    mount_points: Arc<ProcMountPoints>,
    stats: Arc<ProcStatsCollector>,
}

impl LinuxPlatform {
    pub fn new(options: LinuxOptions, runner: Arc<dyn CmdRunner>) -> Self {
        Self {
            disk_mounter: Arc::new(LinuxDiskMounter::new(runner.clone())),
            mount_points: Arc::new(ProcMountPoints::new(options.mountinfo_path.clone())),
            stats: Arc::new(ProcStatsCollector::new(options.proc_root.clone())),
            options,
            runner,
        }
    }

    fn restart_networking(&self) -> PlatformResult<()> {
        // A missing dhclient process is fine; the restart below starts a fresh one.
        if let Err(err) = self
            .runner
            .run_command("pkill", &["dhclient"], NETWORK_RESTART_TIMEOUT)
        {
            log::warn!("pkill dhclient: {}", err);
        }
        self.runner.run_command(
            "/etc/init.d/networking",
            &["restart"],
            NETWORK_RESTART_TIMEOUT,
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for LinuxPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinuxPlatform")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// dhclient configuration with the default network's DNS servers prepended.
pub fn dhclient_config(networks: &Networks) -> String {
    let mut config = String::from(
        "# Generated by the host agent\n\
         \n\
         option rfc3442-classless-static-routes code 121 = array of unsigned integer 8;\n\
         \n\
         send host-name = gethostname();\n\
         \n\
         request subnet-mask, broadcast-address, time-offset, routers,\n\
         \tdomain-name, domain-name-servers, domain-search, host-name,\n\
         \tnetbios-name-servers, netbios-scope, interface-mtu,\n\
         \trfc3442-classless-static-routes, ntp-servers;\n",
    );

    let dns: Vec<&str> = default_network_for(networks, "dns")
        .map(|n| n.dns.iter().rev().map(String::as_str).collect())
        .unwrap_or_default();
    if !dns.is_empty() {
        // `prepend` pushes servers in reverse, so reversing here keeps the configured order.
        config.push_str(&format!("\nprepend domain-name-servers {};\n", dns.join(", ")));
    }
    config
}

fn set_mode(path: &Path, mode: u32) -> PlatformResult<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

impl Platform for LinuxPlatform {
    fn setup_ssh(&self, public_key: &str, username: &str) -> PlatformResult<()> {
        if username.is_empty() || username.contains('/') {
            return Err(PlatformError::Other(format!(
                "Invalid ssh username '{}'",
                username
            )));
        }

        let ssh_dir = self.options.home_root.join(username).join(".ssh");
        fs::create_dir_all(&ssh_dir)?;
        set_mode(&ssh_dir, SSH_DIR_MODE)?;

        let keys_path = ssh_dir.join("authorized_keys");
        fs::write(&keys_path, format!("{}\n", public_key.trim_end()))?;
        set_mode(&keys_path, AUTHORIZED_KEYS_MODE)?;

        let owner = format!("{0}:{0}", username);
        self.runner.run_command(
            "chown",
            &["-R", owner.as_str(), path_arg(&ssh_dir)?],
            CHOWN_TIMEOUT,
        )?;

        log::info!("Installed ssh key for {}", username);
        Ok(())
    }

    fn setup_dhcp(&self, networks: &Networks) -> PlatformResult<()> {
        let path = &self.options.dhclient_conf_path;
        let desired = dhclient_config(networks);

        let current = match fs::read_to_string(path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        if current.as_deref() == Some(desired.as_str()) {
            log::debug!("{} unchanged, not restarting networking", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, desired)?;
        log::info!("Wrote {}, restarting networking", path.display());
        self.restart_networking()
    }

    fn setup_ephemeral_disk_with_path(
        &self,
        device_path: &Path,
        mount_point: &Path,
    ) -> PlatformResult<()> {
        fs::create_dir_all(mount_point)?;
        set_mode(mount_point, EPHEMERAL_DIR_MODE)?;

        if device_path.as_os_str().is_empty() {
            log::info!("No ephemeral disk; using root filesystem for {}", mount_point.display());
            return Ok(());
        }

        self.disk_mounter.format_and_mount(device_path, mount_point)
    }

    fn stats_collector(&self) -> Arc<dyn StatsCollector> {
        self.stats.clone()
    }

    fn disk_mounter(&self) -> Arc<dyn DiskMounter> {
        self.disk_mounter.clone()
    }

    fn mount_points(&self) -> Arc<dyn MountPoints> {
        self.mount_points.clone()
    }
}
