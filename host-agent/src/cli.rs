use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformKind {
    /// Real Linux host
    Linux,
    /// No OS effects (sandboxes, dry runs)
    Dummy,
}

#[derive(Debug, Parser)]
#[command(name = "agent", author, version, about = "VM host agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Agent base directory (store, data and settings live under it)
    #[arg(long, global = true, default_value = "/var/vcap")]
    pub base_dir: PathBuf,

    /// Settings file [default: <base-dir>/bosh/settings.json]
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = PlatformKind::Linux)]
    pub platform: PlatformKind,

    /// Shorthand for --platform dummy
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Mount a persistent disk by its id
    MountDisk { disk_cid: String },
    /// Install an SSH public key for a user
    SetupSsh {
        #[arg(long)]
        user: String,
        #[arg(long)]
        key: String,
    },
    /// Configure DHCP from the settings' networks
    SetupDhcp,
    /// Mount the ephemeral disk on the data directory
    SetupEphemeralDisk,
    /// Print host statistics
    Stats,
}
