use crate::cli::{Cli, PlatformKind};
use agent_settings::DirectoriesProvider;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_dir: PathBuf,
    pub settings_path: PathBuf,
    pub platform: PlatformKind,
}

impl Config {
    pub fn new(base_dir: PathBuf, platform: PlatformKind) -> Self {
        let settings_path = DirectoriesProvider::new(base_dir.clone()).settings_path();
        Self {
            base_dir,
            settings_path,
            platform,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let platform = if cli.dry_run {
            PlatformKind::Dummy
        } else {
            cli.platform
        };
        let mut config = Self::new(cli.base_dir.clone(), platform);
        if let Some(path) = &cli.settings {
            config.settings_path = path.clone();
        }
        config
    }

    pub fn directories(&self) -> DirectoriesProvider {
        DirectoriesProvider::new(self.base_dir.clone())
    }
}
