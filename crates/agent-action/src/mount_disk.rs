//! Attach a persistent disk to the VM's store directory.

use crate::action::{single_string_arg, Action, ActionValue};
use agent_error::{ActionError, ActionResult};
use agent_platform::{DiskMounter, MountPoints, Platform};
use agent_settings::{DirectoriesProvider, SettingsService};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

pub struct MountDiskAction {
    settings: Arc<dyn SettingsService>,
    disk_mounter: Arc<dyn DiskMounter>,
    mount_points: Arc<dyn MountPoints>,
    dirs: DirectoriesProvider,
}

impl MountDiskAction {
    pub fn new(
        settings: Arc<dyn SettingsService>,
        disk_mounter: Arc<dyn DiskMounter>,
        mount_points: Arc<dyn MountPoints>,
        dirs: DirectoriesProvider,
    ) -> Self {
        Self {
            settings,
            disk_mounter,
            mount_points,
            dirs,
        }
    }

    /// Wire the action to the disk capabilities of `platform`.
    pub fn from_platform(
        settings: Arc<dyn SettingsService>,
        platform: &dyn Platform,
        dirs: DirectoriesProvider,
    ) -> Self {
        Self::new(
            settings,
            platform.disk_mounter(),
            platform.mount_points(),
            dirs,
        )
    }

    /// Mount the persistent disk `disk_cid` on the store directory, or on the migration
    /// directory while the store directory is still occupied.
    pub fn mount(&self, disk_cid: &str) -> ActionResult<ActionValue> {
        self.settings
            .load_settings()
            .map_err(ActionError::RefreshSettings)?;

        let disks = self.settings.disks();
        let device_path = disks
            .persistent_device(disk_cid)
            .ok_or_else(|| ActionError::DiskNotFound(disk_cid.to_string()))?;
        log::debug!("Persistent disk {} is {}", disk_cid, device_path);

        let mut mount_point = self.dirs.store_dir();
        let occupied = self
            .mount_points
            .is_mount_point(&mount_point)
            .map_err(ActionError::CheckMountPoint)?;
        if occupied {
            // Whatever holds the store dir is being migrated away by the orchestrator.
            mount_point = self.dirs.store_migration_dir();
        }
        log::info!(
            "Mounting persistent disk {} ({}) at {}",
            disk_cid,
            device_path,
            mount_point.display()
        );

        self.disk_mounter
            .mount_persistent_disk(Path::new(device_path), &mount_point)
            .map_err(ActionError::MountPersistentDisk)?;

        Ok(Value::Object(Map::new()))
    }
}

impl Action for MountDiskAction {
    fn is_asynchronous(&self) -> bool {
        true
    }

    fn is_persistent(&self) -> bool {
        false
    }

    fn run(&self, args: &[Value]) -> ActionResult<ActionValue> {
        self.mount(single_string_arg(args)?)
    }

    fn resume(&self) -> ActionResult<ActionValue> {
        Err(ActionError::NotSupported)
    }
}
