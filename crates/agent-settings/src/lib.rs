//! Agent settings.
//!
//! Settings describe the VM as the orchestrator sees it (attached disks, networks, identity).
//! Attachments change between invocations, so consumers refresh through a
//! [`SettingsService`] before every read instead of holding on to a copy.

pub mod directories;
pub mod fake_service;
pub mod service;
pub mod settings;

pub use agent_error::{SettingsError, SettingsResult};
pub use directories::DirectoriesProvider;
pub use fake_service::FakeSettingsService;
pub use service::{FileSettingsService, SettingsService};
pub use settings::{default_network_for, Disks, Network, Networks, Settings, VmSettings};
