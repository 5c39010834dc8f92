//! In-memory settings service for tests and dry runs.
//!
//! Tracks how often a refresh was requested so callers can assert that settings are
//! reloaded on every use.

use crate::service::SettingsService;
use crate::settings::Settings;
use agent_error::{SettingsError, SettingsResult};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeSettingsState {
    settings: Settings,
    load_error: Option<String>,
    load_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeSettingsService {
    state: Arc<Mutex<FakeSettingsState>>,
}

impl FakeSettingsService {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeSettingsState {
                settings,
                ..FakeSettingsState::default()
            })),
        }
    }

    /// Convenience constructor: only the persistent disk map is populated.
    pub fn with_persistent_disks<'a>(disks: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut settings = Settings::default();
        for (cid, device) in disks {
            settings
                .disks
                .persistent
                .insert(cid.to_string(), device.to_string());
        }
        Self::new(settings)
    }

    /// Make every subsequent `load_settings` fail with `message`.
    pub fn fail_load(&self, message: impl Into<String>) {
        self.state().load_error = Some(message.into());
    }

    pub fn set_settings(&self, settings: Settings) {
        self.state().settings = settings;
    }

    pub fn load_count(&self) -> usize {
        self.state().load_count
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeSettingsState> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SettingsService for FakeSettingsService {
    fn load_settings(&self) -> SettingsResult<()> {
        let mut state = self.state();
        state.load_count += 1;
        match &state.load_error {
            Some(msg) => Err(SettingsError::Other(msg.clone())),
            None => Ok(()),
        }
    }

    fn settings(&self) -> Settings {
        self.state().settings.clone()
    }
}
