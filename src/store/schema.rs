use serde::{Deserialize, Serialize};

use crate::settings::Settings;

pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// The persisted settings record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsData {
    pub schema_version: u32,
    pub settings: Settings,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsData {
    pub fn new(settings: Settings) -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            settings,
        }
    }

    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SETTINGS_SCHEMA_VERSION
    }
}
