use tracing::{debug, info, warn};

use crate::settings::Settings;
use crate::store::schema::{SETTINGS_SCHEMA_VERSION, SettingsData};
use crate::store::{SettingsBackend, StoreError};

/// Owns the player's settings and keeps the backend in sync with them.
pub struct SettingsStore {
    settings: Settings,
    backend: Box<dyn SettingsBackend>,
}

impl SettingsStore {
    /// Defaults, without reading the backend.
    pub fn new(backend: Box<dyn SettingsBackend>) -> Self {
        Self {
            settings: Settings::default(),
            backend,
        }
    }

    /// Reads the saved record, falling back to defaults when it is absent
    /// or unusable.
    pub fn load(backend: Box<dyn SettingsBackend>) -> Self {
        let mut store = Self::new(backend);
        store.reload();
        store
    }

    pub fn reload(&mut self) {
        self.settings = match self.read_saved() {
            Ok(Some(settings)) => {
                info!(grade = settings.grade_level, "settings loaded");
                settings
            }
            Ok(None) => {
                debug!("no saved settings, using defaults");
                Settings::default()
            }
            Err(err) => {
                warn!(error = %err, "falling back to default settings");
                Settings::default()
            }
        };
    }

    fn read_saved(&self) -> Result<Option<Settings>, StoreError> {
        let Some(record) = self.backend.read()? else {
            return Ok(None);
        };
        let data: SettingsData = serde_json::from_str(&record)?;
        if data.needs_reset() {
            return Err(StoreError::SchemaMismatch {
                found: data.schema_version,
                expected: SETTINGS_SCHEMA_VERSION,
            });
        }
        let mut settings = data.settings;
        settings.validate();
        Ok(Some(settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Applies `change`, clamps the result and saves it. The in-memory
    /// settings keep the change even when saving fails.
    pub fn update<F>(&mut self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Settings),
    {
        change(&mut self.settings);
        self.settings.validate();
        self.save()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let record = serde_json::to_string_pretty(&SettingsData::new(self.settings.clone()))?;
        self.backend.write(&record)?;
        debug!("settings saved");
        Ok(())
    }
}
