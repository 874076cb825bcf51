pub mod json_store;
pub mod schema;
pub mod settings_store;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved settings are malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("saved settings use schema version {found} (expected {expected})")]
    SchemaMismatch { found: u32, expected: u32 },
}

/// Where the serialized settings record lives. Implementations only move
/// the raw record; (de)serialization happens in the settings store.
pub trait SettingsBackend {
    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, record: &str) -> Result<(), StoreError>;
}

/// Keeps the record in memory. Clones share the same slot, so a test can
/// hand one clone to a store and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    record: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: &str) -> Self {
        Self {
            record: Rc::new(RefCell::new(Some(record.to_string()))),
        }
    }

    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.record.borrow().clone())
    }

    fn write(&self, record: &str) -> Result<(), StoreError> {
        *self.record.borrow_mut() = Some(record.to_string());
        Ok(())
    }
}
