// src/settings/store.rs

use serde_json::{Map, Value};
use std::sync::RwLock;

use super::backend::SettingsBackend;
use super::error::SettingsError;
use super::Settings;

/// In-memory settings plus the backend they are persisted to
pub struct SettingsStore {
    backend: Box<dyn SettingsBackend>,
    current: RwLock<Settings>,
}

impl SettingsStore {
    pub fn new(backend: Box<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            current: RwLock::new(Settings::default()),
        }
    }

    /// Load the persisted record merged over the defaults
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let merged = merge_over_defaults(self.backend.load_raw()?)?;
        *self.current.write().map_err(|_| SettingsError::LockPoisoned)? = merged.clone();
        Ok(merged)
    }

    /// Like [`load`](Self::load), falling back to defaults on unreadable data
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(settings) => {
                tracing::info!(folder = %settings.folder, "settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!(error = %e, "unusable settings, using defaults");
                let defaults = Settings::default();
                if let Ok(mut current) = self.current.write() {
                    *current = defaults.clone();
                }
                defaults
            }
        }
    }

    /// Persist the in-memory settings, replacing what was stored before
    pub fn save(&self) -> Result<(), SettingsError> {
        let settings = self.get()?;
        self.backend.save_raw(&to_record(&settings)?)
    }

    /// Replace all settings and persist them
    pub fn replace(&self, settings: Settings) -> Result<(), SettingsError> {
        *self.current.write().map_err(|_| SettingsError::LockPoisoned)? = settings;
        self.save()
    }

    /// Change the default import folder and persist it
    pub fn set_folder(&self, folder: impl Into<String>) -> Result<(), SettingsError> {
        self.current
            .write()
            .map_err(|_| SettingsError::LockPoisoned)?
            .folder = folder.into();
        self.save()
    }

    pub fn get(&self) -> Result<Settings, SettingsError> {
        self.current
            .read()
            .map(|settings| settings.clone())
            .map_err(|_| SettingsError::LockPoisoned)
    }
}

fn to_record(settings: &Settings) -> Result<Map<String, Value>, SettingsError> {
    match serde_json::to_value(settings)? {
        Value::Object(map) => Ok(map),
        other => Err(SettingsError::Malformed {
            reason: format!("settings serialized to non-object: {}", other),
        }),
    }
}

/// Overlay the persisted keys on the default record
fn merge_over_defaults(persisted: Option<Value>) -> Result<Settings, SettingsError> {
    let overrides = match persisted {
        None | Some(Value::Null) => return Ok(Settings::default()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(SettingsError::Malformed {
                reason: format!("expected an object, found {}", other),
            })
        }
    };

    let mut record = to_record(&Settings::default())?;
    record.extend(overrides);
    Ok(serde_json::from_value(Value::Object(record))?)
}
