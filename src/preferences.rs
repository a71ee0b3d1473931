//! Persisted user preferences: the custom transliteration map and the
//! "use custom mapping" flag, stored as key-value settings.

use crate::error::ExporterError;
use crate::transliteration::{default_map, TransliterationMap};
use rusqlite::OptionalExtension;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub const MAPPING_KEY: &str = "quran_exporter_map";
pub const USE_CUSTOM_MAPPING_KEY: &str = "quran_exporter_use_custom_mapping";

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ExporterError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ExporterError>;
}

/// Settings kept in an `app_settings` table of a SQLite database.
/// Each call opens its own connection.
pub struct SqlitePreferences {
    path: PathBuf,
}

impl SqlitePreferences {
    /// Open (creating if missing) the settings database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExporterError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ExporterError::Database(format!("Failed to create data directory: {}", e))
                })?;
            }
        }

        let store = Self { path };
        store.connection()?;
        Ok(store)
    }

    fn connection(&self) -> Result<rusqlite::Connection, ExporterError> {
        let conn = rusqlite::Connection::open(&self.path)
            .map_err(|e| ExporterError::Database(format!("unable to open database file: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        Ok(conn)
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, ExporterError> {
        let conn = self.connection()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExporterError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store, used when the settings database cannot be opened
#[derive(Default)]
pub struct MemoryPreferences {
    entries: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, ExporterError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ExporterError::Other("Failed to acquire preferences lock".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExporterError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ExporterError::Other("Failed to acquire preferences lock".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored map, or the built-in default when absent, unreadable or unparseable
pub fn load_mapping(store: &dyn PreferenceStore) -> TransliterationMap {
    match store.get(MAPPING_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Stored transliteration map is invalid ({}), using default", e);
            default_map()
        }),
        Ok(None) => default_map(),
        Err(e) => {
            warn!("Failed to read transliteration map: {}", e);
            default_map()
        }
    }
}

pub fn load_use_custom_mapping(store: &dyn PreferenceStore) -> bool {
    match store.get(USE_CUSTOM_MAPPING_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            warn!("Failed to read custom mapping flag: {}", e);
            false
        }
    }
}

pub fn save_mapping(
    store: &dyn PreferenceStore,
    mapping: &TransliterationMap,
) -> Result<(), ExporterError> {
    let json = serde_json::to_string(mapping)
        .map_err(|e| ExporterError::Other(format!("Failed to serialize mapping: {}", e)))?;
    store.set(MAPPING_KEY, &json)
}

pub fn save_use_custom_mapping(
    store: &dyn PreferenceStore,
    enabled: bool,
) -> Result<(), ExporterError> {
    store.set(USE_CUSTOM_MAPPING_KEY, if enabled { "true" } else { "false" })
}
