//! Server configuration from environment variables

use crate::verses::VerseSource;
use std::path::PathBuf;

pub const BIND_ENV: &str = "QURAN_EXPORTER_BIND";
pub const DATA_DIR_ENV: &str = "QURAN_EXPORTER_DATA_DIR";
pub const SOURCE_ENV: &str = "QURAN_EXPORTER_SOURCE";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const APP_DIR_NAME: &str = "QuranExporter";
const DATASET_FILE: &str = "csvjson.json";
const SETTINGS_FILE: &str = "settings.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub verse_source: VerseSource,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let verse_source = match get(SOURCE_ENV) {
            Some(location) => VerseSource::from_location(location.trim()),
            None => VerseSource::File(data_dir.join(DATASET_FILE)),
        };

        Self {
            bind_addr: get(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            data_dir,
            verse_source,
        }
    }

    pub fn settings_db_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}

/// Platform data directory (e.g. `~/.local/share/QuranExporter`), or
/// `./data` when the platform has none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}
