//! Application state management

use crate::config::ServerConfig;
use crate::preferences::{MemoryPreferences, PreferenceStore, SqlitePreferences};
use crate::session::ExportSession;
use crate::verses::VerseRepository;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Shared by all request handlers. There is one user, so one session;
/// the mutex makes each action run to completion before the next starts.
pub struct AppState {
    pub session: Mutex<ExportSession>,
}

impl AppState {
    pub fn new(session: ExportSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Build the session from configuration. A settings database that
    /// cannot be opened degrades to in-memory preferences.
    pub fn from_config(config: &ServerConfig) -> Self {
        let settings_path = config.settings_db_path();
        let store: Box<dyn PreferenceStore> = match SqlitePreferences::open(&settings_path) {
            Ok(store) => {
                info!(path = %settings_path.display(), "Using settings database");
                Box::new(store)
            }
            Err(e) => {
                warn!("Settings database unavailable ({}); preferences will not persist", e);
                Box::new(MemoryPreferences::default())
            }
        };

        let repository = VerseRepository::new(config.verse_source.clone());
        Self::new(ExportSession::new(repository, store))
    }
}
