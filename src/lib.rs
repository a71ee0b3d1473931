//! Quran Exporter - verse selection, transliteration and CSV/Excel export
//!
//! Backend library behind the HTTP API in `main.rs`.

pub mod catalog;
pub mod transliteration;
pub mod selection;
pub mod verses;
pub mod validator;
pub mod projector;
pub mod export;
pub mod preferences;
pub mod config;
pub mod session;
pub mod error;
pub mod state;
pub mod api;

#[cfg(test)]
mod test_support;

pub use error::ExporterError;
pub use state::AppState;
pub use config::ServerConfig;
pub use catalog::Chapter;
pub use selection::{Scope, SelectionQuery, VersePosition};
pub use verses::{Verse, VerseRepository, VerseSource};
pub use transliteration::{ArabicLetter, TransliterationMap, transliterate, default_map};
pub use projector::{ExportRow, project};
pub use export::{ExportFormat, ExportPayload, DelimitedTextEncoder, SpreadsheetEncoder};
pub use preferences::{PreferenceStore, SqlitePreferences, MemoryPreferences};
pub use session::{ExportSession, ExportPreview};
