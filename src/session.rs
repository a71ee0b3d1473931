//! The single user's export session: selection, transliteration
//! preferences, and the verses picked for export.
//!
//! Preferences are read once when the session is created and written back
//! on every change.

use crate::catalog;
use crate::error::ExporterError;
use crate::export::{export_file_stem, ExportFormat, ExportPayload};
use crate::preferences::{self, PreferenceStore};
use crate::projector::{project, ExportRow};
use crate::selection::SelectionQuery;
use crate::transliteration::{default_map, merge_key_file, TransliterationMap};
use crate::validator;
use crate::verses::{Verse, VerseRepository};
use serde::Serialize;
use tracing::{info, warn};

/// Rows shown before downloading
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ExportPreview {
    pub rows: Vec<ExportRow>,
    pub total: usize,
    pub custom_mapping_applied: bool,
}

pub struct ExportSession {
    repository: VerseRepository,
    store: Box<dyn PreferenceStore>,
    mapping: TransliterationMap,
    use_custom_mapping: bool,
    /// False between an edit to the map and an explicit save
    mapping_saved: bool,
    selection: SelectionQuery,
    selected: Vec<Verse>,
}

impl ExportSession {
    pub fn new(repository: VerseRepository, store: Box<dyn PreferenceStore>) -> Self {
        let mapping = preferences::load_mapping(store.as_ref());
        let use_custom_mapping = preferences::load_use_custom_mapping(store.as_ref());
        info!(
            entries = mapping.len(),
            use_custom_mapping,
            source = %repository.source(),
            "Export session ready"
        );

        Self {
            repository,
            store,
            mapping,
            use_custom_mapping,
            mapping_saved: true,
            selection: SelectionQuery::default(),
            selected: Vec::new(),
        }
    }

    pub fn mapping(&self) -> &TransliterationMap {
        &self.mapping
    }

    pub fn use_custom_mapping(&self) -> bool {
        self.use_custom_mapping
    }

    pub fn is_mapping_saved(&self) -> bool {
        self.mapping_saved
    }

    pub fn selection(&self) -> &SelectionQuery {
        &self.selection
    }

    pub fn selected_verses(&self) -> &[Verse] {
        &self.selected
    }

    // ============ Transliteration map ============

    pub fn set_mapping_entry(&mut self, letter: &str, value: &str) -> Result<(), ExporterError> {
        if letter.is_empty() {
            return Err(ExporterError::InvalidRequest("letter must not be empty".to_string()));
        }
        self.mapping.insert(letter.to_string(), value.to_string());
        self.mapping_changed()
    }

    /// Merge an uploaded key file; returns the number of lines applied
    pub fn upload_key_file(&mut self, text: &str) -> Result<usize, ExporterError> {
        let applied = merge_key_file(&mut self.mapping, text);
        info!(applied, "Merged transliteration key file");
        self.mapping_changed()?;
        Ok(applied)
    }

    pub fn reset_mapping(&mut self) -> Result<(), ExporterError> {
        self.mapping = default_map();
        self.mapping_changed()
    }

    /// Confirm the current map; unblocks `proceed` when custom mapping is on
    pub fn save_mapping(&mut self) -> Result<(), ExporterError> {
        preferences::save_mapping(self.store.as_ref(), &self.mapping)?;
        self.mapping_saved = true;
        info!("Transliteration mapping saved");
        Ok(())
    }

    pub fn set_use_custom_mapping(&mut self, enabled: bool) -> Result<(), ExporterError> {
        self.use_custom_mapping = enabled;
        preferences::save_use_custom_mapping(self.store.as_ref(), enabled)
    }

    fn mapping_changed(&mut self) -> Result<(), ExporterError> {
        self.mapping_saved = false;
        preferences::save_mapping(self.store.as_ref(), &self.mapping)
    }

    /// The map handed to the projector, if custom mapping is on
    pub fn active_mapping(&self) -> Option<&TransliterationMap> {
        self.use_custom_mapping.then_some(&self.mapping)
    }

    // ============ Selection ============

    pub fn set_selection(&mut self, selection: SelectionQuery) {
        self.selection = selection;
    }

    /// Pick the start chapter; the start verse goes back to 1
    pub fn set_start_chapter(&mut self, chapter_id: u32) -> Result<(), ExporterError> {
        require_chapter(chapter_id)?;
        self.selection.start_chapter = chapter_id;
        self.selection.start_verse = 1;
        Ok(())
    }

    /// Pick the end chapter; the end verse jumps to its last verse
    pub fn set_end_chapter(&mut self, chapter_id: u32) -> Result<(), ExporterError> {
        let chapter = require_chapter(chapter_id)?;
        self.selection.end_chapter = chapter_id;
        self.selection.end_verse = chapter.verse_count;
        Ok(())
    }

    pub async fn validate(&self) -> Result<(), ExporterError> {
        validator::validate(&self.repository, &self.selection).await
    }

    /// Validate the selection and load its verses for export.
    /// Blocked while custom mapping is on and the map has unsaved edits.
    pub async fn proceed(&mut self) -> Result<usize, ExporterError> {
        if self.use_custom_mapping && !self.mapping_saved {
            return Err(ExporterError::UnsavedMappingChanges);
        }

        self.validate().await?;

        let verses = self.repository.query(&self.selection).await?;
        if verses.is_empty() {
            return Err(ExporterError::EmptySelection);
        }

        info!(
            scope = ?self.selection.scope,
            verses = verses.len(),
            "Selection loaded"
        );
        self.selected = verses;
        Ok(self.selected.len())
    }

    // ============ Export ============

    pub fn export_rows(&self) -> Vec<ExportRow> {
        project(&self.selected, self.active_mapping())
    }

    pub fn preview(&self) -> ExportPreview {
        let mut rows = self.export_rows();
        let total = rows.len();
        rows.truncate(PREVIEW_ROWS);
        ExportPreview {
            rows,
            total,
            custom_mapping_applied: self.use_custom_mapping,
        }
    }

    /// Encode the selected verses as `Quran_Export_<UTC date>.<ext>`
    pub fn export(&self, format: ExportFormat) -> Result<ExportPayload, ExporterError> {
        if self.selected.is_empty() {
            return Err(ExporterError::InvalidRequest("No verses selected".to_string()));
        }

        let rows = self.export_rows();
        let stem = export_file_stem(chrono::Utc::now().date_naive());
        let payload = format.encode(&rows, &stem).ok_or_else(|| {
            warn!("Encoder produced no payload for {} rows", rows.len());
            ExporterError::Export("nothing to export".to_string())
        })?;

        info!(file = %payload.file_name, bytes = payload.bytes.len(), "Export ready");
        Ok(payload)
    }
}

fn require_chapter(chapter_id: u32) -> Result<&'static catalog::Chapter, ExporterError> {
    catalog::get(chapter_id)
        .ok_or_else(|| ExporterError::NotFound(format!("chapter {}", chapter_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{MemoryPreferences, MAPPING_KEY, USE_CUSTOM_MAPPING_KEY};
    use crate::selection::{Scope, VersePosition};
    use crate::test_support::sample_repository;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Store shared with the test so persisted values can be inspected
    struct SharedStore(Arc<MemoryPreferences>);

    impl PreferenceStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, ExporterError> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), ExporterError> {
            self.0.set(key, value)
        }
    }

    fn session(dir: &TempDir) -> (ExportSession, Arc<MemoryPreferences>) {
        let store = Arc::new(MemoryPreferences::default());
        let session = ExportSession::new(sample_repository(dir), Box::new(SharedStore(store.clone())));
        (session, store)
    }

    #[test]
    fn test_initial_state() {
        let dir = TempDir::new().unwrap();
        let (session, _) = session(&dir);
        assert_eq!(session.mapping(), &default_map());
        assert!(!session.use_custom_mapping());
        assert!(session.is_mapping_saved());
        assert_eq!(session.selection().scope, Scope::WholeChapter);
        assert!(session.active_mapping().is_none());
    }

    #[test]
    fn test_loads_stored_preferences() {
        let dir = TempDir::new().unwrap();
        let store = MemoryPreferences::default();
        store.set(MAPPING_KEY, r#"{"ب":"B"}"#).unwrap();
        store.set(USE_CUSTOM_MAPPING_KEY, "true").unwrap();
        let session = ExportSession::new(sample_repository(&dir), Box::new(store));
        assert_eq!(session.mapping().len(), 1);
        assert!(session.use_custom_mapping());
        assert!(session.active_mapping().is_some());
    }

    #[test]
    fn test_every_mapping_change_is_persisted() {
        let dir = TempDir::new().unwrap();
        let (mut session, store) = session(&dir);

        session.set_mapping_entry("ب", "B").unwrap();
        assert!(!session.is_mapping_saved());
        assert!(store.get(MAPPING_KEY).unwrap().unwrap().contains("\"B\""));

        session.upload_key_file("ت,T").unwrap();
        assert!(store.get(MAPPING_KEY).unwrap().unwrap().contains("\"T\""));

        session.reset_mapping().unwrap();
        assert_eq!(session.mapping(), &default_map());
        assert!(!session.is_mapping_saved());

        session.save_mapping().unwrap();
        assert!(session.is_mapping_saved());

        session.set_use_custom_mapping(true).unwrap();
        assert_eq!(store.get(USE_CUSTOM_MAPPING_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_chapter_pickers() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);
        session.set_selection(SelectionQuery::range(
            VersePosition::new(1, 4),
            VersePosition::new(1, 6),
        ));

        session.set_start_chapter(2).unwrap();
        assert_eq!(session.selection().start(), VersePosition::new(2, 1));

        session.set_end_chapter(2).unwrap();
        assert_eq!(session.selection().end(), VersePosition::new(2, 286));

        assert!(matches!(session.set_start_chapter(0), Err(ExporterError::NotFound(_))));
        assert!(matches!(session.set_end_chapter(115), Err(ExporterError::NotFound(_))));
        assert_eq!(session.selection().end(), VersePosition::new(2, 286));
    }

    #[tokio::test]
    async fn test_unsaved_mapping_blocks_proceed() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);
        session.set_use_custom_mapping(true).unwrap();
        session.set_mapping_entry("ب", "B").unwrap();

        let err = session.proceed().await.unwrap_err();
        assert!(matches!(err, ExporterError::UnsavedMappingChanges));
        assert!(session.selected_verses().is_empty());

        session.save_mapping().unwrap();
        assert_eq!(session.proceed().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_unsaved_mapping_ignored_without_custom_mapping() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);
        session.set_mapping_entry("ب", "B").unwrap();
        assert_eq!(session.proceed().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_proceed_reports_selection_errors() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);

        session.set_selection(SelectionQuery::single(1, 9));
        assert!(matches!(session.proceed().await, Err(ExporterError::EmptySelection)));

        session.set_selection(SelectionQuery::range(
            VersePosition::new(2, 2),
            VersePosition::new(2, 1),
        ));
        assert!(matches!(session.proceed().await, Err(ExporterError::InvalidRange)));
        assert!(session.selected_verses().is_empty());
    }

    #[tokio::test]
    async fn test_preview_limits_rows() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);
        session.set_selection(SelectionQuery::range(
            VersePosition::new(1, 1),
            VersePosition::new(2, 20),
        ));
        assert_eq!(session.proceed().await.unwrap(), 27);

        let preview = session.preview();
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(preview.total, 27);
        assert!(!preview.custom_mapping_applied);
        assert_eq!(preview.rows[0].transliteration, "fatiha 1");
    }

    #[tokio::test]
    async fn test_custom_mapping_applied_to_rows() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);
        session.set_selection(SelectionQuery::single(1, 1));
        session.set_use_custom_mapping(true).unwrap();
        session.proceed().await.unwrap();

        let rows = session.export_rows();
        assert_eq!(rows[0].transliteration, "bsm allh alrhmn alrhym");
        assert!(session.preview().custom_mapping_applied);
    }

    #[tokio::test]
    async fn test_export_payloads() {
        let dir = TempDir::new().unwrap();
        let (mut session, _) = session(&dir);

        let err = session.export(ExportFormat::Csv).unwrap_err();
        assert!(matches!(err, ExporterError::InvalidRequest(_)));

        session.set_selection(SelectionQuery::whole_chapter(1));
        session.proceed().await.unwrap();

        let csv = session.export(ExportFormat::Csv).unwrap();
        assert!(csv.file_name.starts_with("Quran_Export_"));
        assert!(csv.file_name.ends_with(".csv"));
        let text = String::from_utf8(csv.bytes).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("\"1\",\"7\",\"صراط الذين"));

        let xls = session.export(ExportFormat::Xls).unwrap();
        assert!(xls.file_name.ends_with(".xls"));
        let xml = String::from_utf8(xls.bytes).unwrap();
        assert!(xml.contains("\u{06DD}\u{0667}"));
    }
}
