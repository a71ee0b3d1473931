//! Error types for the Quran exporter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Verse source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("The requested verse or range does not exist.")]
    EmptySelection,

    #[error("Start position must be before the end position.")]
    InvalidRange,

    #[error("Please save your transliteration mapping changes first.")]
    UnsavedMappingChanges,

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

impl ExporterError {
    /// Errors the user can fix by changing the selection or the mapping.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExporterError::EmptySelection
                | ExporterError::InvalidRange
                | ExporterError::UnsavedMappingChanges
                | ExporterError::InvalidRequest(_)
                | ExporterError::NotFound(_)
        )
    }
}

impl From<rusqlite::Error> for ExporterError {
    fn from(e: rusqlite::Error) -> Self {
        ExporterError::Database(e.to_string())
    }
}
