//! Export encoders: rows in, named byte payload out
//!
//! Each encoder owns its escaping rules; nothing is shared between formats.

mod csv;
mod spreadsheet;

pub use csv::DelimitedTextEncoder;
pub use spreadsheet::SpreadsheetEncoder;

use chrono::NaiveDate;
use serde::Deserialize;

/// Stem of every export file name, before the date suffix
pub const EXPORT_FILE_STEM: &str = "Quran_Export";

/// A column of an exportable record: header name and spreadsheet width (points)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub width: u32,
}

impl Column {
    pub const fn new(name: &'static str, width: u32) -> Self {
        Self { name, width }
    }
}

/// A record with a fixed set of named columns
pub trait ExportRecord {
    /// Columns in declaration order; also the header row
    const COLUMNS: &'static [Column];

    /// Column holding right-to-left text, styled accordingly in spreadsheets
    const RTL_COLUMN: Option<&'static str> = None;

    /// One value per column. `None` renders as an empty cell.
    fn values(&self) -> Vec<Option<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub trait RowEncoder {
    const EXTENSION: &'static str;
    const MIME_TYPE: &'static str;

    fn encode_body<R: ExportRecord>(&self, rows: &[R]) -> Vec<u8>;

    /// Encode `rows` into `<stem>.<ext>`. Produces nothing for zero rows.
    fn encode<R: ExportRecord>(&self, rows: &[R], stem: &str) -> Option<ExportPayload> {
        if rows.is_empty() {
            return None;
        }
        Some(ExportPayload {
            file_name: format!("{}.{}", stem, Self::EXTENSION),
            mime_type: Self::MIME_TYPE,
            bytes: self.encode_body(rows),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    #[serde(alias = "xlsx", alias = "excel")]
    Xls,
}

impl ExportFormat {
    pub fn encode<R: ExportRecord>(&self, rows: &[R], stem: &str) -> Option<ExportPayload> {
        match self {
            ExportFormat::Csv => DelimitedTextEncoder.encode(rows, stem),
            ExportFormat::Xls => SpreadsheetEncoder::default().encode(rows, stem),
        }
    }
}

/// `Quran_Export_<YYYY-MM-DD>`
pub fn export_file_stem(date: NaiveDate) -> String {
    format!("{}_{}", EXPORT_FILE_STEM, date.format("%Y-%m-%d"))
}
