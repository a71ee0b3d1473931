//! Verse repository: loads the whole dataset from its source on every call
//! and filters it by selection. Nothing is cached; the source is always the
//! single source of truth.

use crate::error::ExporterError;
use crate::selection::{SelectionQuery, VersePosition};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub chapter_id: u32,
    pub verse_number: u32,
    pub arabic_text: String,
    pub default_transliteration: String,
    pub translation_text: String,
}

impl Verse {
    pub fn position(&self) -> VersePosition {
        VersePosition::new(self.chapter_id, self.verse_number)
    }
}

// Canonical field name first, then the dataset's native column name
const CHAPTER_FIELDS: &[&str] = &["chapter_id", "surah_number"];
const VERSE_FIELDS: &[&str] = &["verse_number", "ayah_number"];
const ARABIC_FIELDS: &[&str] = &["arabic_text", "arabic_uthmani"];
const TRANSLITERATION_FIELDS: &[&str] = &["default_transliteration", "blank"];
const TRANSLATION_FIELDS: &[&str] = &["translation_text", "english_saheeh_international"];

/// Where the verse dataset (a JSON array of records) is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseSource {
    Http(String),
    File(PathBuf),
}

impl VerseSource {
    /// `http://` and `https://` locations are fetched over HTTP, anything
    /// else is treated as a file path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            VerseSource::Http(location.to_string())
        } else {
            VerseSource::File(PathBuf::from(location))
        }
    }

    async fn fetch(&self) -> Result<Value, ExporterError> {
        match self {
            VerseSource::Http(url) => {
                let response = reqwest::get(url).await.map_err(|e| {
                    ExporterError::SourceUnavailable(format!("Failed to fetch {}: {}", url, e))
                })?;

                if !response.status().is_success() {
                    return Err(ExporterError::SourceUnavailable(format!(
                        "Failed to access {}: HTTP {}",
                        url,
                        response.status()
                    )));
                }

                response.json::<Value>().await.map_err(|e| {
                    ExporterError::SourceUnavailable(format!("Failed to parse {}: {}", url, e))
                })
            }
            VerseSource::File(path) => {
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    ExporterError::SourceUnavailable(format!(
                        "Failed to read {}: {}",
                        path.display(),
                        e
                    ))
                })?;

                serde_json::from_str(&content).map_err(|e| {
                    ExporterError::SourceUnavailable(format!(
                        "Failed to parse {}: {}",
                        path.display(),
                        e
                    ))
                })
            }
        }
    }
}

impl fmt::Display for VerseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerseSource::Http(url) => write!(f, "{}", url),
            VerseSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct VerseRepository {
    source: VerseSource,
}

impl VerseRepository {
    pub fn new(source: VerseSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &VerseSource {
        &self.source
    }

    /// Fetch and parse the full collection, in source order
    pub async fn load_all(&self) -> Result<Vec<Verse>, ExporterError> {
        let payload = self.source.fetch().await.map_err(|e| {
            warn!("Verse loading error: {}", e);
            e
        })?;
        parse_verses(payload)
    }

    /// Load everything, then keep the verses the selection covers.
    /// Source order is preserved; nothing is re-sorted.
    pub async fn query(&self, selection: &SelectionQuery) -> Result<Vec<Verse>, ExporterError> {
        let verses = self.load_all().await?;
        let selected: Vec<Verse> = verses.into_iter().filter(|v| selection.matches(v)).collect();
        debug!(
            scope = ?selection.scope,
            start = ?selection.start(),
            end = ?selection.end(),
            matched = selected.len(),
            "Selection query"
        );
        Ok(selected)
    }
}

/// Convert a raw payload into verses. Records whose chapter or verse number
/// is not numeric are dropped silently; a payload that is not an array is
/// rejected.
pub fn parse_verses(payload: Value) -> Result<Vec<Verse>, ExporterError> {
    let Value::Array(records) = payload else {
        return Err(ExporterError::SourceUnavailable(
            "Invalid JSON format: expected an array of verses".to_string(),
        ));
    };

    let verses: Vec<Verse> = records.iter().filter_map(parse_record).collect();
    let dropped = records.len() - verses.len();
    debug!(loaded = verses.len(), dropped, "Parsed verse collection");

    Ok(verses)
}

fn parse_record(record: &Value) -> Option<Verse> {
    let chapter_id = field(record, CHAPTER_FIELDS).and_then(coerce_number)?;
    let verse_number = field(record, VERSE_FIELDS).and_then(coerce_number)?;

    Some(Verse {
        chapter_id,
        verse_number,
        arabic_text: text(record, ARABIC_FIELDS),
        default_transliteration: text(record, TRANSLITERATION_FIELDS),
        translation_text: text(record, TRANSLATION_FIELDS),
    })
}

fn field<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| !value.is_null())
}

fn text(record: &Value, names: &[&str]) -> String {
    match field(record, names) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Accepts integers, integral floats and numeric strings
fn coerce_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n.as_f64().and_then(integral_f64),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(v: f64) -> Option<u32> {
    if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}
