//! Projection of verses into export rows

use crate::export::{Column, ExportRecord};
use crate::transliteration::{transliterate, TransliterationMap};
use crate::verses::Verse;
use serde::Serialize;

/// ARABIC END OF AYAH; fonts with ligature support draw the number inside it
pub const END_OF_AYAH: char = '\u{06DD}';

const ARABIC_INDIC_DIGITS: [char; 10] = [
    '\u{0660}', '\u{0661}', '\u{0662}', '\u{0663}', '\u{0664}',
    '\u{0665}', '\u{0666}', '\u{0667}', '\u{0668}', '\u{0669}',
];

pub const ARABIC_COLUMN: &str = "arabic_uthmani";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "surah_number")]
    pub chapter_id: u32,
    #[serde(rename = "ayah_number")]
    pub verse_number: u32,
    #[serde(rename = "arabic_uthmani")]
    pub arabic_display: String,
    pub transliteration: String,
    #[serde(rename = "translation")]
    pub translation_text: String,
}

impl ExportRecord for ExportRow {
    const COLUMNS: &'static [Column] = &[
        Column::new("surah_number", 50),
        Column::new("ayah_number", 50),
        Column::new(ARABIC_COLUMN, 300),
        Column::new("transliteration", 200),
        Column::new("translation", 300),
    ];
    const RTL_COLUMN: Option<&'static str> = Some(ARABIC_COLUMN);

    fn values(&self) -> Vec<Option<String>> {
        vec![
            Some(self.chapter_id.to_string()),
            Some(self.verse_number.to_string()),
            Some(self.arabic_display.clone()),
            Some(self.transliteration.clone()),
            Some(self.translation_text.clone()),
        ]
    }
}

/// 12 -> "١٢"
pub fn to_arabic_indic(number: u32) -> String {
    number
        .to_string()
        .chars()
        .filter_map(|d| d.to_digit(10))
        .map(|d| ARABIC_INDIC_DIGITS[d as usize])
        .collect()
}

/// Space, end-of-ayah sign, then the verse number in Arabic-Indic digits
pub fn verse_end_marker(verse_number: u32) -> String {
    format!(" {}{}", END_OF_AYAH, to_arabic_indic(verse_number))
}

/// Turn verses into export rows, in order.
///
/// With a map, the transliteration is generated from the raw Arabic text
/// (never the decorated display text); without one, the verse's stored
/// transliteration is used unchanged.
pub fn project(verses: &[Verse], map: Option<&TransliterationMap>) -> Vec<ExportRow> {
    verses
        .iter()
        .map(|v| ExportRow {
            chapter_id: v.chapter_id,
            verse_number: v.verse_number,
            arabic_display: format!("{}{}", v.arabic_text, verse_end_marker(v.verse_number)),
            transliteration: match map {
                Some(map) => transliterate(&v.arabic_text, map),
                None => v.default_transliteration.clone(),
            },
            translation_text: v.translation_text.clone(),
        })
        .collect()
}
