//! Arabic-to-Latin transliteration over a user-editable character map

use serde::Serialize;
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

/// Arabic character (or grapheme cluster) -> Latin replacement.
/// Ordered so the persisted JSON is stable between saves.
pub type TransliterationMap = BTreeMap<String, String>;

/// Shown instead of an empty transliteration cell
pub const PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArabicLetter {
    #[serde(rename = "char")]
    pub letter: &'static str,
    pub name: &'static str,
    pub default_value: &'static str,
}

impl ArabicLetter {
    const fn new(letter: &'static str, name: &'static str, default_value: &'static str) -> Self {
        Self { letter, name, default_value }
    }
}

/// Letters offered for editing, in alphabet order, with their built-in values
pub static ARABIC_LETTERS: &[ArabicLetter] = &[
    ArabicLetter::new("ا", "Alif", "a"),
    ArabicLetter::new("ب", "Ba", "b"),
    ArabicLetter::new("ت", "Ta", "t"),
    ArabicLetter::new("ث", "Tha", "th"),
    ArabicLetter::new("ج", "Jim", "j"),
    ArabicLetter::new("ح", "Ha", "h"),
    ArabicLetter::new("خ", "Kha", "kh"),
    ArabicLetter::new("د", "Dal", "d"),
    ArabicLetter::new("ذ", "Dhal", "dh"),
    ArabicLetter::new("ر", "Ra", "r"),
    ArabicLetter::new("ز", "Zay", "z"),
    ArabicLetter::new("س", "Sin", "s"),
    ArabicLetter::new("ش", "Shin", "sh"),
    ArabicLetter::new("ص", "Sad", "s"),
    ArabicLetter::new("ض", "Dad", "d"),
    ArabicLetter::new("ط", "Taa", "t"),
    ArabicLetter::new("ظ", "Zaa", "z"),
    ArabicLetter::new("ع", "Ayn", "'"),
    ArabicLetter::new("غ", "Ghayn", "gh"),
    ArabicLetter::new("ف", "Fa", "f"),
    ArabicLetter::new("ق", "Qaf", "q"),
    ArabicLetter::new("ك", "Kaf", "k"),
    ArabicLetter::new("ل", "Lam", "l"),
    ArabicLetter::new("م", "Mim", "m"),
    ArabicLetter::new("ن", "Nun", "n"),
    ArabicLetter::new("ه", "Ha", "h"),
    ArabicLetter::new("و", "Waw", "w"),
    ArabicLetter::new("ي", "Ya", "y"),
    ArabicLetter::new("ء", "Hamza", "'"),
    ArabicLetter::new("أ", "Alif Hamza Above", "a"),
    ArabicLetter::new("إ", "Alif Hamza Below", "i"),
    ArabicLetter::new("آ", "Alif Madda", "aa"),
    ArabicLetter::new("ٱ", "Alif Wasla", "a"),
    ArabicLetter::new("ؤ", "Waw Hamza", "'"),
    ArabicLetter::new("ئ", "Ya Hamza", "'"),
    ArabicLetter::new("ة", "Ta Marbuta", "h"),
    ArabicLetter::new("ى", "Alif Maqsura", "a"),
];

pub fn default_map() -> TransliterationMap {
    ARABIC_LETTERS
        .iter()
        .map(|l| (l.letter.to_string(), l.default_value.to_string()))
        .collect()
}

/// Render Arabic text through `map`.
///
/// Input is walked by grapheme cluster. A cluster with its own entry is
/// replaced whole; otherwise each of its characters is replaced when mapped,
/// kept when it is ASCII alphanumeric or whitespace, and dropped otherwise
/// (unmapped tashkeel disappear this way). Whitespace runs collapse to one
/// space and the result is trimmed. Never returns an empty string.
pub fn transliterate(text: &str, map: &TransliterationMap) -> String {
    let mut out = String::with_capacity(text.len());

    for grapheme in text.graphemes(true) {
        if let Some(replacement) = map.get(grapheme) {
            out.push_str(replacement);
            continue;
        }

        let mut buf = [0u8; 4];
        for c in grapheme.chars() {
            let key = c.encode_utf8(&mut buf);
            if let Some(replacement) = map.get(&*key) {
                out.push_str(replacement);
            } else if c.is_ascii_alphanumeric() || c.is_whitespace() {
                out.push(c);
            }
        }
    }

    let collapsed = out.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        collapsed
    }
}

/// Parse an uploaded key file: one `source,replacement` (or tab separated)
/// pair per line. Short lines and lines without a source token are skipped.
pub fn parse_key_file(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split([',', '\t']);
            let source = parts.next()?.trim();
            let replacement = parts.next()?.trim();
            if source.is_empty() {
                return None;
            }
            Some((source.to_string(), replacement.to_string()))
        })
        .collect()
}

/// Merge an uploaded key file into `map`. Existing keys not named in the
/// file are kept; for duplicates the last line wins. Returns the number of
/// lines applied.
pub fn merge_key_file(map: &mut TransliterationMap, text: &str) -> usize {
    let entries = parse_key_file(text);
    let applied = entries.len();
    map.extend(entries);
    applied
}
