//! Shared fixtures for unit tests

use crate::verses::{VerseRepository, VerseSource};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

const FATIHAH: [(&str, &str); 7] = [
    ("بسم الله الرحمن الرحيم", "In the name of Allah, the Entirely Merciful, the Especially Merciful."),
    ("الحمد لله رب العالمين", "[All] praise is [due] to Allah, Lord of the worlds -"),
    ("الرحمن الرحيم", "The Entirely Merciful, the Especially Merciful,"),
    ("مالك يوم الدين", "Sovereign of the Day of Recompense."),
    ("إياك نعبد وإياك نستعين", "It is You we worship and You we ask for help."),
    ("اهدنا الصراط المستقيم", "Guide us to the straight path -"),
    (
        "صراط الذين أنعمت عليهم غير المغضوب عليهم ولا الضالين",
        "The path of those upon whom You have bestowed favor, not of those who have evoked [Your] anger or of those who are astray.",
    ),
];

/// Chapter 1 in the dataset's native column names (numbers partly as
/// strings), chapter 2 complete with 286 synthetic verses in canonical
/// names, and a few records that must be dropped.
pub fn sample_dataset() -> Value {
    let mut records = Vec::new();

    for (index, (arabic, english)) in FATIHAH.iter().enumerate() {
        let ayah = index + 1;
        let surah_number = if ayah % 2 == 0 { json!("1") } else { json!(1) };
        records.push(json!({
            "surah_number": surah_number,
            "ayah_number": ayah,
            "arabic_uthmani": arabic,
            "blank": format!("fatiha {}", ayah),
            "english_saheeh_international": english,
        }));
    }

    records.push(json!({
        "surah_number": "not a number",
        "ayah_number": 1,
        "arabic_uthmani": "بسم",
    }));
    records.push(json!({ "surah_number": 1 }));

    for verse in 1..=286 {
        records.push(json!({
            "chapter_id": 2,
            "verse_number": verse.to_string(),
            "arabic_text": "ذلك الكتاب لا ريب فيه",
            "default_transliteration": "",
            "translation_text": format!("Al-Baqarah {}", verse),
        }));
    }

    Value::Array(records)
}

pub fn write_dataset(dir: &TempDir, payload: &Value) -> PathBuf {
    let path = dir.path().join("csvjson.json");
    std::fs::write(&path, payload.to_string()).expect("write dataset");
    path
}

pub fn sample_repository(dir: &TempDir) -> VerseRepository {
    let path = write_dataset(dir, &sample_dataset());
    VerseRepository::new(VerseSource::File(path))
}
