//! Selection queries over the ordered (chapter, verse) key space

use crate::verses::Verse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Single,
    Range,
    #[default]
    #[serde(alias = "surah")]
    WholeChapter,
}

/// Address of a verse. Ordering is lexicographic on (chapter, verse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersePosition {
    pub chapter: u32,
    pub verse: u32,
}

impl VersePosition {
    pub fn new(chapter: u32, verse: u32) -> Self {
        Self { chapter, verse }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionQuery {
    pub scope: Scope,
    pub start_chapter: u32,
    #[serde(default = "first_verse")]
    pub start_verse: u32,
    #[serde(default)]
    pub end_chapter: u32,
    #[serde(default)]
    pub end_verse: u32,
}

fn first_verse() -> u32 {
    1
}

impl Default for SelectionQuery {
    fn default() -> Self {
        Self {
            scope: Scope::WholeChapter,
            start_chapter: 1,
            start_verse: 1,
            end_chapter: 1,
            end_verse: 7,
        }
    }
}

impl SelectionQuery {
    pub fn single(chapter: u32, verse: u32) -> Self {
        Self {
            scope: Scope::Single,
            start_chapter: chapter,
            start_verse: verse,
            end_chapter: chapter,
            end_verse: verse,
        }
    }

    pub fn range(start: VersePosition, end: VersePosition) -> Self {
        Self {
            scope: Scope::Range,
            start_chapter: start.chapter,
            start_verse: start.verse,
            end_chapter: end.chapter,
            end_verse: end.verse,
        }
    }

    pub fn whole_chapter(chapter: u32) -> Self {
        Self {
            scope: Scope::WholeChapter,
            start_chapter: chapter,
            start_verse: 1,
            ..Self::default()
        }
    }

    pub fn start(&self) -> VersePosition {
        VersePosition::new(self.start_chapter, self.start_verse)
    }

    pub fn end(&self) -> VersePosition {
        VersePosition::new(self.end_chapter, self.end_verse)
    }

    /// A range whose start lies after its end. Only meaningful for `Scope::Range`.
    pub fn is_reversed(&self) -> bool {
        self.scope == Scope::Range && self.start() > self.end()
    }

    pub fn matches(&self, verse: &Verse) -> bool {
        match self.scope {
            Scope::Single => verse.position() == self.start(),
            Scope::WholeChapter => verse.chapter_id == self.start_chapter,
            Scope::Range => {
                let position = verse.position();
                self.start() <= position && position <= self.end()
            }
        }
    }
}
