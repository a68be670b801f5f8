use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ids::{CategoryId, LetterId};
use crate::model::mode::TrainingMode;

//
// ─── CATEGORY KIND ─────────────────────────────────────────────────────────────
//

/// Kind of a word catalog category.
///
/// Dictionary classes hold untranslated spelling words grouped by first
/// letter; lessons and topics hold translated pairs. The kind decides which
/// training modes a category can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[serde(rename = "class")]
    DictionaryClass,
    Lesson,
    Topic,
}

impl CategoryKind {
    /// Storage/wire name of the kind (`class`, `lesson`, `topic`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::DictionaryClass => "class",
            CategoryKind::Lesson => "lesson",
            CategoryKind::Topic => "topic",
        }
    }

    /// Whether categories of this kind can feed the given mode.
    ///
    /// Spelling-only training draws from dictionary classes; translation
    /// training draws from lessons and topics.
    #[must_use]
    pub fn supports_mode(self, mode: TrainingMode) -> bool {
        match self {
            CategoryKind::DictionaryClass => mode == TrainingMode::RuOnly,
            CategoryKind::Lesson | CategoryKind::Topic => mode.requires_translation(),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a category kind from its storage name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    raw: String,
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category kind: {}", self.raw)
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for CategoryKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(CategoryKind::DictionaryClass),
            "lesson" => Ok(CategoryKind::Lesson),
            "topic" => Ok(CategoryKind::Topic),
            other => Err(ParseKindError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── CATALOG ENTRIES ───────────────────────────────────────────────────────────
//

/// A browsable word category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub kind: CategoryKind,
}

/// An alphabet letter with the number of catalog words starting with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub id: LetterId,
    pub letter: String,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_roundtrip() {
        for kind in [
            CategoryKind::DictionaryClass,
            CategoryKind::Lesson,
            CategoryKind::Topic,
        ] {
            let parsed: CategoryKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("grade".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn dictionary_classes_feed_spelling_only() {
        let kind = CategoryKind::DictionaryClass;
        assert!(kind.supports_mode(TrainingMode::RuOnly));
        assert!(!kind.supports_mode(TrainingMode::RuToEn));
        assert!(!kind.supports_mode(TrainingMode::EnToRu));
    }

    #[test]
    fn lessons_and_topics_feed_translation_modes() {
        for kind in [CategoryKind::Lesson, CategoryKind::Topic] {
            assert!(!kind.supports_mode(TrainingMode::RuOnly));
            assert!(kind.supports_mode(TrainingMode::RuToEn));
            assert!(kind.supports_mode(TrainingMode::EnToRu));
        }
    }
}
