use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::mode::{SpeakLang, TrainingMode};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("russian side of a word cannot be empty")]
    EmptyRussian,

    #[error("english side of a word cannot be empty")]
    EmptyEnglish,

    #[error("word \"{russian}\" has no translation required by the mode")]
    MissingTranslation { russian: String },
}

//
// ─── WORD ──────────────────────────────────────────────────────────────────────
//

/// A single dictation item: a Russian word, optionally paired with its
/// English translation.
///
/// Both sides are stored trimmed and never empty; the translation may only be
/// absent when the word is used in `RuOnly` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    russian: String,
    english: Option<String>,
}

impl Word {
    /// Creates a word, trimming both sides.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyRussian` / `WordError::EmptyEnglish` when a
    /// provided side is empty after trimming.
    pub fn new(
        russian: impl Into<String>,
        english: Option<impl Into<String>>,
    ) -> Result<Self, WordError> {
        let russian = russian.into().trim().to_owned();
        if russian.is_empty() {
            return Err(WordError::EmptyRussian);
        }

        let english = match english {
            Some(raw) => {
                let trimmed = raw.into().trim().to_owned();
                if trimmed.is_empty() {
                    return Err(WordError::EmptyEnglish);
                }
                Some(trimmed)
            }
            None => None,
        };

        Ok(Self { russian, english })
    }

    #[must_use]
    pub fn russian(&self) -> &str {
        &self.russian
    }

    #[must_use]
    pub fn english(&self) -> Option<&str> {
        self.english.as_deref()
    }

    /// The word whose audio is generated for this mode.
    ///
    /// # Errors
    ///
    /// Returns `WordError::MissingTranslation` when `EnToRu` is requested for
    /// a word without an English side.
    pub fn speak_word(&self, mode: TrainingMode) -> Result<&str, WordError> {
        match mode {
            TrainingMode::RuOnly | TrainingMode::RuToEn => Ok(&self.russian),
            TrainingMode::EnToRu => self.translation(),
        }
    }

    /// Language the audio prompt is synthesized in.
    #[must_use]
    pub fn speak_lang(&self, mode: TrainingMode) -> SpeakLang {
        mode.speak_lang()
    }

    /// The exact string the trainee must type for this mode.
    ///
    /// # Errors
    ///
    /// Returns `WordError::MissingTranslation` when `RuToEn` is requested for
    /// a word without an English side.
    pub fn expected_answer(&self, mode: TrainingMode) -> Result<&str, WordError> {
        match mode {
            TrainingMode::RuOnly | TrainingMode::EnToRu => Ok(&self.russian),
            TrainingMode::RuToEn => self.translation(),
        }
    }

    fn translation(&self) -> Result<&str, WordError> {
        self.english.as_deref().ok_or(WordError::MissingTranslation {
            russian: self.russian.clone(),
        })
    }
}
