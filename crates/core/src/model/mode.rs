use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ─── TRAINING MODE ─────────────────────────────────────────────────────────────
//

/// What is spoken and what the trainee must type.
///
/// - `RuOnly`: a Russian word is spoken and must be spelled back in Russian.
/// - `RuToEn`: a Russian word is spoken, the English translation is expected.
/// - `EnToRu`: an English word is spoken, the Russian translation is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    #[default]
    RuOnly,
    RuToEn,
    EnToRu,
}

impl TrainingMode {
    /// Wire name of the mode (`ru_only`, `ru_to_en`, `en_to_ru`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingMode::RuOnly => "ru_only",
            TrainingMode::RuToEn => "ru_to_en",
            TrainingMode::EnToRu => "en_to_ru",
        }
    }

    /// True for modes where the expected answer is a translation, so every
    /// word must carry an English side.
    #[must_use]
    pub fn requires_translation(self) -> bool {
        !matches!(self, TrainingMode::RuOnly)
    }

    /// Language of the audio prompt in this mode.
    #[must_use]
    pub fn speak_lang(self) -> SpeakLang {
        match self {
            TrainingMode::RuOnly | TrainingMode::RuToEn => SpeakLang::Ru,
            TrainingMode::EnToRu => SpeakLang::En,
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a mode from its wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    raw: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown training mode: {}", self.raw)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for TrainingMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru_only" => Ok(TrainingMode::RuOnly),
            "ru_to_en" => Ok(TrainingMode::RuToEn),
            "en_to_ru" => Ok(TrainingMode::EnToRu),
            other => Err(ParseModeError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── SPEAK LANGUAGE ────────────────────────────────────────────────────────────
//

/// Language tag passed to the speech synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakLang {
    Ru,
    En,
}

impl SpeakLang {
    /// Two-letter language code understood by the synthesis service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SpeakLang::Ru => "ru",
            SpeakLang::En => "en",
        }
    }
}

impl fmt::Display for SpeakLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
