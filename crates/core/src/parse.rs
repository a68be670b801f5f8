//! Parsing of manually entered word lists.
//!
//! Spelling-only mode expects one word per line. Translation modes expect
//! `russian - english` pairs, separated by a hyphen with whitespace on both
//! sides so hyphenated words like `по-русски` survive intact.

use thiserror::Error;

use crate::model::{TrainingMode, Word, WordError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("line {line}: expected \"russian - english\"")]
    MissingSeparator { line: usize },

    #[error("line {line}: russian side is empty")]
    EmptyRussian { line: usize },

    #[error("line {line}: english side is empty")]
    EmptyEnglish { line: usize },
}

/// Parses a manual word list for the given mode.
///
/// Blank lines are skipped; line numbers in errors are 1-based and count
/// blank lines too, so they match what the user typed.
///
/// # Errors
///
/// Returns the first malformed line: a translation line without the
/// ` - ` separator, or a line whose russian or english side is blank.
pub fn parse_manual_text(text: &str, mode: TrainingMode) -> Result<Vec<Word>, ParseError> {
    let mut words = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let word = if mode.requires_translation() {
            let (russian, english) = split_pair(raw).ok_or(ParseError::MissingSeparator { line })?;
            match Word::new(russian, Some(english)) {
                Ok(word) => word,
                Err(WordError::EmptyRussian) => return Err(ParseError::EmptyRussian { line }),
                Err(_) => return Err(ParseError::EmptyEnglish { line }),
            }
        } else {
            match Word::new(raw, None::<&str>) {
                Ok(word) => word,
                Err(_) => return Err(ParseError::EmptyRussian { line }),
            }
        };

        words.push(word);
    }

    Ok(words)
}

/// Splits a `russian - english` line at the first hyphen that has whitespace
/// on both sides.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    for (pos, _) in line.match_indices('-') {
        let before_ws = line[..pos]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        let after_ws = line[pos + 1..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace);
        if before_ws && after_ws {
            return Some((&line[..pos], &line[pos + 1..]));
        }
    }
    None
}
