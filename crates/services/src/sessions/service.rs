use chrono::{DateTime, Utc};
use std::fmt;

use diktant_core::answer;
use diktant_core::model::{ResultRecord, RunningStats, TrainingMode, Word};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory dictation session.
///
/// Holds a fixed word list in a fixed order and steps through it one answer
/// at a time. The session is complete once every word has been answered;
/// `reset` replays the same list in the same order.
pub struct TrainingSession {
    mode: TrainingMode,
    words: Vec<Word>,
    current: usize,
    results: Vec<ResultRecord>,
    stats: RunningStats,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TrainingSession {
    /// Create a new session over the given word list.
    ///
    /// Every word must resolve under the mode (translation present where the
    /// mode needs it), so answering can never fail mid-session.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no words are provided, or
    /// `SessionError::Word` if a word cannot be used in this mode.
    pub fn new(
        mode: TrainingMode,
        words: Vec<Word>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::Empty);
        }
        for word in &words {
            word.speak_word(mode)?;
            word.expected_answer(mode)?;
        }

        Ok(Self {
            mode,
            words,
            current: 0,
            results: Vec::new(),
            stats: RunningStats::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn mode(&self) -> TrainingMode {
        self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    #[must_use]
    pub fn stats(&self) -> RunningStats {
        self.stats
    }

    /// Total number of words in this session.
    #[must_use]
    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    /// Number of words that have already been answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.results.len()
    }

    /// Number of remaining words that have not been answered yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.current)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_words(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Evaluate an answer for the current word and advance the session.
    ///
    /// Comparison trims surrounding whitespace and is case sensitive.
    /// `answered_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is already finished
    /// and `SessionError::BlankAnswer` for a blank submission, which leaves
    /// the session unchanged.
    pub fn submit_answer(
        &mut self,
        submitted: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<&ResultRecord, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if answer::is_blank(submitted) {
            return Err(SessionError::BlankAnswer);
        }

        let word = self.words.get(self.current).ok_or(SessionError::Completed)?;
        let expected = word.expected_answer(self.mode)?.to_owned();
        let heard = word.speak_word(self.mode)?.to_owned();
        let is_correct = answer::evaluate(&expected, submitted);

        self.stats.record(is_correct);
        self.results.push(ResultRecord {
            heard_word: heard,
            user_answer: submitted.trim().to_owned(),
            correct_word: expected,
            is_correct,
        });

        self.current += 1;
        if self.current >= self.words.len() {
            self.completed_at = Some(answered_at);
        }

        self.results.last().ok_or(SessionError::Completed)
    }

    /// Restart the session over the same word list in the same order,
    /// clearing all answers and counters.
    pub fn reset(&mut self, restarted_at: DateTime<Utc>) {
        self.current = 0;
        self.results.clear();
        self.stats.reset();
        self.started_at = restarted_at;
        self.completed_at = None;
    }
}

impl fmt::Debug for TrainingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingSession")
            .field("mode", &self.mode)
            .field("words_len", &self.words.len())
            .field("current", &self.current)
            .field("results_len", &self.results.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
