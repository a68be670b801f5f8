use serde::{Deserialize, Serialize};

//
// ─── RESULT RECORD ─────────────────────────────────────────────────────────────
//

/// Outcome of one answered word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The word that was spoken to the trainee.
    pub heard_word: String,
    /// The submitted answer, trimmed.
    pub user_answer: String,
    /// The expected spelling.
    pub correct_word: String,
    pub is_correct: bool,
}

//
// ─── RUNNING STATS ─────────────────────────────────────────────────────────────
//

/// Attempt counters kept in lock-step with the session's result records.
///
/// `record` is the only way to move the counters forward, so `total` can
/// never drift from the number of appended records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStats {
    total: u32,
    correct: u32,
}

impl RunningStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Share of correct answers in percent; `0.0` before the first attempt.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total) * 100.0
    }

    /// Counts one attempt.
    pub fn record(&mut self, is_correct: bool) {
        self.total = self.total.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    /// Returns the counters to their initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
