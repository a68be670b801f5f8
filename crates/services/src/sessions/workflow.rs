use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info};

use diktant_core::model::{SetupSelection, TrainingMode, Word, WordSource};
use diktant_core::parse::parse_manual_text;
use storage::repository::WordRepository;

use super::service::TrainingSession;
use super::view::AnswerFeedback;
use crate::Clock;
use crate::error::SessionError;

/// Orchestrates session start, answering, and restart.
#[derive(Clone)]
pub struct TrainingLoopService {
    clock: Clock,
    words: Arc<dyn WordRepository>,
    shuffle: bool,
}

impl TrainingLoopService {
    #[must_use]
    pub fn new(clock: Clock, words: Arc<dyn WordRepository>) -> Self {
        Self {
            clock,
            words,
            shuffle: false,
        }
    }

    /// Shuffle the word list once when a session starts. Restarts keep the
    /// shuffled order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Start a new session from the given setup selection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Setup` for an invalid selection,
    /// `SessionError::Parse` for malformed manual text, and storage or
    /// session start failures otherwise.
    pub async fn start(&self, selection: &SetupSelection) -> Result<TrainingSession, SessionError> {
        selection.validate()?;
        match selection.source() {
            WordSource::Database => self.start_from_database(selection).await,
            WordSource::Manual => self.start_from_manual(selection.manual_text(), selection.mode()),
        }
    }

    async fn start_from_database(
        &self,
        selection: &SetupSelection,
    ) -> Result<TrainingSession, SessionError> {
        let mode = selection.mode();
        let category_ids: Vec<_> = selection.categories().iter().map(|c| c.id).collect();

        let records = self
            .words
            .words_by_filters(&category_ids, selection.letters())
            .await?;

        // Rows without a translation cannot be asked in translation modes.
        let mut words = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        for record in records {
            if mode.requires_translation() && record.english.is_none() {
                skipped += 1;
                continue;
            }
            words.push(record.into_word()?);
        }
        if skipped > 0 {
            debug!(skipped, "skipped untranslated catalog words");
        }

        info!(mode = %mode.as_str(), word_count = words.len(), "starting catalog session");
        self.build_session(mode, words)
    }

    fn start_from_manual(
        &self,
        text: &str,
        mode: TrainingMode,
    ) -> Result<TrainingSession, SessionError> {
        let words = parse_manual_text(text, mode)?;
        info!(mode = %mode.as_str(), word_count = words.len(), "starting manual session");
        self.build_session(mode, words)
    }

    fn build_session(
        &self,
        mode: TrainingMode,
        mut words: Vec<Word>,
    ) -> Result<TrainingSession, SessionError> {
        if self.shuffle {
            words.shuffle(&mut rand::rng());
        }
        TrainingSession::new(mode, words, self.clock.now())
    }

    /// Evaluate an answer for the session's current word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the session is complete, the answer is
    /// blank, or evaluation fails.
    pub fn answer_current(
        &self,
        session: &mut TrainingSession,
        submitted: &str,
    ) -> Result<AnswerFeedback, SessionError> {
        let answered_at = self.clock.now();
        let record = session.submit_answer(submitted, answered_at)?.clone();
        Ok(AnswerFeedback::from_record(&record, session.stats()))
    }

    /// Restart the session from the beginning with the same word list.
    pub fn restart(&self, session: &mut TrainingSession) {
        session.reset(self.clock.now());
        info!(total_words = session.total_words(), "session restarted");
    }
}
