use serde::Serialize;

use diktant_core::model::{Grade, ResultRecord, RunningStats, SpeakLang};

use super::service::TrainingSession;
use crate::error::SessionError;

/// Presentation-agnostic attempt counters.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsView {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub percentage: f64,
}

impl StatsView {
    #[must_use]
    pub fn from_stats(stats: RunningStats) -> Self {
        Self {
            total_attempts: stats.total(),
            correct_attempts: stats.correct(),
            percentage: stats.percentage(),
        }
    }
}

/// What the presentation layer needs to show the word being asked.
///
/// `speak_word` and `speak_lang` are `None` once the session is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentWordView {
    pub finished: bool,
    /// Zero-based index of the current word.
    pub current_index: usize,
    pub total_words: usize,
    pub speak_word: Option<String>,
    pub speak_lang: Option<SpeakLang>,
}

impl CurrentWordView {
    /// Build the view for the session's current position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Word` if the current word cannot resolve under
    /// the session mode. Sessions validate words up front, so this only
    /// fires on a construction bug.
    pub fn from_session(session: &TrainingSession) -> Result<Self, SessionError> {
        let total_words = session.total_words();
        let current_index = session.answered_count();
        match session.current_word() {
            Some(word) => Ok(Self {
                finished: false,
                current_index,
                total_words,
                speak_word: Some(word.speak_word(session.mode())?.to_owned()),
                speak_lang: Some(word.speak_lang(session.mode())),
            }),
            None => Ok(Self {
                finished: true,
                current_index,
                total_words,
                speak_word: None,
                speak_lang: None,
            }),
        }
    }
}

/// Feedback for a single evaluated answer, with the running counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_word: String,
    pub heard_word: String,
    pub stats: StatsView,
}

impl AnswerFeedback {
    #[must_use]
    pub fn from_record(record: &ResultRecord, stats: RunningStats) -> Self {
        Self {
            is_correct: record.is_correct,
            correct_word: record.correct_word.clone(),
            heard_word: record.heard_word.clone(),
            stats: StatsView::from_stats(stats),
        }
    }
}

/// Final report for a completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub grade: Grade,
    pub total_words: usize,
    pub correct_count: usize,
    pub errors_count: usize,
    pub percentage: f64,
    pub records: Vec<ResultRecord>,
}

impl SessionReport {
    /// Build the report for a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while words remain unanswered.
    pub fn from_session(session: &TrainingSession) -> Result<Self, SessionError> {
        if !session.is_complete() {
            return Err(SessionError::NotCompleted);
        }

        let records = session.results().to_vec();
        let correct_count = records.iter().filter(|r| r.is_correct).count();
        let percentage = session.stats().percentage();

        Ok(Self {
            grade: Grade::from_percentage(percentage),
            total_words: records.len(),
            correct_count,
            errors_count: records.len() - correct_count,
            percentage,
            records,
        })
    }

    /// Mistakes in the order they were made.
    #[must_use]
    pub fn incorrect(&self) -> Vec<&ResultRecord> {
        self.records.iter().filter(|r| !r.is_correct).collect()
    }

    /// Correct answers in the order they were given.
    #[must_use]
    pub fn correct(&self) -> Vec<&ResultRecord> {
        self.records.iter().filter(|r| r.is_correct).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diktant_core::model::{TrainingMode, Word};
    use diktant_core::time::fixed_now;

    fn build_session(words: &[&str]) -> TrainingSession {
        let words = words
            .iter()
            .map(|w| Word::new(*w, None::<&str>).unwrap())
            .collect();
        TrainingSession::new(TrainingMode::RuOnly, words, fixed_now()).unwrap()
    }

    #[test]
    fn current_word_view_follows_the_session() {
        let mut session = build_session(&["кот", "собака"]);

        let view = CurrentWordView::from_session(&session).unwrap();
        assert!(!view.finished);
        assert_eq!(view.current_index, 0);
        assert_eq!(view.total_words, 2);
        assert_eq!(view.speak_word.as_deref(), Some("кот"));
        assert_eq!(view.speak_lang, Some(SpeakLang::Ru));

        session.submit_answer("кот", fixed_now()).unwrap();
        session.submit_answer("собака", fixed_now()).unwrap();

        let view = CurrentWordView::from_session(&session).unwrap();
        assert!(view.finished);
        assert_eq!(view.speak_word, None);
    }

    #[test]
    fn report_requires_a_completed_session() {
        let session = build_session(&["кот"]);
        let err = SessionReport::from_session(&session).unwrap_err();
        assert!(matches!(err, SessionError::NotCompleted));
    }

    #[test]
    fn report_partitions_preserve_order() {
        let mut session = build_session(&["кот", "собака", "сорока"]);
        session.submit_answer("кот", fixed_now()).unwrap();
        session.submit_answer("сабака", fixed_now()).unwrap();
        session.submit_answer("сорока", fixed_now()).unwrap();

        let report = SessionReport::from_session(&session).unwrap();
        assert_eq!(report.total_words, 3);
        assert_eq!(report.correct_count, 2);
        assert_eq!(report.errors_count, 1);

        let incorrect = report.incorrect();
        assert_eq!(incorrect.len(), 1);
        assert_eq!(incorrect[0].correct_word, "собака");

        let correct = report.correct();
        assert_eq!(correct[0].correct_word, "кот");
        assert_eq!(correct[1].correct_word, "сорока");
    }

    #[test]
    fn perfect_session_grades_excellent() {
        let mut session = build_session(&["кот", "собака"]);
        session.submit_answer("кот", fixed_now()).unwrap();
        session.submit_answer("собака", fixed_now()).unwrap();

        let report = SessionReport::from_session(&session).unwrap();
        assert_eq!(report.grade, Grade::Excellent);
        assert!((report.percentage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_view_serializes_with_wire_names() {
        let mut stats = RunningStats::new();
        stats.record(true);
        stats.record(false);

        let json = serde_json::to_value(StatsView::from_stats(stats)).unwrap();
        assert_eq!(json["total_attempts"], 2);
        assert_eq!(json["correct_attempts"], 1);
        assert_eq!(json["percentage"], 50.0);
    }

    #[test]
    fn grade_serializes_as_number() {
        let mut session = build_session(&["кот"]);
        session.submit_answer("кит", fixed_now()).unwrap();

        let report = SessionReport::from_session(&session).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["grade"], 1);
        assert_eq!(json["records"][0]["is_correct"], false);
    }
}
