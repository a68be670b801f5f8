use thiserror::Error;

use crate::model::catalog::Category;
use crate::model::ids::LetterId;
use crate::model::mode::TrainingMode;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupError {
    #[error("select at least one category")]
    NoCategorySelected,

    #[error("select at least one letter")]
    NoLetterSelected,

    #[error("enter at least one word")]
    NoTextEntered,
}

//
// ─── WORD SOURCE ───────────────────────────────────────────────────────────────
//

/// Where the word list for a session comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSource {
    #[default]
    Database,
    Manual,
}

//
// ─── SETUP SELECTION ───────────────────────────────────────────────────────────
//

/// Everything the user chooses before a training session starts.
///
/// Database picks and manual text live side by side: toggling the source
/// never clears the other side, so the user can flip back without retyping.
/// Switching the mode, however, drops selections the new mode cannot use.
#[derive(Debug, Clone, Default)]
pub struct SetupSelection {
    mode: TrainingMode,
    source: WordSource,
    categories: Vec<Category>,
    letters: Vec<LetterId>,
    manual_text: String,
}

impl SetupSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> TrainingMode {
        self.mode
    }

    #[must_use]
    pub fn source(&self) -> WordSource {
        self.source
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn letters(&self) -> &[LetterId] {
        &self.letters
    }

    #[must_use]
    pub fn manual_text(&self) -> &str {
        &self.manual_text
    }

    /// Switches the training mode, discarding mode-incompatible picks:
    /// categories whose kind the new mode cannot use, and letter picks when
    /// leaving spelling-only mode.
    pub fn set_mode(&mut self, mode: TrainingMode) {
        self.mode = mode;
        self.categories.retain(|c| c.kind.supports_mode(mode));
        if mode != TrainingMode::RuOnly {
            self.letters.clear();
        }
    }

    /// Switches the word source. Both the database picks and the manual text
    /// survive the switch.
    pub fn set_source(&mut self, source: WordSource) {
        self.source = source;
    }

    pub fn set_manual_text(&mut self, text: impl Into<String>) {
        self.manual_text = text.into();
    }

    /// Adds a category pick; picks incompatible with the current mode are
    /// ignored. Returns whether the pick was added.
    pub fn select_category(&mut self, category: Category) -> bool {
        if !category.kind.supports_mode(self.mode) {
            return false;
        }
        if self.categories.iter().any(|c| c.id == category.id) {
            return false;
        }
        self.categories.push(category);
        true
    }

    pub fn deselect_category(&mut self, id: crate::model::ids::CategoryId) {
        self.categories.retain(|c| c.id != id);
    }

    pub fn select_letter(&mut self, id: LetterId) {
        if !self.letters.contains(&id) {
            self.letters.push(id);
        }
    }

    pub fn deselect_letter(&mut self, id: LetterId) {
        self.letters.retain(|l| *l != id);
    }

    pub fn clear_letters(&mut self) {
        self.letters.clear();
    }

    /// Checks that the selection can start a session.
    ///
    /// # Errors
    ///
    /// - `NoCategorySelected` for a database source with no category picks.
    /// - `NoLetterSelected` for spelling-only database training without
    ///   letter picks.
    /// - `NoTextEntered` for a manual source with blank text.
    pub fn validate(&self) -> Result<(), SetupError> {
        match self.source {
            WordSource::Database => {
                if self.categories.is_empty() {
                    return Err(SetupError::NoCategorySelected);
                }
                if self.mode == TrainingMode::RuOnly && self.letters.is_empty() {
                    return Err(SetupError::NoLetterSelected);
                }
                Ok(())
            }
            WordSource::Manual => {
                if self.manual_text.trim().is_empty() {
                    return Err(SetupError::NoTextEntered);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::CategoryKind;
    use crate::model::ids::CategoryId;

    fn category(id: u64, kind: CategoryKind) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
            description: None,
            kind,
        }
    }

    #[test]
    fn database_source_requires_a_category() {
        let mut selection = SetupSelection::new();
        selection.set_mode(TrainingMode::RuToEn);
        assert_eq!(selection.validate(), Err(SetupError::NoCategorySelected));

        selection.select_category(category(1, CategoryKind::Lesson));
        assert_eq!(selection.validate(), Ok(()));
    }

    #[test]
    fn spelling_mode_also_requires_a_letter() {
        let mut selection = SetupSelection::new();
        selection.select_category(category(1, CategoryKind::DictionaryClass));
        assert_eq!(selection.validate(), Err(SetupError::NoLetterSelected));

        selection.select_letter(LetterId::new(3));
        assert_eq!(selection.validate(), Ok(()));
    }

    #[test]
    fn manual_source_requires_text() {
        let mut selection = SetupSelection::new();
        selection.set_source(WordSource::Manual);
        assert_eq!(selection.validate(), Err(SetupError::NoTextEntered));

        selection.set_manual_text("кот\nсобака");
        assert_eq!(selection.validate(), Ok(()));
    }

    #[test]
    fn incompatible_category_pick_is_ignored() {
        let mut selection = SetupSelection::new();
        assert!(!selection.select_category(category(1, CategoryKind::Lesson)));
        assert!(selection.select_category(category(2, CategoryKind::DictionaryClass)));
        assert_eq!(selection.categories().len(), 1);
    }

    #[test]
    fn mode_switch_drops_incompatible_picks() {
        let mut selection = SetupSelection::new();
        selection.select_category(category(1, CategoryKind::DictionaryClass));
        selection.select_letter(LetterId::new(7));

        selection.set_mode(TrainingMode::RuToEn);
        assert!(selection.categories().is_empty());
        assert!(selection.letters().is_empty());
    }

    #[test]
    fn source_switch_preserves_both_sides() {
        let mut selection = SetupSelection::new();
        selection.select_category(category(1, CategoryKind::DictionaryClass));
        selection.select_letter(LetterId::new(7));
        selection.set_manual_text("вокзал");

        selection.set_source(WordSource::Manual);
        selection.set_source(WordSource::Database);

        assert_eq!(selection.categories().len(), 1);
        assert_eq!(selection.letters(), &[LetterId::new(7)]);
        assert_eq!(selection.manual_text(), "вокзал");
    }

    #[test]
    fn duplicate_picks_are_collapsed() {
        let mut selection = SetupSelection::new();
        selection.select_category(category(1, CategoryKind::DictionaryClass));
        selection.select_category(category(1, CategoryKind::DictionaryClass));
        selection.select_letter(LetterId::new(2));
        selection.select_letter(LetterId::new(2));

        assert_eq!(selection.categories().len(), 1);
        assert_eq!(selection.letters().len(), 1);
    }
}
