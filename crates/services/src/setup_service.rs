use std::sync::Arc;

use diktant_core::model::{Category, CategoryId, Letter, SetupSelection, TrainingMode, WordSource};
use storage::repository::{CategoryRepository, LetterRepository, Storage, WordRepository};

use crate::error::CatalogError;

/// Catalog browsing facade for the setup screen.
///
/// Hides repository access from the presentation layer; the selection itself
/// lives in `SetupSelection` on the caller's side.
#[derive(Clone)]
pub struct SetupService {
    categories: Arc<dyn CategoryRepository>,
    letters: Arc<dyn LetterRepository>,
    words: Arc<dyn WordRepository>,
}

impl SetupService {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        letters: Arc<dyn LetterRepository>,
        words: Arc<dyn WordRepository>,
    ) -> Self {
        Self {
            categories,
            letters,
            words,
        }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            storage.categories.clone(),
            storage.letters.clone(),
            storage.words.clone(),
        )
    }

    /// Categories a given mode can draw words from.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` on repository failures.
    pub async fn categories_for_mode(
        &self,
        mode: TrainingMode,
    ) -> Result<Vec<Category>, CatalogError> {
        let mut categories = self.categories.list_categories(None).await?;
        categories.retain(|c| c.kind.supports_mode(mode));
        Ok(categories)
    }

    /// Letters with word counts for the given categories. Only meaningful
    /// for spelling-only training.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` on repository failures.
    pub async fn letters(&self, category_ids: &[CategoryId]) -> Result<Vec<Letter>, CatalogError> {
        Ok(self.letters.list_letters(category_ids).await?)
    }

    /// Number of words the current selection would put into a session.
    ///
    /// Spelling-only selections sum the counts of the picked letters;
    /// translation selections count translated words in the picked
    /// categories. Manual selections count nothing here, the text is parsed
    /// at session start.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` on repository failures.
    pub async fn count_selected(&self, selection: &SetupSelection) -> Result<u64, CatalogError> {
        if selection.source() == WordSource::Manual {
            return Ok(0);
        }

        let category_ids: Vec<_> = selection.categories().iter().map(|c| c.id).collect();

        if selection.mode() == TrainingMode::RuOnly {
            let letters = self.letters.list_letters(&category_ids).await?;
            let count = letters
                .iter()
                .filter(|l| selection.letters().contains(&l.id))
                .map(|l| u64::from(l.count))
                .sum();
            Ok(count)
        } else {
            Ok(self
                .words
                .count_words(&category_ids, selection.mode())
                .await?)
        }
    }
}
