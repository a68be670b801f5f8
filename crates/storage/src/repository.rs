use async_trait::async_trait;
use diktant_core::model::{
    Category, CategoryId, CategoryKind, Letter, LetterId, TrainingMode, Word, WordError, WordId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a catalog word.
///
/// This mirrors the domain `Word` plus its catalog placement so repositories
/// can serialize/deserialize without leaking storage concerns into the
/// domain layer.
#[derive(Debug, Clone)]
pub struct WordRecord {
    pub id: WordId,
    pub russian: String,
    pub english: Option<String>,
    pub category_id: CategoryId,
    /// Set for dictionary-class words grouped by first letter.
    pub letter_id: Option<LetterId>,
    pub difficulty: u8,
}

impl WordRecord {
    /// Convert the record into a domain `Word`.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if either side fails validation.
    pub fn into_word(self) -> Result<Word, WordError> {
        Word::new(self.russian, self.english)
    }
}

/// Persisted shape for an alphabet letter.
#[derive(Debug, Clone)]
pub struct LetterRecord {
    pub id: LetterId,
    pub letter: String,
    pub sort_order: u32,
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist or update a category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;

    /// List categories, optionally restricted to one kind, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_categories(
        &self,
        kind: Option<CategoryKind>,
    ) -> Result<Vec<Category>, StorageError>;
}

#[async_trait]
pub trait LetterRepository: Send + Sync {
    /// Persist or update a letter.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the letter cannot be stored.
    async fn upsert_letter(&self, letter: &LetterRecord) -> Result<(), StorageError>;

    /// List letters with per-letter word counts, ordered by sort order.
    ///
    /// An empty `category_ids` slice counts words across the whole catalog;
    /// otherwise only words in the given categories are counted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_letters(&self, category_ids: &[CategoryId]) -> Result<Vec<Letter>, StorageError>;
}

#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Persist or update a word.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the word cannot be stored.
    async fn insert_word(&self, word: &WordRecord) -> Result<(), StorageError>;

    /// Fetch words matching the category and letter filters, ordered by the
    /// russian side. An empty filter slice means "no restriction".
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn words_by_filters(
        &self,
        category_ids: &[CategoryId],
        letter_ids: &[LetterId],
    ) -> Result<Vec<WordRecord>, StorageError>;

    /// Count words in the given categories that are usable in the given
    /// mode. Translation modes only count words with an english side.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn count_words(
        &self,
        category_ids: &[CategoryId],
        mode: TrainingMode,
    ) -> Result<u64, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    categories: Arc<Mutex<HashMap<CategoryId, Category>>>,
    letters: Arc<Mutex<HashMap<LetterId, LetterRecord>>>,
    words: Arc<Mutex<HashMap<WordId, WordRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(category.id, category.clone());
        Ok(())
    }

    async fn list_categories(
        &self,
        kind: Option<CategoryKind>,
    ) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut out: Vec<Category> = guard
            .values()
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

#[async_trait]
impl LetterRepository for InMemoryRepository {
    async fn upsert_letter(&self, letter: &LetterRecord) -> Result<(), StorageError> {
        let mut guard = self
            .letters
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(letter.id, letter.clone());
        Ok(())
    }

    async fn list_letters(&self, category_ids: &[CategoryId]) -> Result<Vec<Letter>, StorageError> {
        let letters = self
            .letters
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let words = self
            .words
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut records: Vec<LetterRecord> = letters.values().cloned().collect();
        records.sort_by_key(|l| l.sort_order);

        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let count = words
                .values()
                .filter(|w| w.letter_id == Some(record.id))
                .filter(|w| category_ids.is_empty() || category_ids.contains(&w.category_id))
                .count();
            let count = u32::try_from(count)
                .map_err(|_| StorageError::Serialization("letter count overflow".into()))?;
            out.push(Letter {
                id: record.id,
                letter: record.letter,
                count,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl WordRepository for InMemoryRepository {
    async fn insert_word(&self, word: &WordRecord) -> Result<(), StorageError> {
        let mut guard = self
            .words
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(word.id, word.clone());
        Ok(())
    }

    async fn words_by_filters(
        &self,
        category_ids: &[CategoryId],
        letter_ids: &[LetterId],
    ) -> Result<Vec<WordRecord>, StorageError> {
        let guard = self
            .words
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut out: Vec<WordRecord> = guard
            .values()
            .filter(|w| category_ids.is_empty() || category_ids.contains(&w.category_id))
            .filter(|w| {
                letter_ids.is_empty() || w.letter_id.is_some_and(|l| letter_ids.contains(&l))
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| a.russian.cmp(&b.russian));
        Ok(out)
    }

    async fn count_words(
        &self,
        category_ids: &[CategoryId],
        mode: TrainingMode,
    ) -> Result<u64, StorageError> {
        let guard = self
            .words
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let count = guard
            .values()
            .filter(|w| category_ids.is_empty() || category_ids.contains(&w.category_id))
            .filter(|w| !mode.requires_translation() || w.english.is_some())
            .count();
        Ok(count as u64)
    }
}

/// Aggregates the catalog repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub categories: Arc<dyn CategoryRepository>,
    pub letters: Arc<dyn LetterRepository>,
    pub words: Arc<dyn WordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let letters: Arc<dyn LetterRepository> = Arc::new(repo.clone());
        let words: Arc<dyn WordRepository> = Arc::new(repo);
        Self {
            categories,
            letters,
            words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_category(id: u64, kind: CategoryKind) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
            description: None,
            kind,
        }
    }

    fn build_word(id: u64, russian: &str, category: u64, letter: Option<u64>) -> WordRecord {
        WordRecord {
            id: WordId::new(id),
            russian: russian.to_owned(),
            english: None,
            category_id: CategoryId::new(category),
            letter_id: letter.map(LetterId::new),
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn lists_categories_by_kind() {
        let repo = InMemoryRepository::new();
        repo.upsert_category(&build_category(1, CategoryKind::DictionaryClass))
            .await
            .unwrap();
        repo.upsert_category(&build_category(2, CategoryKind::Lesson))
            .await
            .unwrap();

        let classes = repo
            .list_categories(Some(CategoryKind::DictionaryClass))
            .await
            .unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].id, CategoryId::new(1));

        let all = repo.list_categories(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn letter_counts_respect_category_filter() {
        let repo = InMemoryRepository::new();
        repo.upsert_letter(&LetterRecord {
            id: LetterId::new(1),
            letter: "А".to_owned(),
            sort_order: 1,
        })
        .await
        .unwrap();
        repo.insert_word(&build_word(1, "арбуз", 10, Some(1)))
            .await
            .unwrap();
        repo.insert_word(&build_word(2, "аист", 20, Some(1)))
            .await
            .unwrap();

        let all = repo.list_letters(&[]).await.unwrap();
        assert_eq!(all[0].count, 2);

        let filtered = repo.list_letters(&[CategoryId::new(10)]).await.unwrap();
        assert_eq!(filtered[0].count, 1);
    }

    #[tokio::test]
    async fn words_come_back_ordered_and_filtered() {
        let repo = InMemoryRepository::new();
        repo.insert_word(&build_word(1, "собака", 10, Some(2)))
            .await
            .unwrap();
        repo.insert_word(&build_word(2, "арбуз", 10, Some(1)))
            .await
            .unwrap();
        repo.insert_word(&build_word(3, "кот", 20, Some(3)))
            .await
            .unwrap();

        let words = repo
            .words_by_filters(&[CategoryId::new(10)], &[])
            .await
            .unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].russian, "арбуз");
        assert_eq!(words[1].russian, "собака");

        let by_letter = repo
            .words_by_filters(&[], &[LetterId::new(3)])
            .await
            .unwrap();
        assert_eq!(by_letter.len(), 1);
        assert_eq!(by_letter[0].russian, "кот");
    }

    #[tokio::test]
    async fn translation_count_skips_untranslated_words() {
        let repo = InMemoryRepository::new();
        let mut translated = build_word(1, "вокзал", 10, None);
        translated.english = Some("station".to_owned());
        repo.insert_word(&translated).await.unwrap();
        repo.insert_word(&build_word(2, "кот", 10, None))
            .await
            .unwrap();

        let cats = [CategoryId::new(10)];
        assert_eq!(
            repo.count_words(&cats, TrainingMode::RuOnly).await.unwrap(),
            2
        );
        assert_eq!(
            repo.count_words(&cats, TrainingMode::RuToEn).await.unwrap(),
            1
        );
    }
}
