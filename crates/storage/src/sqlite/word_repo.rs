use diktant_core::model::{CategoryId, LetterId, TrainingMode};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{id_to_i64, map_word_row, ser},
};
use crate::repository::{StorageError, WordRecord, WordRepository};

fn push_placeholders(sql: &mut String, start: usize, len: usize) {
    for i in 0..len {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('?');
        sql.push_str(&(start + i).to_string());
    }
}

#[async_trait::async_trait]
impl WordRepository for SqliteRepository {
    async fn insert_word(&self, word: &WordRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO words (
                id, russian_word, english_word, category_id, letter_id, difficulty
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                russian_word = excluded.russian_word,
                english_word = excluded.english_word,
                category_id = excluded.category_id,
                letter_id = excluded.letter_id,
                difficulty = excluded.difficulty
            ",
        )
        .bind(id_to_i64("word_id", word.id.value())?)
        .bind(word.russian.clone())
        .bind(word.english.clone())
        .bind(id_to_i64("category_id", word.category_id.value())?)
        .bind(
            word.letter_id
                .map(|l| id_to_i64("letter_id", l.value()))
                .transpose()?,
        )
        .bind(i64::from(word.difficulty))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn words_by_filters(
        &self,
        category_ids: &[CategoryId],
        letter_ids: &[LetterId],
    ) -> Result<Vec<WordRecord>, StorageError> {
        let mut sql = String::from(
            r"
            SELECT id, russian_word, english_word, category_id, letter_id, difficulty
            FROM words
            WHERE 1 = 1
            ",
        );

        if !category_ids.is_empty() {
            sql.push_str(" AND category_id IN (");
            push_placeholders(&mut sql, 1, category_ids.len());
            sql.push(')');
        }
        if !letter_ids.is_empty() {
            sql.push_str(" AND letter_id IN (");
            push_placeholders(&mut sql, category_ids.len() + 1, letter_ids.len());
            sql.push(')');
        }
        sql.push_str(" ORDER BY russian_word ASC");

        let mut q = sqlx::query(&sql);
        for id in category_ids {
            q = q.bind(id_to_i64("category_id", id.value())?);
        }
        for id in letter_ids {
            q = q.bind(id_to_i64("letter_id", id.value())?);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut words = Vec::with_capacity(rows.len());
        for row in rows {
            words.push(map_word_row(&row)?);
        }
        Ok(words)
    }

    async fn count_words(
        &self,
        category_ids: &[CategoryId],
        mode: TrainingMode,
    ) -> Result<u64, StorageError> {
        let mut sql = String::from("SELECT COUNT(*) AS word_count FROM words WHERE 1 = 1");

        if !category_ids.is_empty() {
            sql.push_str(" AND category_id IN (");
            push_placeholders(&mut sql, 1, category_ids.len());
            sql.push(')');
        }
        if mode.requires_translation() {
            sql.push_str(" AND english_word IS NOT NULL");
        }

        let mut q = sqlx::query(&sql);
        for id in category_ids {
            q = q.bind(id_to_i64("category_id", id.value())?);
        }

        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let count_i64: i64 = row.try_get("word_count").map_err(ser)?;
        u64::try_from(count_i64)
            .map_err(|_| StorageError::Serialization(format!("invalid count: {count_i64}")))
    }
}
