use diktant_core::model::{Category, CategoryId, CategoryKind, Letter};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{id_to_i64, letter_id_from_i64, map_category_row, ser},
};
use crate::repository::{CategoryRepository, LetterRecord, LetterRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO categories (id, name, description, kind)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                kind = excluded.kind
            ",
        )
        .bind(id_to_i64("category_id", category.id.value())?)
        .bind(category.name.clone())
        .bind(category.description.clone())
        .bind(category.kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_categories(
        &self,
        kind: Option<CategoryKind>,
    ) -> Result<Vec<Category>, StorageError> {
        let rows = match kind {
            Some(kind) => {
                sqlx::query(
                    r"
                    SELECT id, name, description, kind
                    FROM categories
                    WHERE kind = ?1
                    ORDER BY name ASC
                    ",
                )
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, name, description, kind
                    FROM categories
                    ORDER BY name ASC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut categories = Vec::with_capacity(rows.len());
        for row in rows {
            categories.push(map_category_row(&row)?);
        }
        Ok(categories)
    }
}

#[async_trait::async_trait]
impl LetterRepository for SqliteRepository {
    async fn upsert_letter(&self, letter: &LetterRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO letters (id, letter, sort_order)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                letter = excluded.letter,
                sort_order = excluded.sort_order
            ",
        )
        .bind(id_to_i64("letter_id", letter.id.value())?)
        .bind(letter.letter.clone())
        .bind(i64::from(letter.sort_order))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_letters(&self, category_ids: &[CategoryId]) -> Result<Vec<Letter>, StorageError> {
        // The category filter lives in the join condition so letters with no
        // matching words still come back with a zero count.
        let mut sql = String::from(
            r"
            SELECT l.id, l.letter, COUNT(w.id) AS word_count
            FROM letters l
            LEFT JOIN words w ON w.letter_id = l.id
            ",
        );

        if !category_ids.is_empty() {
            sql.push_str(" AND w.category_id IN (");
            for i in 0..category_ids.len() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push('?');
                sql.push_str(&(i + 1).to_string());
            }
            sql.push(')');
        }

        sql.push_str(
            r"
            GROUP BY l.id, l.letter
            ORDER BY l.sort_order ASC
            ",
        );

        let mut q = sqlx::query(&sql);
        for id in category_ids {
            q = q.bind(id_to_i64("category_id", id.value())?);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut letters = Vec::with_capacity(rows.len());
        for row in rows {
            let count_i64: i64 = row.try_get("word_count").map_err(ser)?;
            let count = u32::try_from(count_i64)
                .map_err(|_| StorageError::Serialization(format!("invalid count: {count_i64}")))?;
            letters.push(Letter {
                id: letter_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
                letter: row.try_get("letter").map_err(ser)?,
                count,
            });
        }
        Ok(letters)
    }
}
