use diktant_core::model::{Category, CategoryId, CategoryKind, LetterId, WordId};
use sqlx::Row;

use crate::repository::{StorageError, WordRecord};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn category_id_from_i64(v: i64) -> Result<CategoryId, StorageError> {
    Ok(CategoryId::new(i64_to_u64("category_id", v)?))
}

pub(crate) fn letter_id_from_i64(v: i64) -> Result<LetterId, StorageError> {
    Ok(LetterId::new(i64_to_u64("letter_id", v)?))
}

pub(crate) fn word_id_from_i64(v: i64) -> Result<WordId, StorageError> {
    Ok(WordId::new(i64_to_u64("word_id", v)?))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_category_row(row: &sqlx::sqlite::SqliteRow) -> Result<Category, StorageError> {
    let kind_str: String = row.try_get("kind").map_err(ser)?;
    let kind: CategoryKind = kind_str.parse().map_err(ser)?;

    Ok(Category {
        id: category_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        name: row.try_get("name").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        kind,
    })
}

pub(crate) fn map_word_row(row: &sqlx::sqlite::SqliteRow) -> Result<WordRecord, StorageError> {
    let difficulty_i64: i64 = row.try_get("difficulty").map_err(ser)?;
    let difficulty = u8::try_from(difficulty_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid difficulty: {difficulty_i64}")))?;

    Ok(WordRecord {
        id: word_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        russian: row.try_get("russian_word").map_err(ser)?,
        english: row.try_get("english_word").map_err(ser)?,
        category_id: category_id_from_i64(row.try_get::<i64, _>("category_id").map_err(ser)?)?,
        letter_id: row
            .try_get::<Option<i64>, _>("letter_id")
            .map_err(ser)?
            .map(letter_id_from_i64)
            .transpose()?,
        difficulty,
    })
}
