#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    CategoryRepository, InMemoryRepository, LetterRecord, LetterRepository, Storage, StorageError,
    WordRecord, WordRepository,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
