//! Shared error types for the services crate.

use thiserror::Error;

use diktant_core::model::{SetupError, WordError};
use diktant_core::parse::ParseError;
use storage::repository::StorageError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no words available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("session is not completed yet")]
    NotCompleted,
    #[error("answer is blank")]
    BlankAnswer,
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SetupService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the speech synthesis and playback services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AudioError {
    #[error("speech synthesis failed with status {0}")]
    SynthesisStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("audio playback failed: {0}")]
    Playback(String),
}
