use thiserror::Error;

use crate::model::setup::SetupError;
use crate::model::word::WordError;
use crate::parse::ParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
