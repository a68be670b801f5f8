//! Domain model for dictation training.

pub mod catalog;
pub mod grade;
pub mod ids;
pub mod mode;
pub mod record;
pub mod setup;
pub mod word;

pub use catalog::{Category, CategoryKind, Letter, ParseKindError};
pub use grade::Grade;
pub use ids::{CategoryId, LetterId, ParseIdError, WordId};
pub use mode::{ParseModeError, SpeakLang, TrainingMode};
pub use record::{ResultRecord, RunningStats};
pub use setup::{SetupError, SetupSelection, WordSource};
pub use word::{Word, WordError};
