#![forbid(unsafe_code)]

pub mod audio;
pub mod error;
pub mod sessions;
pub mod setup_service;

pub use diktant_core::Clock;

pub use error::{AudioError, CatalogError, SessionError};

pub use audio::{AudioSink, PlaybackCoordinator, RodioSink, SpeechConfig, SpeechSynthesizer};
pub use sessions::{
    AnswerFeedback, CurrentWordView, SessionProgress, SessionReport, StatsView,
    TrainingLoopService, TrainingSession,
};
pub use setup_service::SetupService;
