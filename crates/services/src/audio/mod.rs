//! Speech synthesis, caching, and single-slot playback.

pub mod output;
pub mod playback;
pub mod synthesis;

pub use output::RodioSink;
pub use playback::{AudioSink, PlaybackCoordinator};
pub use synthesis::{SpeechConfig, SpeechSynthesizer};
