//! Training session state machine and its orchestration services.

pub mod progress;
pub mod service;
pub mod view;
pub mod workflow;

pub use progress::SessionProgress;
pub use service::TrainingSession;
pub use view::{AnswerFeedback, CurrentWordView, SessionReport, StatsView};
pub use workflow::TrainingLoopService;
