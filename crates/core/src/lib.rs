#![forbid(unsafe_code)]

pub mod answer;
pub mod error;
pub mod model;
pub mod parse;
pub mod time;

pub use error::Error;
pub use time::Clock;
