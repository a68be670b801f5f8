use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStreamBuilder, Sink};

use super::playback::AudioSink;
use crate::error::AudioError;

/// Plays audio files on the default output device.
///
/// The output stream is opened per call so the device is not held open
/// between words.
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioSink;

impl RodioSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AudioSink for RodioSink {
    fn play(&self, path: &Path) -> Result<(), AudioError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        let sink = Sink::connect_new(stream.mixer());

        let file = File::open(path)?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Playback(e.to_string()))?;

        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}
