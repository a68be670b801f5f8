use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use diktant_core::model::SpeakLang;

use super::synthesis::SpeechSynthesizer;
use crate::error::AudioError;

/// Something that can play an audio file to completion.
pub trait AudioSink: Send + Sync {
    /// Play the file and block until it finishes.
    ///
    /// Implementations may block for the full length of the audio; the
    /// coordinator runs them on a blocking thread, never on the async
    /// runtime itself.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` when the file cannot be decoded or the output
    /// device fails.
    fn play(&self, path: &Path) -> Result<(), AudioError>;
}

/// Serializes playback: at most one word plays at a time.
///
/// A `speak` call that arrives while another is still playing is a silent
/// no-op, mirroring a trainee mashing the repeat button.
#[derive(Clone)]
pub struct PlaybackCoordinator {
    synthesizer: SpeechSynthesizer,
    sink: Arc<dyn AudioSink>,
    playing: Arc<AtomicBool>,
}

struct PlayingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for PlayingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl PlaybackCoordinator {
    #[must_use]
    pub fn new(synthesizer: SpeechSynthesizer, sink: Arc<dyn AudioSink>) -> Self {
        Self {
            synthesizer,
            sink,
            playing: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    fn try_acquire(&self) -> Option<PlayingGuard> {
        self.playing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PlayingGuard {
                flag: self.playing.clone(),
            })
    }

    /// Synthesize and play a word, returning whether it actually played.
    ///
    /// Returns `Ok(false)` without doing anything when another word is
    /// already playing. The playing slot is released on every exit path,
    /// including synthesis and playback failures.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` when synthesis or playback fails.
    pub async fn speak(&self, word: &str, lang: SpeakLang) -> Result<bool, AudioError> {
        let Some(guard) = self.try_acquire() else {
            debug!(word, "playback busy, ignoring");
            return Ok(false);
        };

        let path = self.synthesizer.synthesize(word, lang).await?;

        // The sink blocks for the length of the audio; keep it off the
        // async worker threads.
        let sink = Arc::clone(&self.sink);
        tokio::task::spawn_blocking(move || sink.play(&path))
            .await
            .map_err(|e| AudioError::Playback(e.to_string()))??;

        drop(guard);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::super::synthesis::SpeechConfig;

    struct FakeSink {
        played: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl FakeSink {
        fn new(fail: bool) -> Self {
            Self {
                played: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl AudioSink for FakeSink {
        fn play(&self, path: &Path) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Playback("device gone".into()));
            }
            self.played.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn cached_coordinator(sink: Arc<FakeSink>) -> (PlaybackCoordinator, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let synth = SpeechSynthesizer::new(SpeechConfig {
            tts_url: "http://127.0.0.1:1/tts".into(),
            cache_dir: dir.path().to_path_buf(),
        });
        // Pre-populate the cache so speak never reaches the network.
        std::fs::write(synth.cached_path("кот", SpeakLang::Ru), b"mp3").unwrap();
        (PlaybackCoordinator::new(synth, sink), dir)
    }

    #[tokio::test]
    async fn speak_plays_the_cached_file() {
        let sink = Arc::new(FakeSink::new(false));
        let (coordinator, _dir) = cached_coordinator(sink.clone());

        let played = coordinator.speak("кот", SpeakLang::Ru).await.unwrap();
        assert!(played);
        assert_eq!(sink.played.lock().unwrap().len(), 1);
        assert!(!coordinator.is_playing());
    }

    #[tokio::test]
    async fn busy_coordinator_ignores_the_request() {
        let sink = Arc::new(FakeSink::new(false));
        let (coordinator, _dir) = cached_coordinator(sink.clone());

        let _guard = coordinator.try_acquire().unwrap();
        assert!(coordinator.is_playing());

        let played = coordinator.speak("кот", SpeakLang::Ru).await.unwrap();
        assert!(!played);
        assert!(sink.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_releases_the_playing_slot() {
        let sink = Arc::new(FakeSink::new(true));
        let (coordinator, _dir) = cached_coordinator(sink);

        let err = coordinator.speak("кот", SpeakLang::Ru).await.unwrap_err();
        assert!(matches!(err, AudioError::Playback(_)));
        assert!(!coordinator.is_playing());
    }
}
