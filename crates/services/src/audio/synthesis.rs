use std::env;
use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::debug;

use diktant_core::model::SpeakLang;

use crate::error::AudioError;

const FILENAME_LIMIT: usize = 50;

#[derive(Clone, Debug)]
pub struct SpeechConfig {
    pub tts_url: String,
    pub cache_dir: PathBuf,
}

impl SpeechConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let tts_url = env::var("DIKTANT_TTS_URL")
            .unwrap_or_else(|_| "https://translate.google.com/translate_tts".into());
        let cache_dir = env::var("DIKTANT_AUDIO_CACHE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("audio_cache"));
        Self { tts_url, cache_dir }
    }
}

/// Fetches spoken-word audio and keeps it in a file cache.
///
/// Cache files are named `{safe_word}_{lang}.mp3`, so the same word is never
/// fetched twice for the same language.
#[derive(Clone)]
pub struct SpeechSynthesizer {
    client: Client,
    config: SpeechConfig,
}

impl SpeechSynthesizer {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SpeechConfig::from_env())
    }

    #[must_use]
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.config.cache_dir
    }

    /// Cache location for a word's audio, whether or not it exists yet.
    #[must_use]
    pub fn cached_path(&self, word: &str, lang: SpeakLang) -> PathBuf {
        let file = format!("{}_{}.mp3", safe_filename(word), lang.as_str());
        self.config.cache_dir.join(file)
    }

    /// Fetch the audio for a word, returning the cached file path.
    ///
    /// A cache hit skips the network entirely.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` when the request fails, the server responds with
    /// a non-success status, or the file cannot be written.
    pub async fn synthesize(&self, word: &str, lang: SpeakLang) -> Result<PathBuf, AudioError> {
        let path = self.cached_path(word, lang);
        if path.exists() {
            debug!(?path, "audio cache hit");
            return Ok(path);
        }

        let response = self
            .client
            .get(&self.config.tts_url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", word),
                ("tl", lang.as_str()),
                ("client", "tw-ob"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AudioError::SynthesisStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        std::fs::create_dir_all(&self.config.cache_dir)?;
        std::fs::write(&path, &bytes)?;
        debug!(?path, bytes = bytes.len(), "audio cached");
        Ok(path)
    }
}

/// Strips a word down to characters that are safe in a filename: cyrillic
/// and latin letters, digits, hyphen, and underscore.
fn safe_filename(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(FILENAME_LIMIT)
        .collect()
}
