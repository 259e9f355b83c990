//! Google Translate speech endpoint, the same voices gTTS produces.

use super::http::{build_client, network_error, validate_base_url};
use super::tokenize::{split_text, MAX_CHUNK_CHARS};
use super::types::{AudioFormat, AudioOutput};
use super::{languages, SpeechSynthesizer};
use crate::config::{is_valid_tld, DEFAULT_TLD};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::time::Duration;
use tracing::debug;

/// Client for `translate.google.<tld>/translate_tts`.
pub struct TranslateTts {
    http_client: reqwest::Client,
    base_url: String,
    slow: bool,
}

impl TranslateTts {
    pub fn builder() -> TranslateTtsBuilder {
        TranslateTtsBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_chunk(&self, chunk: &str, lang: &str, idx: usize, total: usize) -> Result<Bytes> {
        let endpoint = format!("{}/translate_tts", self.base_url);
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();
        let speed = if self.slow { "0.3" } else { "1" };

        debug!(endpoint = %endpoint, lang, idx = %idx, total = %total, "requesting speech chunk");
        let response = self
            .http_client
            .get(&endpoint)
            .header(reqwest::header::ACCEPT, AudioFormat::Mp3.mime_type())
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", lang),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", speed),
            ])
            .send()
            .await
            .map_err(|e| network_error("TTS request failed", "translate_tts", e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| network_error("Failed to read TTS response", "translate_tts", e))?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            let message = match status.canonical_reason() {
                Some(reason) if body.trim().is_empty() => reason.to_string(),
                _ => body.trim().chars().take(200).collect(),
            };
            return Err(Error::remote(status.as_u16(), message));
        }
        Ok(bytes)
    }
}

#[async_trait]
impl SpeechSynthesizer for TranslateTts {
    fn name(&self) -> &str {
        "google-translate"
    }

    fn audio_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioOutput> {
        let lang = languages::normalize(language).ok_or_else(|| {
            Error::validation_with_context(
                format!("Language not supported: {}", language),
                ErrorContext::new()
                    .with_field_path("language")
                    .with_source("translate_tts"),
            )
        })?;

        let chunks = split_text(text, MAX_CHUNK_CHARS);
        debug!(
            language = languages::display_name(lang).unwrap_or(lang),
            chunks = chunks.len(),
            "synthesizing"
        );
        if chunks.is_empty() {
            return Err(Error::validation_with_context(
                "No speakable text",
                ErrorContext::new()
                    .with_field_path("text")
                    .with_source("translate_tts"),
            ));
        }

        // MP3 frames concatenate cleanly, so chunks are joined as-is.
        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let part = self.fetch_chunk(chunk, lang, idx, chunks.len()).await?;
            audio.extend_from_slice(&part);
        }
        Ok(AudioOutput::new(audio.freeze(), AudioFormat::Mp3))
    }
}

pub struct TranslateTtsBuilder {
    tld: Option<String>,
    base_url: Option<String>,
    slow: bool,
    proxy: Option<String>,
    timeout: Duration,
}

impl TranslateTtsBuilder {
    pub fn new() -> Self {
        Self {
            tld: None,
            base_url: None,
            slow: false,
            proxy: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Regional host suffix, e.g. `co.in` for `translate.google.co.in`.
    pub fn tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = Some(tld.into());
        self
    }

    /// Full host override; takes precedence over [`tld`](Self::tld).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<TranslateTts> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => {
                let tld = self.tld.as_deref().unwrap_or(DEFAULT_TLD);
                if !is_valid_tld(tld) {
                    return Err(Error::configuration_with_context(
                        format!("Invalid region tld '{}'", tld),
                        ErrorContext::new().with_field_path("tld"),
                    ));
                }
                format!("https://translate.google.{}", tld)
            }
        };
        let base_url = validate_base_url(&base_url)?;
        let http_client = build_client(self.timeout, self.proxy.as_deref())?;
        Ok(TranslateTts {
            http_client,
            base_url,
            slow: self.slow,
        })
    }
}

impl Default for TranslateTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
