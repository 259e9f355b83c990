//! Google Cloud Text-to-Speech REST v1 client.

use super::http::{build_client, network_error, validate_base_url};
use super::types::{AudioFormat, AudioOutput};
use super::SpeechSynthesizer;
use crate::error_code::ProviderErrorCode;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}

/// Client for `POST /v1/text:synthesize`.
pub struct CloudTts {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    voice: Option<String>,
    format: AudioFormat,
    region: Option<String>,
}

impl CloudTts {
    pub fn builder() -> CloudTtsBuilder {
        CloudTtsBuilder::new()
    }

    /// The `languageCode` sent for `language`, after applying the region hint.
    pub fn language_code(&self, language: &str) -> String {
        expand_language(language, self.region.as_deref())
    }

    fn request_body(&self, text: &str, language: &str) -> serde_json::Value {
        let mut voice = serde_json::json!({ "languageCode": self.language_code(language) });
        if let Some(name) = &self.voice {
            voice["name"] = serde_json::Value::String(name.clone());
        }
        serde_json::json!({
            "input": { "text": text },
            "voice": voice,
            "audioConfig": { "audioEncoding": self.format.cloud_encoding() },
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for CloudTts {
    fn name(&self) -> &str {
        "google-cloud"
    }

    fn audio_format(&self) -> AudioFormat {
        self.format
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioOutput> {
        let endpoint = format!("{}/v1/text:synthesize", self.base_url);
        let body = self.request_body(text, language);
        debug!(endpoint = %endpoint, language = %self.language_code(language), "requesting cloud synthesis");

        let response = self
            .http_client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error("TTS request failed", "cloud_tts", e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| network_error("Failed to read TTS response", "cloud_tts", e))?;
        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &bytes));
        }

        let parsed: SynthesizeResponse = serde_json::from_slice(&bytes).map_err(|e| {
            Error::decode_with_context(
                format!("Unexpected response body: {}", e),
                ErrorContext::new().with_source("cloud_tts"),
            )
        })?;
        let content = parsed
            .audio_content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                Error::decode_with_context(
                    "TTS provider returned no audio",
                    ErrorContext::new()
                        .with_field_path("audioContent")
                        .with_source("cloud_tts"),
                )
            })?;
        let data = STANDARD.decode(content.as_bytes()).map_err(|e| {
            Error::decode_with_context(
                format!("audioContent is not valid base64: {}", e),
                ErrorContext::new()
                    .with_field_path("audioContent")
                    .with_source("cloud_tts"),
            )
        })?;
        Ok(AudioOutput::new(data, self.format))
    }
}

/// Google error bodies carry a gRPC status that is more precise than the HTTP code.
fn remote_error(status: u16, body: &[u8]) -> Error {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => Error::Remote {
            status,
            class: envelope
                .error
                .status
                .as_deref()
                .and_then(ProviderErrorCode::from_provider_status)
                .unwrap_or_else(|| ProviderErrorCode::from_http_status(status)),
            message: envelope.error.message,
        },
        Err(_) => Error::remote(status, String::from_utf8_lossy(body).trim().to_string()),
    }
}

/// Region from a Google tld: `co.in` → `IN`, `co.uk` → `GB`, generic tlds → none.
pub fn region_from_tld(tld: &str) -> Option<String> {
    let last = tld.trim().rsplit('.').next()?.to_ascii_lowercase();
    match last.as_str() {
        "uk" => Some("GB".to_string()),
        s if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            Some(s.to_ascii_uppercase())
        }
        _ => None,
    }
}

/// `hi` + `IN` → `hi-IN`. Codes that already name a region pass through.
pub fn expand_language(language: &str, region: Option<&str>) -> String {
    let language = language.trim();
    match region {
        Some(region) if !language.contains('-') => format!("{}-{}", language, region),
        _ => language.to_string(),
    }
}

pub struct CloudTtsBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    voice: Option<String>,
    format: AudioFormat,
    tld: Option<String>,
    proxy: Option<String>,
    timeout: Duration,
}

impl CloudTtsBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            voice: None,
            format: AudioFormat::Mp3,
            tld: None,
            proxy: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Region hint used to qualify bare language codes.
    pub fn tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = Some(tld.into());
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

    pub fn build(self) -> Result<CloudTts> {
        let api_key = self.api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            Error::configuration_with_context(
                "API key required for Cloud Text-to-Speech",
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_details(format!("set {}", crate::config::API_KEY_ENV)),
            )
        })?;
        let base_url =
            validate_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let http_client = build_client(self.timeout, self.proxy.as_deref())?;
        Ok(CloudTts {
            http_client,
            base_url,
            api_key,
            voice: self.voice,
            format: self.format,
            region: self.tld.as_deref().and_then(region_from_tld),
        })
    }
}

impl Default for CloudTtsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
