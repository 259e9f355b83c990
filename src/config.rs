//! Generator configuration.
//!
//! Defaults reproduce the kiosk setup: gTTS-style Translate voices from the
//! `co.in` host, MP3 output under `public/audio`. Every knob can be overridden
//! through `KIOSK_*` environment variables and then through the CLI.

use crate::tts::AudioFormat;
use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "public/audio";
pub const DEFAULT_TLD: &str = "co.in";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keyring service under which the Cloud API key may be stored (user `google`).
pub const KEYRING_SERVICE: &str = "kiosk-audio";
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Which Google speech backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Public Translate speech endpoint (what gTTS uses). No credentials.
    #[default]
    Translate,
    /// Cloud Text-to-Speech v1. Requires an API key.
    Cloud,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate => f.write_str("translate"),
            Self::Cloud => f.write_str("cloud"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "translate" | "gtts" => Ok(Self::Translate),
            "cloud" | "google-cloud" => Ok(Self::Cloud),
            other => Err(Error::configuration_with_context(
                format!("Unknown provider '{}'", other),
                ErrorContext::new()
                    .with_field_path("provider")
                    .with_details("expected 'translate' or 'cloud'"),
            )),
        }
    }
}

/// A tld becomes part of the Translate host, so only `[a-z0-9.-]` labels are
/// accepted; anything else could redirect requests to another host.
pub fn is_valid_tld(tld: &str) -> bool {
    !tld.is_empty()
        && tld.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub provider: ProviderKind,
    /// Region hint as a Google top-level domain, e.g. `co.in`.
    pub tld: String,
    pub format: AudioFormat,
    /// Cloud voice name, e.g. `hi-IN-Wavenet-A`.
    pub voice: Option<String>,
    pub slow: bool,
    pub timeout: Duration,
    pub proxy: Option<String>,
    /// Overrides the provider host; used for tests and private mirrors.
    pub base_url: Option<String>,
    /// Explicit Cloud API key. See [`GeneratorConfig::resolve_api_key`].
    pub api_key: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            provider: ProviderKind::default(),
            tld: DEFAULT_TLD.to_string(),
            format: AudioFormat::default(),
            voice: None,
            slow: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy: None,
            base_url: None,
            api_key: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `KIOSK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("KIOSK_AUDIO_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(provider) = get("KIOSK_TTS_PROVIDER") {
            config.provider = provider.parse()?;
        }
        if let Some(tld) = get("KIOSK_TTS_TLD") {
            config.tld = tld;
        }
        if let Some(format) = get("KIOSK_TTS_FORMAT") {
            config.format = format.parse()?;
        }
        config.voice = get("KIOSK_TTS_VOICE");
        // Unparseable values keep the default.
        if let Some(secs) = get("KIOSK_TTS_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config.proxy = get("KIOSK_TTS_PROXY_URL");
        config.base_url = get("KIOSK_TTS_BASE_URL");

        Ok(config)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into();
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Cloud API key: explicit value, then the OS keyring, then `GOOGLE_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.clone().filter(|k| !k.is_empty()) {
            return Some(key);
        }
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, "google") {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_tld(&self.tld) {
            return Err(Error::configuration_with_context(
                format!("Invalid region tld '{}'", self.tld),
                ErrorContext::new()
                    .with_field_path("tld")
                    .with_details("expected a domain suffix such as 'co.in' or 'com'"),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "Timeout must be greater than zero",
                ErrorContext::new().with_field_path("timeout"),
            ));
        }
        if let Some(base) = &self.base_url {
            url::Url::parse(base).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid base URL '{}': {}", base, e),
                    ErrorContext::new().with_field_path("base_url"),
                )
            })?;
        }
        if self.provider == ProviderKind::Translate && self.format != AudioFormat::Mp3 {
            return Err(Error::configuration_with_context(
                format!("The translate provider only produces mp3, not {}", self.format),
                ErrorContext::new()
                    .with_field_path("format")
                    .with_details("use --provider cloud for wav or ogg output"),
            ));
        }
        Ok(())
    }
}
