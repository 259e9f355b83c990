//! TTS（文字转语音）模块：通过 Google 语音接口将提示语合成为音频。
//!
//! Speech provider capability and its Google implementations.

mod cloud;
mod http;
pub mod languages;
pub mod tokenize;
mod translate;
mod types;

pub use cloud::{expand_language, region_from_tld, CloudTts, CloudTtsBuilder};
pub use translate::{TranslateTts, TranslateTtsBuilder};
pub use types::{AudioFormat, AudioOutput};

use crate::config::{GeneratorConfig, ProviderKind};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Something that turns text in a given language into audio bytes.
///
/// The generator treats implementations as opaque: any `Err` is recorded
/// against the entry being processed and the run moves on.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Format of the audio returned by [`synthesize`](Self::synthesize).
    fn audio_format(&self) -> AudioFormat;

    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioOutput>;
}

/// Construct the provider selected by `config`.
///
/// Failure here is fatal for a run: no entry can succeed without a client.
pub fn build_synthesizer(config: &GeneratorConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    config.validate()?;
    match config.provider {
        ProviderKind::Translate => {
            let mut builder = TranslateTts::builder()
                .tld(config.tld.clone())
                .slow(config.slow)
                .timeout(config.timeout);
            if let Some(url) = &config.base_url {
                builder = builder.base_url(url.clone());
            }
            if let Some(proxy) = &config.proxy {
                builder = builder.proxy(proxy.clone());
            }
            Ok(Arc::new(builder.build()?))
        }
        ProviderKind::Cloud => {
            let mut builder = CloudTts::builder()
                .tld(config.tld.clone())
                .format(config.format)
                .timeout(config.timeout);
            if let Some(key) = config.resolve_api_key() {
                builder = builder.api_key(key);
            }
            if let Some(voice) = &config.voice {
                builder = builder.voice(voice.clone());
            }
            if let Some(url) = &config.base_url {
                builder = builder.base_url(url.clone());
            }
            if let Some(proxy) = &config.proxy {
                builder = builder.proxy(proxy.clone());
            }
            Ok(Arc::new(builder.build()?))
        }
    }
}
