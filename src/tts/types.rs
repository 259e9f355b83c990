//! TTS (Text-to-Speech) types.

use crate::{Error, ErrorContext};
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

/// Audio returned by a provider.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl AudioOutput {
    pub fn new(data: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    OggOpus,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::OggOpus => "audio/ogg",
        }
    }

    /// File extension used for generated files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::OggOpus => "ogg",
        }
    }

    /// `audioConfig.audioEncoding` value for Cloud Text-to-Speech.
    pub fn cloud_encoding(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Wav => "LINEAR16",
            Self::OggOpus => "OGG_OPUS",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" | "mpeg" => Ok(Self::Mp3),
            "wav" | "linear16" => Ok(Self::Wav),
            "ogg" | "opus" | "ogg_opus" => Ok(Self::OggOpus),
            other => Err(Error::configuration_with_context(
                format!("Unknown audio format '{}'", other),
                ErrorContext::new()
                    .with_field_path("format")
                    .with_details("expected one of: mp3, wav, ogg"),
            )),
        }
    }
}
