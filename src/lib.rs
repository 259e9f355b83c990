//! # kiosk-audio
//!
//! 为健康自助终端预生成多语言语音提示。
//!
//! Pre-generates the spoken prompts played by the health kiosk. A
//! [`PhraseTable`] of `(id, text, language)` entries is sent, one entry at a
//! time, to a Google speech provider and each result is saved as
//! `<output_dir>/<id>.<ext>` (by default `public/audio/prompt_en.mp3` and so on).
//!
//! ## Error model
//!
//! - Setup failures (bad configuration, no usable provider client, output
//!   directory not creatable) are returned as `Err` before any entry runs.
//! - Entry failures never stop a run; they are collected as
//!   [`generator::EntryFailure`] values in the [`GenerationReport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kiosk_audio::{build_synthesizer, AudioGenerator, GeneratorConfig, PhraseTable};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> kiosk_audio::Result<()> {
//!     let config = GeneratorConfig::from_env()?;
//!     let synthesizer = build_synthesizer(&config)?;
//!     let generator = AudioGenerator::new(synthesizer, &config.output_dir);
//!
//!     let report = generator.run(&PhraseTable::kiosk_default()).await?;
//!     println!("{}/{} files written", report.success_count(), report.total_processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`phrases`] | Phrase entries and table loading/validation |
//! | [`config`] | Generator configuration from defaults and environment |
//! | [`tts`] | Provider trait plus Translate and Cloud clients |
//! | [`generator`] | The sequential generation pass and its report |
//! | [`error_code`] | Provider error classification |
//! | [`cli`] | `generate-audio` flags, summary and exit codes |

pub mod cli;
pub mod config;
pub mod error_code;
pub mod generator;
pub mod phrases;
pub mod tts;

pub use config::{GeneratorConfig, ProviderKind};
pub use generator::{AudioGenerator, GenerationReport};
pub use phrases::{PhraseEntry, PhraseTable};
pub use tts::{build_synthesizer, AudioFormat, AudioOutput, SpeechSynthesizer};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
