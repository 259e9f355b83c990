//! Audio generator: one sequential pass over a phrase table.

use crate::phrases::{PhraseEntry, PhraseTable};
use crate::tts::SpeechSynthesizer;
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// A file produced for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenAudio {
    pub id: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// A recoverable failure tied to one entry.
#[derive(Debug)]
pub struct EntryFailure {
    pub id: String,
    pub error: Error,
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.error)
    }
}

impl std::error::Error for EntryFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Outcome of a run that got past setup.
#[derive(Debug)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub written: Vec<WrittenAudio>,
    pub failures: Vec<EntryFailure>,
    pub execution_time: Duration,
    pub total_processed: usize,
}

impl GenerationReport {
    fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            written: Vec::new(),
            failures: Vec::new(),
            execution_time: Duration::ZERO,
            total_processed: 0,
        }
    }
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
    pub fn success_count(&self) -> usize {
        self.written.len()
    }
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
    pub fn success_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            self.written.len() as f64 / self.total_processed as f64
        }
    }
    pub fn failure(&self, id: &str) -> Option<&EntryFailure> {
        self.failures.iter().find(|f| f.id == id)
    }
}

/// Writes `<output_dir>/<id>.<ext>` for every phrase using one shared synthesizer.
pub struct AudioGenerator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output_dir: PathBuf,
}

impl AudioGenerator {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            synthesizer,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name(&self, id: &str) -> String {
        format!("{}.{}", id, self.synthesizer.audio_format().extension())
    }

    pub fn audio_path(&self, id: &str) -> PathBuf {
        self.output_dir.join(self.file_name(id))
    }

    /// Generate every entry in order.
    ///
    /// Returns `Err` only when the output directory cannot be created, in which
    /// case nothing was attempted. Entry failures are collected in the report.
    pub async fn run(&self, phrases: &PhraseTable) -> Result<GenerationReport> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                Error::configuration_with_context(
                    format!(
                        "Cannot create output directory {}: {}",
                        self.output_dir.display(),
                        e
                    ),
                    ErrorContext::new()
                        .with_field_path("output_dir")
                        .with_source("audio_generator"),
                )
            })?;

        let start = Instant::now();
        let mut report = GenerationReport::new(self.output_dir.clone());
        for entry in phrases {
            let file_name = self.file_name(&entry.id);
            info!("Generating {} ({})...", file_name, entry.language);
            match self.generate_entry(entry).await {
                Ok(written) => {
                    info!(
                        provider = self.synthesizer.name(),
                        bytes = written.bytes,
                        "Saved {}",
                        written.path.display()
                    );
                    report.written.push(written);
                }
                Err(e) => {
                    error!("Failed to generate {}: {}", file_name, e);
                    report.failures.push(EntryFailure {
                        id: entry.id.clone(),
                        error: e,
                    });
                }
            }
            report.total_processed += 1;
        }
        report.execution_time = start.elapsed();
        Ok(report)
    }

    /// Synthesize and save a single entry, replacing any existing file.
    pub async fn generate_entry(&self, entry: &PhraseEntry) -> Result<WrittenAudio> {
        let audio = self
            .synthesizer
            .synthesize(&entry.text, &entry.language)
            .await?;
        if audio.is_empty() {
            return Err(Error::decode_with_context(
                "TTS provider returned no audio",
                ErrorContext::new().with_source(self.synthesizer.name()),
            ));
        }
        let path = self.audio_path(&entry.id);
        write_replace(&path, &audio.data).await?;
        Ok(WrittenAudio {
            id: entry.id.clone(),
            path,
            bytes: audio.len(),
        })
    }
}

/// Write through a sibling `.part` file and rename it over `path`, so readers
/// never see a partially written file.
async fn write_replace(path: &Path, data: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.part", file_name));
    tokio::fs::write(&tmp, data).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
