//! Command-line front end of `generate-audio`.
//!
//! [`execute`] owns everything after argument parsing so the exit-code
//! contract can be exercised without spawning the binary:
//!
//! | Code | Meaning |
//! |------|---------|
//! | [`EXIT_OK`] | Run finished; entry failures are listed but tolerated |
//! | [`EXIT_FATAL`] | Setup failed before any entry ran |
//! | [`EXIT_ENTRY_FAILURES`] | `--fail-on-error` and at least one entry failed |

use crate::config::{API_KEY_ENV, KEYRING_SERVICE};
use crate::{build_synthesizer, AudioFormat, AudioGenerator, GeneratorConfig, PhraseTable, ProviderKind};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FATAL: u8 = 1;
pub const EXIT_ENTRY_FAILURES: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "generate-audio",
    version,
    about = "Generate spoken kiosk prompts as audio files",
    after_help = "ENVIRONMENT:\n    KIOSK_AUDIO_DIR, KIOSK_TTS_PROVIDER, KIOSK_TTS_TLD, KIOSK_TTS_FORMAT,\n    KIOSK_TTS_VOICE, KIOSK_TTS_TIMEOUT_SECS, KIOSK_TTS_PROXY_URL, KIOSK_TTS_BASE_URL,\n    GOOGLE_API_KEY    Defaults for the matching flags\n    RUST_LOG          Log filter (default: info)"
)]
pub struct Args {
    /// Directory that receives <id>.<ext> files
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Phrase table (.yaml, .yml or .json); defaults to the built-in kiosk prompts
    #[arg(long, env = "KIOSK_PHRASES")]
    pub phrases: Option<PathBuf>,

    /// Speech provider: translate or cloud
    #[arg(long)]
    pub provider: Option<ProviderKind>,

    /// Region hint as a Google tld, e.g. co.in
    #[arg(long)]
    pub tld: Option<String>,

    /// Audio format: mp3, wav or ogg (wav/ogg need the cloud provider)
    #[arg(long)]
    pub format: Option<AudioFormat>,

    /// Cloud voice name, e.g. hi-IN-Wavenet-A
    #[arg(long)]
    pub voice: Option<String>,

    /// Slower speech (translate provider)
    #[arg(long)]
    pub slow: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// HTTP(S) proxy URL
    #[arg(long)]
    pub proxy: Option<String>,

    /// Override the provider host
    #[arg(long)]
    pub base_url: Option<String>,

    /// Cloud API key (otherwise keyring, then GOOGLE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Only generate these identifiers (repeatable)
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<String>,

    /// Exit with status 2 when any entry failed
    #[arg(long)]
    pub fail_on_error: bool,
}

impl Args {
    /// Overlay the flags that were given on top of `base`.
    pub fn apply(&self, base: GeneratorConfig) -> GeneratorConfig {
        let mut config = base;
        if let Some(dir) = &self.out_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(provider) = self.provider {
            config = config.with_provider(provider);
        }
        if let Some(tld) = &self.tld {
            config = config.with_tld(tld);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(voice) = &self.voice {
            config = config.with_voice(voice);
        }
        if self.slow {
            config = config.with_slow(true);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(proxy);
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        config
    }
}

/// Run one generation pass. The summary goes to `out`, a fatal error to `err`.
pub async fn execute(args: &Args, base: GeneratorConfig, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    let config = args.apply(base);
    match run(args, &config, out).await {
        Ok(code) => code,
        Err(e) => {
            report_fatal(&e, &config, err);
            EXIT_FATAL
        }
    }
}

async fn run(args: &Args, config: &GeneratorConfig, out: &mut dyn Write) -> anyhow::Result<u8> {
    let phrases = match &args.phrases {
        Some(path) => PhraseTable::from_path(path)
            .with_context(|| format!("loading phrases from {}", path.display()))?,
        None => PhraseTable::kiosk_default(),
    };
    let phrases = phrases.retain_ids(&args.only)?;

    let synthesizer =
        build_synthesizer(config).context("text-to-speech client is not available")?;
    info!(
        provider = synthesizer.name(),
        entries = phrases.len(),
        "Writing audio to {}",
        config.output_dir.display()
    );

    let generator = AudioGenerator::new(synthesizer, &config.output_dir);
    let report = generator.run(&phrases).await?;

    writeln!(
        out,
        "Generated {}/{} audio files in {} ({:.1?})",
        report.success_count(),
        report.total_processed,
        report.output_dir.display(),
        report.execution_time
    )?;
    if !report.all_succeeded() {
        let ids: Vec<&str> = report.failures.iter().map(|f| f.id.as_str()).collect();
        writeln!(out, "{} failed: {}", report.failure_count(), ids.join(", "))?;
        if args.fail_on_error {
            return Ok(EXIT_ENTRY_FAILURES);
        }
    }
    Ok(EXIT_OK)
}

/// One `Error:` line with the cause chain, then what to do about it.
pub fn report_fatal(e: &anyhow::Error, config: &GeneratorConfig, err: &mut dyn Write) {
    let hint = match config.provider {
        ProviderKind::Cloud => format!(
            "Set {} (or store a key in the OS keyring as service '{}', user 'google'), \
             or use --provider translate.",
            API_KEY_ENV, KEYRING_SERVICE
        ),
        ProviderKind::Translate => {
            "Check the options above and the network connection to the speech provider."
                .to_string()
        }
    };
    let _ = writeln!(
        err,
        "Error: {:#}\n{}\nAlternatively, pre-generate the audio files and place them under {}/",
        e,
        hint,
        config.output_dir.display()
    );
}
