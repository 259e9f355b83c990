//! generate-audio — 预生成自助终端语音提示文件
//!
//! Usage:
//!   generate-audio                                  Built-in prompts into public/audio
//!   generate-audio --out-dir dist/audio             Different output directory
//!   generate-audio --phrases prompts.yaml           Custom phrase table
//!   generate-audio --provider cloud --format ogg    Cloud Text-to-Speech (needs GOOGLE_API_KEY)
//!   generate-audio --only confirm_hi --only confirm_mr

use clap::Parser;
use kiosk_audio::cli::{self, Args, EXIT_FATAL};
use kiosk_audio::GeneratorConfig;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    // Environment first, then flags.
    let base = match GeneratorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let e = anyhow::Error::new(e).context("reading KIOSK_* environment");
            cli::report_fatal(&e, &args.apply(GeneratorConfig::new()), &mut io::stderr());
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let code = cli::execute(&args, base, &mut io::stdout(), &mut io::stderr()).await;
    ExitCode::from(code)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
