//! `generate-audio` exit codes, summary lines and fatal messages

use crate::mock_server::MockServerFixture;
use clap::Parser;
use kiosk_audio::cli::{execute, Args, EXIT_ENTRY_FAILURES, EXIT_FATAL, EXIT_OK};
use kiosk_audio::GeneratorConfig;
use mockito::Mock;
use std::path::Path;

struct Outcome {
    code: u8,
    stdout: String,
    stderr: String,
}

async fn run_cli(argv: &[&str]) -> Outcome {
    let mut full = vec!["generate-audio"];
    full.extend_from_slice(argv);
    let args = Args::parse_from(full);

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = execute(&args, GeneratorConfig::new(), &mut out, &mut err).await;
    Outcome {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

/// English succeeds, Hindi answers 503. The mocks live as long as the returned handles.
async fn half_available_server() -> (MockServerFixture, Vec<Mock>) {
    let mut fixture = MockServerFixture::new().await;
    let english = fixture
        .mock_translate_audio(&[("tl", "en")], b"english-mp3")
        .await;
    let hindi = fixture.mock_translate_status(&[("tl", "hi")], 503).await;
    (fixture, vec![english, hindi])
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

#[tokio::test]
async fn test_unusable_cloud_client_is_single_fatal_message() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("audio");

    let outcome = run_cli(&[
        "--provider",
        "cloud",
        "--api-key",
        "test-key",
        "--base-url",
        "not a url",
        "--out-dir",
        path_arg(&out),
    ])
    .await;

    assert_eq!(outcome.code, EXIT_FATAL);
    assert!(outcome.stdout.is_empty());
    let error_lines = outcome
        .stderr
        .lines()
        .filter(|l| l.starts_with("Error:"))
        .count();
    assert_eq!(error_lines, 1, "stderr was:\n{}", outcome.stderr);
    assert!(outcome.stderr.contains("text-to-speech client is not available"));
    assert!(outcome.stderr.contains("GOOGLE_API_KEY"));
    assert!(outcome.stderr.contains("pre-generate the audio files"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_entry_failures_still_exit_zero() {
    let (fixture, _mocks) = half_available_server().await;
    let tmp = tempfile::tempdir().unwrap();

    let outcome = run_cli(&[
        "--base-url",
        &fixture.base_url,
        "--out-dir",
        path_arg(tmp.path()),
        "--only",
        "prompt_en",
        "--only",
        "prompt_hi",
    ])
    .await;

    assert_eq!(outcome.code, EXIT_OK, "stderr was:\n{}", outcome.stderr);
    assert!(outcome.stderr.is_empty());
    assert!(outcome.stdout.contains("Generated 1/2 audio files"));
    assert!(outcome.stdout.contains("1 failed: prompt_hi"));
    assert!(tmp.path().join("prompt_en.mp3").exists());
    assert!(!tmp.path().join("prompt_hi.mp3").exists());
    assert!(!tmp.path().join("prompt_mr.mp3").exists());
}

#[tokio::test]
async fn test_fail_on_error_exits_two() {
    let (fixture, _mocks) = half_available_server().await;
    let tmp = tempfile::tempdir().unwrap();

    let outcome = run_cli(&[
        "--base-url",
        &fixture.base_url,
        "--out-dir",
        path_arg(tmp.path()),
        "--only",
        "prompt_en",
        "--only",
        "prompt_hi",
        "--fail-on-error",
    ])
    .await;

    assert_eq!(outcome.code, EXIT_ENTRY_FAILURES);
    assert!(outcome.stdout.contains("1 failed: prompt_hi"));
    assert!(tmp.path().join("prompt_en.mp3").exists());
}

#[tokio::test]
async fn test_fail_on_error_is_zero_when_all_succeed() {
    let (fixture, _mocks) = half_available_server().await;
    let tmp = tempfile::tempdir().unwrap();

    let outcome = run_cli(&[
        "--base-url",
        &fixture.base_url,
        "--out-dir",
        path_arg(tmp.path()),
        "--only",
        "confirm_en",
        "--fail-on-error",
    ])
    .await;

    assert_eq!(outcome.code, EXIT_OK);
    assert!(outcome.stdout.contains("Generated 1/1 audio files"));
    assert!(!outcome.stdout.contains("failed"));
}

#[tokio::test]
async fn test_unknown_only_id_fails_before_any_request() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("audio");

    // Nothing listens on the discard port; reaching it would be an entry failure, not a fatal one.
    let outcome = run_cli(&[
        "--base-url",
        "http://127.0.0.1:9",
        "--out-dir",
        path_arg(&out),
        "--only",
        "prompt_xx",
    ])
    .await;

    assert_eq!(outcome.code, EXIT_FATAL);
    assert!(outcome.stderr.contains("Unknown phrase identifier 'prompt_xx'"));
    assert!(outcome.stderr.contains("network connection"));
    assert!(outcome.stdout.is_empty());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_phrases_file_replaces_builtin_table() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_translate_audio(&[("tl", "en"), ("q", "Welcome to the kiosk")], b"welcome-mp3")
        .await;
    let tmp = tempfile::tempdir().unwrap();
    let phrases = tmp.path().join("prompts.yaml");
    std::fs::write(
        &phrases,
        "- id: welcome\n  text: Welcome to the kiosk\n  language: en\n",
    )
    .unwrap();
    let out = tmp.path().join("audio");

    let outcome = run_cli(&[
        "--phrases",
        path_arg(&phrases),
        "--base-url",
        &fixture.base_url,
        "--out-dir",
        path_arg(&out),
    ])
    .await;

    mock.assert_async().await;
    assert_eq!(outcome.code, EXIT_OK, "stderr was:\n{}", outcome.stderr);
    assert!(outcome.stdout.contains("Generated 1/1 audio files"));
    assert_eq!(std::fs::read(out.join("welcome.mp3")).unwrap(), b"welcome-mp3");
    assert!(!out.join("prompt_en.mp3").exists());
}

#[tokio::test]
async fn test_bad_phrases_file_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let phrases = tmp.path().join("prompts.txt");
    std::fs::write(&phrases, "welcome").unwrap();

    let outcome = run_cli(&["--phrases", path_arg(&phrases), "--out-dir", path_arg(tmp.path())]).await;

    assert_eq!(outcome.code, EXIT_FATAL);
    assert!(outcome.stderr.contains("loading phrases from"));
    assert!(outcome.stderr.contains("Unsupported phrase file extension"));
}
