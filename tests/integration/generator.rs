//! Generator behaviour: file layout, overwrite, failure isolation, setup failures

use crate::mock_server::MockServerFixture;
use async_trait::async_trait;
use kiosk_audio::generator::AudioGenerator;
use kiosk_audio::{
    build_synthesizer, AudioFormat, AudioOutput, Error, GeneratorConfig, PhraseEntry, PhraseTable,
    SpeechSynthesizer,
};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Provider double: echoes the text as "audio", fails for listed texts.
struct FakeSynthesizer {
    prefix: &'static str,
    fail_texts: Vec<String>,
    empty_texts: Vec<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeSynthesizer {
    fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            fail_texts: Vec::new(),
            empty_texts: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, text: &str) -> Self {
        self.fail_texts.push(text.to_string());
        self
    }

    fn empty_on(mut self, text: &str) -> Self {
        self.empty_texts.push(text.to_string());
        self
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    fn name(&self) -> &str {
        "fake"
    }

    fn audio_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn synthesize(&self, text: &str, language: &str) -> kiosk_audio::Result<AudioOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        if self.fail_texts.iter().any(|t| t == text) {
            return Err(Error::remote(400, "Language not supported"));
        }
        if self.empty_texts.iter().any(|t| t == text) {
            return Ok(AudioOutput::new(Vec::new(), AudioFormat::Mp3));
        }
        Ok(AudioOutput::new(
            format!("{}:{}:{}", self.prefix, language, text).into_bytes(),
            AudioFormat::Mp3,
        ))
    }
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn expected_names(table: &PhraseTable) -> BTreeSet<String> {
    table.iter().map(|e| format!("{}.mp3", e.id)).collect()
}

#[tokio::test]
async fn test_one_file_per_identifier() {
    let tmp = tempfile::tempdir().unwrap();
    let table = PhraseTable::kiosk_default();
    let fake = Arc::new(FakeSynthesizer::new("v1"));
    let generator = AudioGenerator::new(fake.clone(), tmp.path());

    let report = generator.run(&table).await.unwrap();

    assert!(report.all_succeeded());
    assert_eq!(report.success_count(), 6);
    assert_eq!(report.total_processed, 6);
    assert_eq!(file_names(tmp.path()), expected_names(&table));
    assert_eq!(fake.call_count(), 6);

    let hindi = std::fs::read_to_string(tmp.path().join("prompt_hi.mp3")).unwrap();
    assert_eq!(hindi, "v1:hi:कृपया अपनी भाषा चुनें");
}

#[tokio::test]
async fn test_second_run_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let table = PhraseTable::kiosk_default();

    let first = AudioGenerator::new(Arc::new(FakeSynthesizer::new("v1")), tmp.path());
    first.run(&table).await.unwrap();

    let second = AudioGenerator::new(Arc::new(FakeSynthesizer::new("v2")), tmp.path());
    let report = second.run(&table).await.unwrap();

    assert!(report.all_succeeded());
    assert_eq!(file_names(tmp.path()), expected_names(&table));
    let english = std::fs::read_to_string(tmp.path().join("confirm_en.mp3")).unwrap();
    assert_eq!(english, "v2:en:You selected English.");
}

#[tokio::test]
async fn test_missing_output_dir_is_created() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("public").join("audio");
    assert!(!out.exists());

    let table = PhraseTable::kiosk_default();
    let generator = AudioGenerator::new(Arc::new(FakeSynthesizer::new("v1")), &out);
    generator.run(&table).await.unwrap();

    assert!(out.is_dir());
    assert_eq!(file_names(&out), expected_names(&table));
}

#[tokio::test]
async fn test_single_failure_does_not_stop_run() {
    let tmp = tempfile::tempdir().unwrap();
    let table = PhraseTable::kiosk_default();
    let confirm_hi = table.get("confirm_hi").unwrap().text.clone();
    let fake = Arc::new(FakeSynthesizer::new("v1").failing_on(&confirm_hi));
    let generator = AudioGenerator::new(fake.clone(), tmp.path());

    let report = generator.run(&table).await.unwrap();

    assert_eq!(fake.call_count(), 6);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.success_count(), 5);
    let failure = report.failure("confirm_hi").expect("confirm_hi should fail");
    assert!(matches!(failure.error, Error::Remote { status: 400, .. }));
    assert!(failure.to_string().starts_with("confirm_hi: "));

    let mut expected = expected_names(&table);
    expected.remove("confirm_hi.mp3");
    assert_eq!(file_names(tmp.path()), expected);
}

#[tokio::test]
async fn test_empty_audio_is_an_entry_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let table = PhraseTable::new(vec![
        PhraseEntry::new("prompt_en", "Please choose your language", "en"),
        PhraseEntry::new("confirm_en", "You selected English.", "en"),
    ])
    .unwrap();
    let fake = Arc::new(FakeSynthesizer::new("v1").empty_on("You selected English."));
    let generator = AudioGenerator::new(fake, tmp.path());

    let report = generator.run(&table).await.unwrap();

    assert_eq!(report.success_count(), 1);
    let failure = report.failure("confirm_en").unwrap();
    assert!(matches!(failure.error, Error::Decode { .. }));
    assert!(!tmp.path().join("confirm_en.mp3").exists());
}

#[tokio::test]
async fn test_uncreatable_output_dir_is_setup_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("audio");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let fake = Arc::new(FakeSynthesizer::new("v1"));
    let generator = AudioGenerator::new(fake.clone(), blocker.join("nested"));
    let err = generator
        .run(&PhraseTable::kiosk_default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_single_prompt_end_to_end() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_translate_audio(
            &[("tl", "en"), ("q", "Please choose your language"), ("client", "tw-ob")],
            b"ID3\x04\x00fake-mp3-frames",
        )
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new()
        .with_base_url(&fixture.base_url)
        .with_output_dir(tmp.path());
    let table = PhraseTable::new(vec![PhraseEntry::new(
        "prompt_en",
        "Please choose your language",
        "en",
    )])
    .unwrap();

    let generator = AudioGenerator::new(build_synthesizer(&config).unwrap(), &config.output_dir);
    let report = generator.run(&table).await.unwrap();

    mock.assert_async().await;
    assert!(report.all_succeeded());
    assert_eq!(
        file_names(tmp.path()),
        BTreeSet::from(["prompt_en.mp3".to_string()])
    );
    let written = std::fs::metadata(tmp.path().join("prompt_en.mp3")).unwrap();
    assert!(written.len() > 0);
}
