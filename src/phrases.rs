//! 提示语配置表：标识符 → (文本, 语言)。
//!
//! Phrase table configuration.
//!
//! A [`PhraseTable`] is the explicit list of prompts the generator turns into
//! audio. The built-in table holds the kiosk's language-selection prompts; a
//! different set can be loaded from YAML or JSON:
//!
//! ```yaml
//! - id: prompt_en
//!   text: Please choose your language
//!   language: en
//! - id: prompt_hi
//!   text: कृपया अपनी भाषा चुनें
//!   language: hi
//! ```

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One prompt to synthesize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    /// File stem of the generated audio, e.g. `prompt_en`.
    pub id: String,
    pub text: String,
    /// Language code passed to the provider, e.g. `hi` or `mr-IN`.
    pub language: String,
}

impl PhraseEntry {
    pub fn new(id: impl Into<String>, text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            language: language.into(),
        }
    }
}

/// Ordered, validated collection of [`PhraseEntry`] values with unique identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseTable {
    entries: Vec<PhraseEntry>,
}

impl PhraseTable {
    /// Build a table, rejecting duplicate or unsafe identifiers and blank fields.
    pub fn new(entries: Vec<PhraseEntry>) -> Result<Self> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// The language-selection prompts shown on the kiosk start screen.
    pub fn kiosk_default() -> Self {
        Self {
            entries: vec![
                PhraseEntry::new("prompt_en", "Please choose your language", "en"),
                PhraseEntry::new("prompt_hi", "कृपया अपनी भाषा चुनें", "hi"),
                PhraseEntry::new("prompt_mr", "कृपया आपली भाषा निवडा", "mr"),
                PhraseEntry::new("confirm_en", "You selected English.", "en"),
                PhraseEntry::new("confirm_hi", "आपने हिंदी चुनी है।", "hi"),
                PhraseEntry::new("confirm_mr", "आपण मराठी निवडली आहे.", "mr"),
            ],
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let entries: Vec<PhraseEntry> = serde_yaml::from_str(s)?;
        Self::new(entries)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let entries: Vec<PhraseEntry> = serde_json::from_str(s)?;
        Self::new(entries)
    }

    /// Load a table from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(Error::configuration_with_context(
                format!("Unsupported phrase file extension: {:?}", other.unwrap_or("")),
                ErrorContext::new()
                    .with_field_path("phrases")
                    .with_details(path.display().to_string())
                    .with_source("phrase_table"),
            )),
        }
    }

    /// Keep only the entries whose identifiers are listed. Unknown identifiers are an error.
    pub fn retain_ids<S: AsRef<str>>(mut self, ids: &[S]) -> Result<Self> {
        if ids.is_empty() {
            return Ok(self);
        }
        for id in ids {
            let id = id.as_ref();
            if self.get(id).is_none() {
                return Err(Error::validation_with_context(
                    format!("Unknown phrase identifier '{}'", id),
                    ErrorContext::new()
                        .with_field_path("only")
                        .with_source("phrase_table"),
                ));
            }
        }
        self.entries
            .retain(|e| ids.iter().any(|id| id.as_ref() == e.id));
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&PhraseEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhraseEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::kiosk_default()
    }
}

impl<'a> IntoIterator for &'a PhraseTable {
    type Item = &'a PhraseEntry;
    type IntoIter = std::slice::Iter<'a, PhraseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Identifiers become file names, so only `[A-Za-z0-9_-]` is accepted.
fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn validate_entries(entries: &[PhraseEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        let field = |name: &str| format!("phrases[{}].{}", i, name);
        let invalid = |msg: String, name: &str| {
            Error::validation_with_context(
                msg,
                ErrorContext::new()
                    .with_field_path(field(name))
                    .with_source("phrase_table"),
            )
        };

        if !is_safe_identifier(&entry.id) {
            return Err(invalid(
                format!(
                    "Identifier '{}' must be non-empty and use only letters, digits, '_' or '-'",
                    entry.id
                ),
                "id",
            ));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(invalid(
                format!("Duplicate identifier '{}'", entry.id),
                "id",
            ));
        }
        if entry.text.trim().is_empty() {
            return Err(invalid(format!("Text for '{}' is empty", entry.id), "text"));
        }
        if entry.language.trim().is_empty() {
            return Err(invalid(
                format!("Language for '{}' is empty", entry.id),
                "language",
            ));
        }
    }
    Ok(())
}
