//! Core data structures passed between the engine stages
//!
//! A `TranslationRequest` is transient; a `TranslationResult` is immutable once
//! produced and is what every view is rendered from.

use chrono::{DateTime, Local};
use icu_locale::Locale;
use serde::{Deserialize, Serialize};

use crate::engine::substitution::{ARABIC_HEADER, HEADER_SEPARATOR};
use crate::error::{AppError, AppResult};

/// Presentation layout for a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Sentence pairs, original above translated
    #[default]
    PairedBlock,
    /// The whole translated text as one block
    Paragraph,
    /// Word pairs in a two-column grid
    WordGrid,
}

impl ViewMode {
    /// Parse a CLI spelling: `paired`, `paragraph`, `grid` (and a few aliases)
    pub fn parse(value: &str) -> Option<ViewMode> {
        match value.trim().to_lowercase().as_str() {
            "paired" | "paired-block" | "line-by-line" | "side-by-side" => {
                Some(ViewMode::PairedBlock)
            }
            "paragraph" | "para" => Some(ViewMode::Paragraph),
            "grid" | "word-grid" | "words" | "word-by-word" => Some(ViewMode::WordGrid),
            _ => None,
        }
    }

    /// Unit size the aligner should use for this mode, if any
    pub fn granularity(&self) -> Option<Granularity> {
        match self {
            ViewMode::PairedBlock => Some(Granularity::Sentence),
            ViewMode::Paragraph => None,
            ViewMode::WordGrid => Some(Granularity::Word),
        }
    }
}

/// Unit size used by the segment aligner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Sentence,
    Word,
}

/// Validated BCP-47 language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and canonicalize a tag with ICU
    ///
    /// # Errors
    ///
    /// `AppError::InvalidLanguage` when ICU rejects the tag.
    pub fn parse(tag: &str) -> AppResult<Self> {
        let locale: Locale = tag
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidLanguage(tag.to_string()))?;
        Ok(Self(locale.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base language subtag, lowercase (`ar-SA` → `ar`)
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn is_arabic(&self) -> bool {
        self.language() == "ar"
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One invocation's input
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub raw_text: String,
    pub source_language: LanguageTag,
    pub target_language: LanguageTag,
    pub view_mode: ViewMode,
}

impl TranslationRequest {
    pub fn new(
        raw_text: impl Into<String>,
        source_language: LanguageTag,
        target_language: LanguageTag,
    ) -> Self {
        Self {
            raw_text: raw_text.into(),
            source_language,
            target_language,
            view_mode: ViewMode::default(),
        }
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Append the text of ingested files, each separated by a blank line
    pub fn with_attachments<'a>(mut self, contents: impl IntoIterator<Item = &'a str>) -> Self {
        for content in contents {
            if self.raw_text.trim().is_empty() {
                self.raw_text = content.to_string();
            } else {
                self.raw_text.push_str("\n\n");
                self.raw_text.push_str(content);
            }
        }
        self
    }

    /// The text the engine will see
    pub fn text(&self) -> &str {
        self.raw_text.trim()
    }
}

/// Output of one successful translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    /// Set when the translator put the header in front of `translated_text`
    #[serde(default)]
    pub header_added: bool,
    pub word_count: usize,
    pub timestamp: DateTime<Local>,
    pub source_language: LanguageTag,
    pub target_language: LanguageTag,
}

impl TranslationResult {
    /// Translated text without the localized header tag
    ///
    /// Only a header the translator added is removed; the same words typed by the
    /// user are part of the body.
    pub fn body(&self) -> &str {
        if !self.header_added {
            return &self.translated_text;
        }
        self.translated_text
            .strip_prefix(ARABIC_HEADER)
            .and_then(|rest| rest.strip_prefix(HEADER_SEPARATOR))
            .unwrap_or(&self.translated_text)
    }
}
