//! Translator trait and the glossary-backed implementation
//!
//! `TermTranslator` is the seam between the session and whatever produces translated
//! text. Today that is the local glossary behind a simulated latency; a remote provider
//! would implement the same trait.
//!
//! # Example
//!
//! ```ignore
//! use medgloss::engine::{GlossaryTranslator, NoDelay, TermTranslator};
//! use medgloss::glossary::Glossary;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let translator = GlossaryTranslator::new(Arc::new(Glossary::builtin()), Arc::new(NoDelay))?;
//!     let result = translator.translate("Patient has fever.", "en", "ar").await?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::engine::clock::Delay;
use crate::engine::error::{TranslateError, TranslateResult};
use crate::engine::substitution::SubstitutionEngine;
use crate::glossary::Glossary;

/// Text produced by a translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// `text` opens with the localized header tag
    pub header_added: bool,
}

impl Translation {
    /// Translated text without a header
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            header_added: false,
        }
    }
}

/// Generic trait for translation providers
///
/// All methods are async so that providers doing I/O fit behind the same seam.
#[async_trait]
pub trait TermTranslator: Send + Sync {
    /// Translate a single text from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate, never blank
    /// * `source_locale` - Source language code (e.g., "en", "en-US")
    /// * `target_locale` - Target language code (e.g., "ar", "ar-SA")
    ///
    /// # Returns
    ///
    /// * `Ok(Translation)` - The translated text, and whether a header was put in front
    /// * `Err(TranslateError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> TranslateResult<Translation>;

    /// Name of this provider, for logging
    fn provider_name(&self) -> &str;
}

/// Dictionary substitution behind an injected delay
pub struct GlossaryTranslator {
    engine: SubstitutionEngine,
    delay: Arc<dyn Delay>,
}

impl GlossaryTranslator {
    pub fn new(glossary: Arc<Glossary>, delay: Arc<dyn Delay>) -> TranslateResult<Self> {
        Ok(Self {
            engine: SubstitutionEngine::new(glossary)?,
            delay,
        })
    }

    pub fn engine(&self) -> &SubstitutionEngine {
        &self.engine
    }
}

#[async_trait]
impl TermTranslator for GlossaryTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> TranslateResult<Translation> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        self.delay.wait().await;

        let add_header = normalize_locale(target_locale) == "ar";
        let out = self.engine.translate(text, add_header);
        tracing::debug!(
            source = source_locale,
            target = target_locale,
            words = out.word_count,
            replacements = out.replacements,
            "glossary substitution done"
        );
        Ok(Translation {
            text: out.text,
            header_added: out.header_added,
        })
    }

    fn provider_name(&self) -> &str {
        "Glossary Translator"
    }
}

/// Normalize a locale code by stripping region information
///
/// - `en-US` → `en`
/// - `ar-SA` → `ar`
/// - `en` → `en` (unchanged)
pub fn normalize_locale(locale: &str) -> String {
    locale.split(['-', '_']).next().unwrap_or(locale).to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code is non-empty and contains only alphanumeric
/// characters, hyphens, and underscores.
pub fn validate_locale(locale: &str) -> TranslateResult<()> {
    if locale.is_empty() {
        return Err(TranslateError::InvalidLocale(
            "Locale code is empty".to_string(),
        ));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TranslateError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::{FixedDelay, NoDelay};
    use crate::engine::substitution::ARABIC_HEADER;

    fn translator() -> GlossaryTranslator {
        GlossaryTranslator::new(Arc::new(Glossary::builtin()), Arc::new(NoDelay)).unwrap()
    }

    #[tokio::test]
    async fn test_translate_to_arabic_adds_header() {
        let result = translator().translate("fever", "en", "ar").await.unwrap();
        assert!(result.header_added);
        assert_eq!(result.text, format!("{}\n\nحمى", ARABIC_HEADER));
    }

    #[tokio::test]
    async fn test_translate_region_tag_counts_as_arabic() {
        let result = translator().translate("fever", "en", "ar-SA").await.unwrap();
        assert!(result.header_added);
        assert!(result.text.starts_with(ARABIC_HEADER));
    }

    #[tokio::test]
    async fn test_translate_other_target_has_no_header() {
        let result = translator().translate("fever", "en", "fr").await.unwrap();
        assert_eq!(result, Translation::plain("حمى"));
    }

    #[tokio::test]
    async fn test_translate_rejects_bad_locale() {
        let result = translator().translate("fever", "en", "ar@x").await;
        assert!(matches!(result, Err(TranslateError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_delay_is_applied() {
        let translator = GlossaryTranslator::new(
            Arc::new(Glossary::builtin()),
            Arc::new(FixedDelay::from_millis(40)),
        )
        .unwrap();
        let start = std::time::Instant::now();
        let _ = translator.translate("cough", "en", "ar").await.unwrap();
        assert!(start.elapsed().as_millis() >= 40);
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(translator().provider_name(), "Glossary Translator");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("ar-SA"), "ar");
        assert_eq!(normalize_locale("EN_us"), "en");
        assert_eq!(normalize_locale("ar"), "ar");
    }

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("en").is_ok());
        assert!(validate_locale("ar-SA").is_ok());
        assert!(validate_locale("").is_err());
        assert!(validate_locale("fr#bad").is_err());
    }
}
