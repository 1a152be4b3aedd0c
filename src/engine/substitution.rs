/// Substitution Engine
///
/// Replaces every glossary source term found in a text with its target term.
///
/// # Matching rules
///
/// - Whole words only: `feverish` does not contain `fever`.
/// - Case-insensitive: `Fever`, `FEVER` and `fever` all match.
/// - Multi-word terms match as an exact phrase (`heart disease`).
/// - Longest term first. All terms are compiled into one alternation sorted by
///   length (descending), ties broken by category order then table order. The
///   regex engine tries alternatives left to right at each position, so at any
///   offset the longest term wins and `heart disease` beats `heart`.
/// - One left-to-right pass. Text produced by a replacement is never scanned
///   again, so a target term that happens to equal another rule's source term is
///   left alone.
///
/// Anything that does not match (punctuation, numerals, unknown words, spacing)
/// passes through untouched.
///
/// The header is never detected by looking at text: input may legitimately begin
/// with the header's own words. Whether it was added travels with the output as
/// `Substitution::header_added`.
use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::error::{TranslateError, TranslateResult};
use crate::glossary::Glossary;

/// Header put in front of Arabic output
pub const ARABIC_HEADER: &str = "[الترجمة العربية]";

/// Separates the header from the translated body
pub const HEADER_SEPARATOR: &str = "\n\n";

/// Output of one substitution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Translated text, header included when applicable
    pub text: String,
    /// `text` starts with `ARABIC_HEADER` followed by `HEADER_SEPARATOR`
    pub header_added: bool,
    /// Whitespace-delimited token count of the input
    pub word_count: usize,
    /// Number of spans replaced
    pub replacements: usize,
}

/// Compiled glossary matcher
#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    glossary: Arc<Glossary>,
    pattern: Option<Regex>,
    // lowercase source term -> target term, first in category order
    targets: HashMap<String, String>,
}

impl SubstitutionEngine {
    /// Compile a matcher for `glossary`
    ///
    /// # Errors
    ///
    /// `TranslateError::Other` if the combined pattern exceeds the regex size limit.
    pub fn new(glossary: Arc<Glossary>) -> TranslateResult<Self> {
        let ordered = ordered_terms(&glossary);

        let mut targets = HashMap::new();
        for (source, target) in &ordered {
            targets
                .entry(source.to_lowercase())
                .or_insert_with(|| target.to_string());
        }

        let pattern = if ordered.is_empty() {
            None
        } else {
            let alternation = ordered
                .iter()
                .map(|(source, _)| regex::escape(source))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
                .case_insensitive(true)
                .build()
                .map_err(|e| TranslateError::Other(format!("failed to compile glossary: {}", e)))?;
            Some(pattern)
        };

        tracing::debug!(terms = targets.len(), "compiled substitution engine");
        Ok(Self {
            glossary,
            pattern,
            targets,
        })
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Substitute every glossary term in `text`
    ///
    /// # Arguments
    ///
    /// * `text` - Input text, already validated as non-blank by the caller
    /// * `add_header` - Prefix `ARABIC_HEADER` and `HEADER_SEPARATOR`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let engine = SubstitutionEngine::new(Arc::new(Glossary::builtin()))?;
    /// let out = engine.translate("Patient has diabetes.", false);
    /// assert_eq!(out.text, "المريض has السكري.");
    /// ```
    pub fn translate(&self, text: &str, add_header: bool) -> Substitution {
        let mut replacements = 0;
        let substituted = match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &Captures| {
                    let matched = &caps[0];
                    match self.targets.get(&matched.to_lowercase()) {
                        Some(target) => {
                            replacements += 1;
                            target.clone()
                        }
                        None => matched.to_string(),
                    }
                })
                .into_owned(),
            None => text.to_string(),
        };

        let output = if add_header {
            format!("{}{}{}", ARABIC_HEADER, HEADER_SEPARATOR, substituted)
        } else {
            substituted
        };

        Substitution {
            text: output,
            header_added: add_header,
            word_count: crate::word_count(text),
            replacements,
        }
    }
}

/// Glossary terms in match priority order
///
/// Longest first; the sort is stable, so equal lengths keep glossary order
/// (category order, then table order).
fn ordered_terms(glossary: &Glossary) -> Vec<(&str, &str)> {
    let mut terms: Vec<(&str, &str)> = glossary
        .all_entries()
        .iter()
        .map(|e| (e.source_term.as_str(), e.target_term.as_str()))
        .collect();
    terms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    terms
}
