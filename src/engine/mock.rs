//! Mock translator and delay for testing
//!
//! Deterministic stand-ins for the translator seam: they count calls, can fail on
//! demand, and can be held open until a test releases them so that in-flight
//! behaviour (serialization, cancellation) is observable.
//!
//! # Example
//!
//! ```ignore
//! use medgloss::engine::{MockMode, MockTranslator, TermTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::NoOp);
//!     let result = mock.translate("hello", "en", "ar").await.unwrap();
//!     assert_eq!(result.text, "hello");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use crate::engine::clock::Delay;
use crate::engine::error::{TranslateError, TranslateResult};
use crate::engine::translator::{TermTranslator, Translation};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return input unchanged
    NoOp,

    /// Exact-text mappings; unknown text is returned unchanged
    Mappings(HashMap<String, String>),

    /// Simulate a backend failure
    Error(String),
}

/// Mock translator that counts every call
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Block each translation until `gate` is notified
    pub fn with_gate(mode: MockMode, gate: Arc<Notify>) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            gate: Some(gate),
        }
    }

    /// Number of times `translate` has been entered
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn apply_translation(&self, text: &str) -> TranslateResult<Translation> {
        match &self.mode {
            MockMode::NoOp => Ok(Translation::plain(text)),
            MockMode::Mappings(map) => Ok(Translation::plain(
                map.get(text).map(String::as_str).unwrap_or(text),
            )),
            MockMode::Error(msg) => Err(TranslateError::TranslationError(msg.clone())),
        }
    }
}

#[async_trait]
impl TermTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_locale: &str,
        _target_locale: &str,
    ) -> TranslateResult<Translation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.apply_translation(text)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

/// Delay that waits until a test releases it
#[derive(Debug, Clone, Default)]
pub struct GatedDelay {
    gate: Arc<Notify>,
}

impl GatedDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one pending (or the next) wait complete
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Delay for GatedDelay {
    async fn wait(&self) {
        self.gate.notified().await;
    }
}
