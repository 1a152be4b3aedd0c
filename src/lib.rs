//! Medical English to Arabic glossary substitution
//!
//! `medgloss` replaces recognized medical terms in free text with their Arabic
//! equivalents, lays the result out side by side with the original, and keeps a
//! small ledger of past translations, favorites and usage counters.
//!
//! ```ignore
//! use medgloss::engine::{GlossaryTranslator, NoDelay, SystemClock, ViewMode};
//! use medgloss::glossary::Glossary;
//! use medgloss::ledger::MemoryStore;
//! use medgloss::session::Session;
//! use std::sync::Arc;
//!
//! let translator = GlossaryTranslator::new(Arc::new(Glossary::builtin()), Arc::new(NoDelay))?;
//! let session = Session::open(Arc::new(translator), Arc::new(SystemClock), Arc::new(MemoryStore::new()))?;
//! let report = session.translate(session.request("Patient has diabetes and fever.")).await?;
//! println!("{}", session.render_current(ViewMode::PairedBlock));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod glossary;
pub mod host;
pub mod ledger;
pub mod session;

pub use config::Config;
pub use engine::{
    GlossaryTranslator, LanguageTag, RenderedView, TermTranslator, TranslationRequest,
    TranslationResult, ViewMode,
};
pub use error::{AppError, AppResult, Notification, NotificationLevel};
pub use glossary::{Category, Glossary, GlossaryEntry};
pub use session::{DocumentsReport, IngestReport, Session, TranslationReport};

/// Number of whitespace-delimited tokens in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
