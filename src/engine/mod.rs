/// Translation engine
///
/// Everything between raw input text and a displayable view lives here.
///
/// # Overview
///
/// 1. **Substitution Engine** - Replaces glossary terms, longest match first
/// 2. **Translator seam** - Async trait over the engine, with an injected delay
/// 3. **Segment Aligner** - Pairs sentences or words of original and translation
/// 4. **View Renderer** - Paired-block, paragraph and word-grid layouts
///
/// # Example
///
/// ```ignore
/// use medgloss::engine::{GlossaryTranslator, NoDelay, TermTranslator, ViewMode, render};
/// use medgloss::glossary::Glossary;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let translator = GlossaryTranslator::new(Arc::new(Glossary::builtin()), Arc::new(NoDelay))?;
///     let translated = translator.translate("Chest pain and fever.", "en", "ar").await?;
///     println!("{}", translated.text);
///     Ok(())
/// }
/// ```
pub mod align;
pub mod clock;
pub mod data;
pub mod error;
pub mod mock;
pub mod render;
pub mod substitution;
pub mod translator;

#[cfg(test)]
mod integration_tests;

pub use align::{AlignedSegmentPair, align, split_units};
pub use clock::{Clock, Delay, FixedDelay, ManualClock, NoDelay, SystemClock};
pub use data::{Granularity, LanguageTag, TranslationRequest, TranslationResult, ViewMode};
pub use error::{TranslateError, TranslateResult};
pub use mock::{GatedDelay, MockMode, MockTranslator};
pub use render::{RenderedView, Span, highlight, render, render_pairs, try_render_pairs};
pub use substitution::{ARABIC_HEADER, HEADER_SEPARATOR, Substitution, SubstitutionEngine};
pub use translator::{GlossaryTranslator, TermTranslator, Translation};
