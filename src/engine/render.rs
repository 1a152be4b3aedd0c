//! View Renderer
//!
//! Turns a `TranslationResult` into one of three layouts. Rendering is a pure
//! function of its inputs: switching layout re-renders the stored result and never
//! goes back to the translator.

use regex::RegexBuilder;
use serde::Serialize;
use std::fmt;

use crate::engine::align::{AlignedSegmentPair, align};
use crate::engine::data::{TranslationResult, ViewMode};
use crate::error::RenderError;

pub const ORIGINAL_LABEL: &str = "النص الأصلي:";
pub const TRANSLATED_LABEL: &str = "الترجمة العربية:";
pub const EMPTY_PLACEHOLDER: &str = "ستظهر الترجمة هنا";

/// One paired block: original above translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub index: usize,
    pub original: String,
    pub translated: String,
}

/// One word-grid row: original | translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub original: String,
    pub translated: String,
}

/// Displayable structure produced by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RenderedView {
    PairedBlock { blocks: Vec<Block> },
    Paragraph { text: String },
    WordGrid { rows: Vec<GridRow> },
    /// Nothing to show
    Empty,
}

impl RenderedView {
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedView::PairedBlock { blocks } => blocks.is_empty(),
            RenderedView::Paragraph { text } => text.is_empty(),
            RenderedView::WordGrid { rows } => rows.is_empty(),
            RenderedView::Empty => true,
        }
    }
}

/// Render `result` in `mode`
pub fn render(result: &TranslationResult, mode: ViewMode) -> RenderedView {
    let translated = result.body();
    match mode.granularity() {
        Some(granularity) => {
            let pairs = align(&result.original_text, translated, granularity);
            render_pairs(&pairs, translated, mode)
        }
        None => render_pairs(&[], translated, mode),
    }
}

/// Lay out already aligned pairs
///
/// Malformed pairs are a programming error: debug builds assert, release builds log
/// and fall back to `RenderedView::Empty`.
pub fn render_pairs(pairs: &[AlignedSegmentPair], translated: &str, mode: ViewMode) -> RenderedView {
    match try_render_pairs(pairs, translated, mode) {
        Ok(view) => view,
        Err(e) => {
            tracing::error!(error = %e, "render failed");
            debug_assert!(false, "render failed: {}", e);
            RenderedView::Empty
        }
    }
}

/// Like [`render_pairs`], reporting malformed input instead of degrading
pub fn try_render_pairs(
    pairs: &[AlignedSegmentPair],
    translated: &str,
    mode: ViewMode,
) -> Result<RenderedView, RenderError> {
    check_order(pairs)?;

    let view = match mode {
        ViewMode::PairedBlock => RenderedView::PairedBlock {
            blocks: pairs
                .iter()
                .map(|p| Block {
                    index: p.index,
                    original: p.original_unit.clone(),
                    translated: p.translated_unit.clone(),
                })
                .collect(),
        },
        ViewMode::Paragraph => RenderedView::Paragraph {
            text: translated.to_string(),
        },
        ViewMode::WordGrid => RenderedView::WordGrid {
            rows: pairs
                .iter()
                .map(|p| GridRow {
                    original: p.original_unit.clone(),
                    translated: p.translated_unit.clone(),
                })
                .collect(),
        },
    };

    Ok(if view.is_empty() {
        RenderedView::Empty
    } else {
        view
    })
}

fn check_order(pairs: &[AlignedSegmentPair]) -> Result<(), RenderError> {
    for window in pairs.windows(2) {
        if window[1].index <= window[0].index {
            return Err(RenderError::OutOfOrder {
                previous: window[0].index,
                found: window[1].index,
            });
        }
    }
    Ok(())
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedView::PairedBlock { blocks } => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "[{}]", block.index + 1)?;
                    writeln!(f, "  {} {}", ORIGINAL_LABEL, block.original)?;
                    writeln!(f, "  {} {}", TRANSLATED_LABEL, block.translated)?;
                }
                Ok(())
            }
            RenderedView::Paragraph { text } => writeln!(f, "{}", text),
            RenderedView::WordGrid { rows } => {
                let width = rows
                    .iter()
                    .map(|r| r.original.chars().count())
                    .max()
                    .unwrap_or(0);
                for row in rows {
                    let pad = width - row.original.chars().count();
                    writeln!(f, "{}{} | {}", row.original, " ".repeat(pad), row.translated)?;
                }
                Ok(())
            }
            RenderedView::Empty => writeln!(f, "{}", EMPTY_PLACEHOLDER),
        }
    }
}

/// A run of text, marked when it matched a search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub highlighted: bool,
}

/// Split `text` into spans, marking case-insensitive occurrences of `query`
///
/// The query is taken literally; regex metacharacters in it have no effect.
pub fn highlight(text: &str, query: &str) -> Vec<Span> {
    let plain = |s: &str| Span {
        text: s.to_string(),
        highlighted: false,
    };

    if query.is_empty() {
        return vec![plain(text)];
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return vec![plain(text)];
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            spans.push(plain(&text[last..m.start()]));
        }
        spans.push(Span {
            text: m.as_str().to_string(),
            highlighted: true,
        });
        last = m.end();
    }
    if last < text.len() || spans.is_empty() {
        spans.push(plain(&text[last..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::data::LanguageTag;
    use crate::engine::substitution::ARABIC_HEADER;
    use chrono::Local;

    fn result(original: &str, translated: &str) -> TranslationResult {
        TranslationResult {
            original_text: original.to_string(),
            translated_text: translated.to_string(),
            header_added: false,
            word_count: original.split_whitespace().count(),
            timestamp: Local::now(),
            source_language: LanguageTag::parse("en").unwrap(),
            target_language: LanguageTag::parse("ar").unwrap(),
        }
    }

    fn sample() -> TranslationResult {
        let mut r = result(
            "Patient has fever. Chest pain!",
            &format!("{}\n\nالمريض has حمى. ألم صدر!", ARABIC_HEADER),
        );
        r.header_added = true;
        r
    }

    // ========== Layout Tests ==========

    #[test]
    fn test_paired_block() {
        match render(&sample(), ViewMode::PairedBlock) {
            RenderedView::PairedBlock { blocks } => {
                assert_eq!(blocks.len(), 2);
                assert_eq!(blocks[0].original, "Patient has fever");
                assert_eq!(blocks[0].translated, "المريض has حمى");
                assert_eq!(blocks[1].index, 1);
                assert_eq!(blocks[1].translated, "ألم صدر");
            }
            other => panic!("Expected PairedBlock, got {:?}", other),
        }
    }

    #[test]
    fn test_paragraph_uses_whole_body() {
        let view = render(&sample(), ViewMode::Paragraph);
        assert_eq!(
            view,
            RenderedView::Paragraph {
                text: "المريض has حمى. ألم صدر!".to_string()
            }
        );
    }

    #[test]
    fn test_word_grid() {
        match render(&sample(), ViewMode::WordGrid) {
            RenderedView::WordGrid { rows } => {
                assert_eq!(rows.len(), 5);
                assert_eq!(rows[0].original, "Patient");
                assert_eq!(rows[0].translated, "المريض");
                assert_eq!(rows[2].original, "fever.");
                assert_eq!(rows[2].translated, "حمى.");
                assert_eq!(rows[4].translated, "صدر!");
            }
            other => panic!("Expected WordGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_render_is_pure() {
        let r = sample();
        assert_eq!(render(&r, ViewMode::WordGrid), render(&r, ViewMode::WordGrid));
    }

    #[test]
    fn test_nothing_to_show_is_empty() {
        let r = result("...", "...");
        assert_eq!(render(&r, ViewMode::PairedBlock), RenderedView::Empty);
        assert_eq!(render(&result("", ""), ViewMode::Paragraph), RenderedView::Empty);
    }

    #[test]
    fn test_out_of_order_pairs_rejected() {
        let pairs = vec![
            AlignedSegmentPair {
                index: 1,
                original_unit: "a".to_string(),
                translated_unit: "b".to_string(),
            },
            AlignedSegmentPair {
                index: 0,
                original_unit: "c".to_string(),
                translated_unit: "d".to_string(),
            },
        ];
        assert_eq!(
            try_render_pairs(&pairs, "", ViewMode::PairedBlock),
            Err(RenderError::OutOfOrder {
                previous: 1,
                found: 0
            })
        );
    }

    // ========== Display Tests ==========

    #[test]
    fn test_display_paired() {
        let text = render(&sample(), ViewMode::PairedBlock).to_string();
        assert!(text.starts_with("[1]\n"));
        assert!(text.contains(&format!("{} Patient has fever", ORIGINAL_LABEL)));
        assert!(text.contains(&format!("{} ألم صدر", TRANSLATED_LABEL)));
    }

    #[test]
    fn test_display_grid_aligns_columns() {
        let view = RenderedView::WordGrid {
            rows: vec![
                GridRow {
                    original: "a".to_string(),
                    translated: "x".to_string(),
                },
                GridRow {
                    original: "abc".to_string(),
                    translated: "y".to_string(),
                },
            ],
        };
        assert_eq!(view.to_string(), "a   | x\nabc | y\n");
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(RenderedView::Empty.to_string(), format!("{}\n", EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(RenderedView::Paragraph {
            text: "حمى".to_string(),
        })
        .unwrap();
        assert_eq!(json["mode"], "paragraph");
        assert_eq!(json["text"], "حمى");
    }

    // ========== Highlight Tests ==========

    #[test]
    fn test_highlight_case_insensitive() {
        let spans = highlight("Fever and fever", "FEVER");
        assert_eq!(spans.len(), 3);
        assert!(spans[0].highlighted);
        assert_eq!(spans[0].text, "Fever");
        assert_eq!(spans[1].text, " and ");
        assert!(!spans[1].highlighted);
        assert_eq!(spans[2].text, "fever");
    }

    #[test]
    fn test_highlight_query_is_literal() {
        let spans = highlight("dose (x2) today", "(x2)");
        assert_eq!(spans.iter().filter(|s| s.highlighted).count(), 1);
        assert_eq!(spans[1].text, "(x2)");
    }

    #[test]
    fn test_highlight_no_match_or_empty_query() {
        assert_eq!(highlight("حمى", "cough").len(), 1);
        assert!(!highlight("حمى", "").iter().any(|s| s.highlighted));
    }
}
