use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::engine::TranslationResult;

/// Maximum number of history records kept
pub const HISTORY_CAPACITY: usize = 50;

/// Characters kept in a preview before it is cut with `...`
pub const PREVIEW_CHARS: usize = 200;

/// One past translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,
    pub original_preview: String,
    pub translated_preview: String,
    pub full_original: String,
    pub full_translated: String,
    /// `full_translated` opens with the translator's header
    #[serde(default)]
    pub header_added: bool,
    pub created_at: DateTime<Local>,
}

/// Bounded, newest-first log of translations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: VecDeque<HistoryRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record for `result`, evicting the oldest beyond capacity
    pub fn record(&mut self, result: &TranslationResult, id: u64, created_at: DateTime<Local>) -> &HistoryRecord {
        self.records.push_front(HistoryRecord {
            id,
            original_preview: preview(&result.original_text),
            translated_preview: preview(&result.translated_text),
            full_original: result.original_text.clone(),
            full_translated: result.translated_text.clone(),
            header_added: result.header_added,
            created_at,
        });
        if self.records.len() > HISTORY_CAPACITY {
            if let Some(evicted) = self.records.pop_back() {
                tracing::debug!(id = evicted.id, "evicted oldest history record");
            }
        }
        &self.records[0]
    }

    /// Records, newest first
    pub fn list(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove a record; a missing id is a no-op. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before != self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest id in use
    pub fn last_id(&self) -> Option<u64> {
        self.records.iter().map(|r| r.id).max()
    }
}

/// First `PREVIEW_CHARS` characters, with `...` appended when cut
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LanguageTag;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn result(n: usize) -> TranslationResult {
        TranslationResult {
            original_text: format!("fever {}", n),
            translated_text: format!("حمى {}", n),
            header_added: false,
            word_count: 2,
            timestamp: now(),
            source_language: LanguageTag::parse("en").unwrap(),
            target_language: LanguageTag::parse("ar").unwrap(),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut ledger = Ledger::new();
        ledger.record(&result(1), 1, now());
        ledger.record(&result(2), 2, now());
        let ids: Vec<u64> = ledger.list().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut ledger = Ledger::new();
        for i in 1..=51 {
            ledger.record(&result(i as usize), i, now());
            assert!(ledger.len() <= HISTORY_CAPACITY);
            assert_eq!(ledger.list().next().unwrap().id, i);
        }
        assert_eq!(ledger.len(), 50);
        assert!(ledger.get(1).is_none());
        assert!(ledger.get(2).is_some());
        assert_eq!(ledger.list().last().unwrap().id, 2);
    }

    #[test]
    fn test_remove_and_clear_are_idempotent() {
        let mut ledger = Ledger::new();
        assert!(!ledger.remove(42));
        ledger.clear();
        assert!(ledger.is_empty());

        ledger.record(&result(1), 7, now());
        assert!(!ledger.remove(8));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.remove(7));
        assert!(!ledger.remove(7));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_preview_truncation() {
        let short = "حمى".repeat(10);
        assert_eq!(preview(&short), short);

        let exact = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);

        let long = "ب".repeat(PREVIEW_CHARS + 5);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_full_text_kept() {
        let mut r = result(1);
        r.original_text = "x".repeat(500);
        let mut ledger = Ledger::new();
        let record = ledger.record(&r, 1, now()).clone();
        assert_eq!(record.full_original.len(), 500);
        assert!(record.original_preview.len() < 500);
    }

    #[test]
    fn test_serde_round_trip_keeps_order() {
        let mut ledger = Ledger::new();
        ledger.record(&result(1), 1, now());
        ledger.record(&result(2), 2, now());
        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
