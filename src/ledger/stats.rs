use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Running usage counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsCounters {
    pub total_words_translated: u64,
    pub total_files_processed: u64,
    pub total_elapsed_minutes: u64,
    pub translations_today: u64,
    pub last_reset_date: NaiveDate,
}

impl StatsCounters {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total_words_translated: 0,
            total_files_processed: 0,
            total_elapsed_minutes: 0,
            translations_today: 0,
            last_reset_date: today,
        }
    }

    /// Reset the daily counter when `today` differs from the last reset date
    pub fn roll_over(&mut self, today: NaiveDate) {
        if self.last_reset_date != today {
            tracing::debug!(
                previous = %self.last_reset_date,
                today = %today,
                "daily translation counter reset"
            );
            self.translations_today = 0;
            self.last_reset_date = today;
        }
    }

    /// Count one translation on `today`
    pub fn record_translation(&mut self, today: NaiveDate) {
        self.roll_over(today);
        self.translations_today += 1;
    }

    pub fn add_words(&mut self, words: usize) {
        self.total_words_translated += words as u64;
    }

    pub fn add_files(&mut self, files: usize) {
        self.total_files_processed += files as u64;
    }

    pub fn set_elapsed(&mut self, minutes: u64) {
        self.total_elapsed_minutes = minutes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_same_day_accumulates() {
        let mut stats = StatsCounters::new(day(1));
        stats.record_translation(day(1));
        stats.record_translation(day(1));
        assert_eq!(stats.translations_today, 2);
    }

    #[test]
    fn test_rollover_resets_to_one() {
        let mut stats = StatsCounters::new(day(1));
        stats.record_translation(day(1));
        stats.record_translation(day(1));
        stats.record_translation(day(2));
        assert_eq!(stats.translations_today, 1);
        assert_eq!(stats.last_reset_date, day(2));
    }

    #[test]
    fn test_rollover_keeps_totals() {
        let mut stats = StatsCounters::new(day(1));
        stats.add_words(12);
        stats.add_files(2);
        stats.roll_over(day(5));
        assert_eq!(stats.total_words_translated, 12);
        assert_eq!(stats.total_files_processed, 2);
        assert_eq!(stats.translations_today, 0);
    }
}
