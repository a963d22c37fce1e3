//! Bet history ledger
//!
//! Most-recent-first, keeps the last 10 settled bets.

use serde::{Deserialize, Serialize};

use crate::sim::AreaId;

/// Maximum number of history entries to keep
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// A single settled bet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Round the bet was placed in
    pub round: u32,
    pub is_win: bool,
    /// Area the player bet on
    pub selected_area: Option<AreaId>,
    /// Area lightning struck
    pub hit_area: AreaId,
    /// Net points: payout minus wager on a win, negative wager on a loss
    pub amount: i64,
    /// Unix timestamp (ms) of settlement, as reported by the clock driver
    pub timestamp_ms: u64,
}

/// Settled bets, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_HISTORY_ENTRIES + 1),
        }
    }

    /// Record a settled bet at the front, evicting the oldest past the cap
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn wins(&self) -> usize {
        self.entries.iter().filter(|e| e.is_win).count()
    }

    /// Sum of net points over the retained entries
    pub fn net_points(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(round: u32, amount: i64) -> HistoryEntry {
        HistoryEntry {
            round,
            is_win: amount > 0,
            selected_area: "B2".parse().ok(),
            hit_area: "A1".parse().unwrap(),
            amount,
            timestamp_ms: round as u64 * 300_000,
        }
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());

        history.record(entry(1, -100));
        history.record(entry(2, 800));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().round, 2);
        assert_eq!(history.entries()[1].round, 1);
        assert_eq!(history.wins(), 1);
        assert_eq!(history.net_points(), 700);
    }

    #[test]
    fn test_oldest_evicted_past_cap() {
        let mut history = History::new();
        for round in 1..=15 {
            history.record(entry(round, -50));
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        let rounds: Vec<u32> = history.entries().iter().map(|e| e.round).collect();
        assert_eq!(rounds, (6..=15).rev().collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_history_capped_and_ordered(count in 0usize..40) {
            let mut history = History::new();
            for round in 0..count as u32 {
                history.record(entry(round, 10));
            }
            prop_assert_eq!(history.len(), count.min(MAX_HISTORY_ENTRIES));
            prop_assert!(history.entries().windows(2).all(|w| w[0].round > w[1].round));
        }
    }
}
