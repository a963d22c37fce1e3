//! Read model for presentation

use serde::Serialize;

use super::field::{AreaId, OddsEntry};
use super::state::{GameState, RoundPhase, RoundResult};
use crate::format_clock;
use crate::history::HistoryEntry;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub round_index: u32,
    pub remaining_seconds: u32,
    pub phase: RoundPhase,
    pub is_active: bool,
    pub selected_area: Option<AreaId>,
    pub bet_amount: u64,
    pub bet_locked: bool,
    pub bet_presets: Vec<u64>,
    /// Ascending by odds
    pub odds: Vec<OddsEntry>,
    pub last_result: Option<RoundResult>,
    /// Newest first
    pub history: Vec<HistoryEntry>,
}

impl Snapshot {
    /// Countdown as `m:ss`
    pub fn clock_text(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            round_index: self.round.index,
            remaining_seconds: self.round.remaining_seconds,
            phase: self.round.phase,
            is_active: self.is_active(),
            selected_area: self.bet.selected_area,
            bet_amount: self.bet.amount,
            bet_locked: self.bet.locked,
            bet_presets: self.settings.bet_presets.clone(),
            odds: self.field.odds_table(),
            last_result: self.last_result.clone(),
            history: self.history.entries().to_vec(),
        }
    }
}
