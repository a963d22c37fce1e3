//! Narukami - lightning strike betting over a 4x4 grid
//!
//! Core modules:
//! - `sim`: Deterministic round engine (probability field, bets, clock)
//! - `history`: Capped ledger of settled bets
//! - `settings`: Game configuration (defaults + JSON file)
//! - `error`: Error types surfaced to callers

pub mod error;
pub mod history;
pub mod settings;
pub mod sim;

pub use error::{BetError, ParseAreaError, SettingsError};
pub use history::{History, HistoryEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Grid is always 4x4
    pub const GRID_SIZE: u8 = 4;
    pub const AREA_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);
    /// Row labels, top to bottom
    pub const ROW_LABELS: [char; GRID_SIZE as usize] = ['A', 'B', 'C', 'D'];

    /// Probability at the storm center before jitter
    pub const BASE_PROBABILITY: f64 = 0.25;
    /// Probability lost per unit of distance from the storm center
    pub const DISTANCE_FALLOFF: f64 = 0.05;
    /// Upper bound (exclusive) of the per-area random jitter
    pub const PROBABILITY_JITTER: f64 = 0.05;
    pub const MIN_PROBABILITY: f64 = 0.05;
    pub const MAX_PROBABILITY: f64 = 0.25;

    /// House edge applied to fair odds (expected payout is 90%)
    pub const HOUSE_EDGE: f64 = 0.9;
    /// Odds reported for an unknown area label
    pub const FALLBACK_ODDS: &str = "1.0";

    /// Round length in clock ticks (one tick per second)
    pub const ROUND_SECONDS: u32 = 300;
    pub const STARTING_SCORE: u64 = 1000;
    pub const DEFAULT_BET: u64 = 100;
    pub const BET_PRESETS: [u64; 4] = [50, 100, 250, 500];

    /// Presentation timing hints (milliseconds)
    pub const RESULT_DISPLAY_MS: u32 = 3000;
    pub const WIN_FLASH_MS: u32 = 500;
    pub const LOSS_FLASH_MS: u32 = 1000;
    pub const STRIKE_HIGHLIGHT_MS: u32 = 2000;
}

/// Round to one decimal place, ties to even (4.25 -> 4.2, 4.75 -> 4.8)
#[inline]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Format a second count as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
