//! Deterministic round engine
//!
//! All game rules live here. This module must stay pure and deterministic:
//! - Clock advances only through `tick`
//! - Seeded RNG only
//! - Stable iteration order (grid order A1..D4)
//! - No rendering, wall-clock or platform dependencies

pub mod autoplay;
pub mod bet;
pub mod field;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autoplay::autoplay;
pub use bet::{Command, apply};
pub use field::{Area, AreaId, OddsEntry, ProbabilityField, odds_for, payout_for, probability_at};
pub use snapshot::Snapshot;
pub use state::{Bet, FlashMode, GameEvent, GameState, Round, RoundPhase, RoundResult};
pub use tick::tick;
