//! Game state and core round types
//!
//! `GameState` is the single owner of score, bet, clock, field and history.
//! Everything that mutates it lives in `bet` (player commands) and `tick`
//! (clock and settlement).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::{AreaId, ProbabilityField};
use crate::error::BetError;
use crate::history::History;
use crate::settings::Settings;

/// Where the current round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Bets may be placed or changed
    BettingOpen,
    /// A bet is confirmed and frozen until the clock runs out
    BetLocked,
}

/// The current betting cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round counter
    pub index: u32,
    /// Ticks left before settlement
    pub remaining_seconds: u32,
    pub phase: RoundPhase,
}

impl Round {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::BettingOpen
    }
}

/// The player's wager for the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub selected_area: Option<AreaId>,
    pub amount: u64,
    /// Set on confirm; selection and amount are frozen until settlement
    pub locked: bool,
}

impl Bet {
    pub fn new(amount: u64) -> Self {
        Self {
            selected_area: None,
            amount,
            locked: false,
        }
    }
}

/// Screen flash style for a strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashMode {
    /// Bright flash (a win, or a strike nobody bet on)
    Win,
    /// Dark flash
    Loss,
}

/// Outcome of a settled bet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub is_win: bool,
    pub selected_area: AreaId,
    pub struck_area: AreaId,
    pub wager: u64,
    /// Points credited on a win (0 on a loss)
    pub payout: u64,
    /// Net change over the round: payout - wager
    pub points_delta: i64,
    /// How long presentation should show the result banner
    pub display_ms: u32,
}

/// One-shot notifications for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Lightning hit `area`. Fires every settlement, even when nothing was wagered.
    Strike {
        area: AreaId,
        flash: FlashMode,
        flash_ms: u32,
        highlight_ms: u32,
        wagered: bool,
    },
    /// A locked bet was settled
    RoundSettled(RoundResult),
    /// A bet confirmation was refused
    BetRejected(BetError),
    /// Betting opened for a new round with a refreshed field
    RoundStarted { index: u32 },
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub score: u64,
    pub round: Round,
    pub bet: Bet,
    pub field: ProbabilityField,
    pub history: History,
    pub last_result: Option<RoundResult>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new game: round 1, full clock, freshly refreshed field
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: settings.starting_score,
            round: Round {
                index: 1,
                remaining_seconds: settings.round_seconds,
                phase: RoundPhase::BettingOpen,
            },
            bet: Bet::new(settings.default_bet),
            field: ProbabilityField::new(),
            history: History::new(),
            last_result: None,
            events: Vec::new(),
            settings,
        };

        state.field.refresh(&mut state.rng);
        log::info!("Game started with seed {seed}, score {}", state.score);

        state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.round.is_active()
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
