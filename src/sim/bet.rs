//! Player bet commands
//!
//! Commands issued in the wrong phase are ignored rather than reported:
//! the UI may fire clicks while a bet is locked and that is not an error.

use serde::{Deserialize, Serialize};

use super::field::AreaId;
use super::state::{GameEvent, GameState, RoundPhase};
use crate::error::BetError;

/// Player intents, for callers that queue input as values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SelectArea(AreaId),
    SetBetAmount(u64),
    ClearSelection,
    ConfirmBet,
}

/// Apply a single player command
pub fn apply(state: &mut GameState, command: Command) -> Result<(), BetError> {
    match command {
        Command::SelectArea(id) => state.select_area(id),
        Command::SetBetAmount(amount) => state.set_bet_amount(amount),
        Command::ClearSelection => state.clear_selection(),
        Command::ConfirmBet => return state.confirm_bet(),
    }
    Ok(())
}

impl GameState {
    /// Choose the area to bet on, replacing any previous choice
    pub fn select_area(&mut self, id: AreaId) {
        if !self.is_active() {
            return;
        }
        self.bet.selected_area = Some(id);
    }

    /// Change the wager. Zero or more than the current score is ignored.
    pub fn set_bet_amount(&mut self, amount: u64) {
        if !self.is_active() || amount == 0 || amount > self.score {
            return;
        }
        self.bet.amount = amount;
    }

    /// Drop the selected area; the wager amount is kept
    pub fn clear_selection(&mut self) {
        if !self.is_active() {
            return;
        }
        self.bet.selected_area = None;
    }

    /// Lock the bet and take the wager from the score.
    ///
    /// Does nothing without a selection, with a zero wager, or outside
    /// `BettingOpen`. Fails with `InsufficientScore` (and queues a
    /// `BetRejected` event) if the wager is more than the score; state is left
    /// untouched in that case.
    pub fn confirm_bet(&mut self) -> Result<(), BetError> {
        let Some(area) = self.bet.selected_area else {
            return Ok(());
        };
        if !self.is_active() || self.bet.amount == 0 {
            return Ok(());
        }

        if self.score < self.bet.amount {
            let err = BetError::InsufficientScore {
                score: self.score,
                amount: self.bet.amount,
            };
            log::warn!("Bet on {area} rejected: {err}");
            self.emit(GameEvent::BetRejected(err));
            return Err(err);
        }

        self.score -= self.bet.amount;
        self.bet.locked = true;
        self.round.phase = RoundPhase::BetLocked;
        log::info!(
            "Round {}: {} points on {area} at x{:.1}",
            self.round.index,
            self.bet.amount,
            self.field.odds(area)
        );
        Ok(())
    }
}
