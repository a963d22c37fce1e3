//! Demo bettor for the headless driver
//!
//! Plays it safe: backs the favourite (lowest odds) with the largest preset
//! that risks at most a tenth of the score.

use super::bet::Command;
use super::state::GameState;

/// Commands the demo player would issue this tick (empty while a bet is locked)
pub fn autoplay(state: &GameState) -> Vec<Command> {
    if !state.is_active() {
        return Vec::new();
    }

    let Some(favourite) = state.field.odds_table().first().map(|e| e.id) else {
        return Vec::new();
    };

    let budget = state.score / 10;
    let presets = &state.settings.bet_presets;
    let wager = presets
        .iter()
        .copied()
        .filter(|&p| p <= budget)
        .max()
        .or_else(|| presets.iter().copied().min());

    let Some(wager) = wager.filter(|&w| w <= state.score) else {
        return Vec::new();
    };

    vec![
        Command::SelectArea(favourite),
        Command::SetBetAmount(wager),
        Command::ConfirmBet,
    ]
}
