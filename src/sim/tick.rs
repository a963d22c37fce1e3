//! Round clock and settlement
//!
//! `tick` is the only path that settles a round. Call it once per second;
//! a harness can call it `round_seconds` times in a row to force settlement.

use rand::Rng;

use super::field::payout_for;
use super::state::{Bet, FlashMode, GameEvent, GameState, RoundPhase, RoundResult};
use crate::history::HistoryEntry;

/// Advance the round clock by one second.
///
/// When the clock reaches zero the round settles, the clock resets to the full
/// round length, the round index advances and betting reopens. `now_ms` stamps
/// any history entry written by that settlement.
pub fn tick(state: &mut GameState, now_ms: u64) {
    state.round.remaining_seconds = state.round.remaining_seconds.saturating_sub(1);
    if state.round.remaining_seconds > 0 {
        return;
    }

    settle_round(state, now_ms);

    state.round.remaining_seconds = state.settings.round_seconds;
    state.round.index += 1;
    state.round.phase = RoundPhase::BettingOpen;
    state.emit(GameEvent::RoundStarted {
        index: state.round.index,
    });
}

/// Draw the strike, pay out any locked bet, then refresh the field
fn settle_round(state: &mut GameState, now_ms: u64) {
    let roll: f64 = state.rng.random();
    let struck = state.field.strike(roll);
    let bet = std::mem::replace(&mut state.bet, Bet::new(state.settings.default_bet));

    match bet.selected_area.filter(|_| bet.locked) {
        Some(selected) => {
            let is_win = selected == struck;
            let payout = if is_win {
                payout_for(bet.amount, state.field.odds(selected))
            } else {
                0
            };
            state.score += payout;
            let points_delta = payout as i64 - bet.amount as i64;

            let flash = if is_win { FlashMode::Win } else { FlashMode::Loss };
            emit_strike(state, struck, flash, true);

            let result = RoundResult {
                round: state.round.index,
                is_win,
                selected_area: selected,
                struck_area: struck,
                wager: bet.amount,
                payout,
                points_delta,
                display_ms: state.settings.result_display_ms,
            };
            state.history.record(HistoryEntry {
                round: state.round.index,
                is_win,
                selected_area: Some(selected),
                hit_area: struck,
                amount: points_delta,
                timestamp_ms: now_ms,
            });
            state.last_result = Some(result.clone());
            state.emit(GameEvent::RoundSettled(result));

            log::info!(
                "Round {}: lightning hit {struck}, bet on {selected} {} ({points_delta:+}), score {}",
                state.round.index,
                if is_win { "won" } else { "lost" },
                state.score
            );
        }
        None => {
            // Nothing wagered, the strike is still shown
            emit_strike(state, struck, FlashMode::Win, false);
            log::info!("Round {}: lightning hit {struck}, no bet", state.round.index);
        }
    }

    state.field.refresh(&mut state.rng);
}

fn emit_strike(state: &mut GameState, area: super::AreaId, flash: FlashMode, wagered: bool) {
    let flash_ms = match flash {
        FlashMode::Win => state.settings.win_flash_ms,
        FlashMode::Loss => state.settings.loss_flash_ms,
    };
    state.emit(GameEvent::Strike {
        area,
        flash,
        flash_ms,
        highlight_ms: state.settings.strike_highlight_ms,
        wagered,
    });
}
