//! Narukami headless driver
//!
//! Wires settings, logging and a seeded engine to a steady one-second clock
//! and lets the demo bettor play a few rounds.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use narukami::Settings;
use narukami::sim::{GameEvent, GameState, apply, autoplay, tick};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::Strike { area, wagered, .. } => {
            println!("⚡ Lightning strikes {area}{}", if *wagered { "" } else { " (no bet)" });
        }
        GameEvent::RoundSettled(result) => {
            let outcome = if result.is_win { "WIN" } else { "LOSS" };
            println!(
                "   #{} {outcome}: {} -> {} ({:+}pt)",
                result.round, result.selected_area, result.struck_area, result.points_delta
            );
        }
        GameEvent::BetRejected(err) => println!("   bet rejected: {err}"),
        GameEvent::RoundStarted { index } => println!("-- round #{index} --"),
    }
}

fn main() {
    env_logger::init();
    log::info!("Narukami (native) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(now_ms);
    let rounds = settings.autoplay_rounds;
    let interval = Duration::from_millis(settings.tick_interval_ms);

    let mut state = GameState::new(settings, seed);
    println!("-- round #{} --", state.round.index);

    while state.round.index <= rounds {
        for command in autoplay(&state) {
            // Rejections are queued as events and reported below
            let _ = apply(&mut state, command);
        }

        if !interval.is_zero() {
            thread::sleep(interval);
        }
        tick(&mut state, now_ms());

        for event in state.drain_events() {
            report(&event);
        }
    }

    println!(
        "Final score {} ({} wins in the last {} bets, net {:+}pt)",
        state.score,
        state.history.wins(),
        state.history.len(),
        state.history.net_points()
    );
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
