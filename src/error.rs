//! Error types
//!
//! Nothing here is fatal: bet rejections are reported back to the player,
//! unknown area labels fall back to defaults, and a bad settings file falls
//! back to built-in settings.

use serde::Serialize;
use thiserror::Error;

/// Rejection of a bet confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum BetError {
    #[error("insufficient score: {score} points available, {amount} wagered")]
    InsufficientScore { score: u64, amount: u64 },
}

/// An area label outside `A1..=D4`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown area: {label:?}")]
pub struct ParseAreaError {
    pub label: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be > 0")]
    InvalidNonZero { field: &'static str },
    #[error("bet_presets must not be empty")]
    EmptyPresets,
}
