//! Probability field over the 4x4 grid
//!
//! Each round a storm center is dropped on the grid. Strike probability falls
//! off with distance from the center, gets a little jitter, and is clamped to
//! `[MIN_PROBABILITY, MAX_PROBABILITY]`. Odds are the fair odds of that
//! probability times the house edge, rounded to one decimal.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ParseAreaError;
use crate::round_tenth;

/// Address of one grid cell, displayed as `A1`..`D4` (letter = row, digit = column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AreaId {
    row: u8,
    col: u8,
}

impl AreaId {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    /// Every area in grid order (A1, A2, A3, A4, B1, ..., D4)
    pub fn all() -> impl Iterator<Item = AreaId> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| AreaId { row, col }))
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Position in grid order
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * GRID_SIZE as usize + self.col as usize
    }

    fn position(self) -> DVec2 {
        DVec2::new(self.row as f64, self.col as f64)
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROW_LABELS[self.row as usize], self.col + 1)
    }
}

impl FromStr for AreaId {
    type Err = ParseAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseAreaError {
            label: s.to_string(),
        };
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let row = ROW_LABELS
            .iter()
            .position(|&l| l == letter)
            .ok_or_else(err)?;
        let col = digit
            .to_digit(10)
            .and_then(|d| d.checked_sub(1))
            .ok_or_else(err)?;
        AreaId::new(row as u8, col as u8).ok_or_else(err)
    }
}

impl TryFrom<String> for AreaId {
    type Error = ParseAreaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AreaId> for String {
    fn from(id: AreaId) -> Self {
        id.to_string()
    }
}

/// One grid cell and its odds for the current round
#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub id: AreaId,
    pub probability: f64,
    pub odds: f64,
}

/// Row of the odds table handed to presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OddsEntry {
    pub id: AreaId,
    pub odds: f64,
}

/// Probability after distance falloff and jitter, clamped to the legal range
#[inline]
pub fn probability_at(distance: f64, jitter: f64) -> f64 {
    let base = BASE_PROBABILITY - distance * DISTANCE_FALLOFF;
    (base + jitter).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

/// Payout multiplier for a strike probability
#[inline]
pub fn odds_for(probability: f64) -> f64 {
    round_tenth((1.0 / probability) * HOUSE_EDGE)
}

/// Winnings for a wager at one-decimal odds: `floor(amount * odds)`, computed in tenths
#[inline]
pub fn payout_for(amount: u64, odds: f64) -> u64 {
    let tenths = (odds * 10.0).round() as u64;
    amount * tenths / 10
}

/// The 16 areas with this round's probabilities and odds
#[derive(Debug, Clone, Serialize)]
pub struct ProbabilityField {
    areas: Vec<Area>,
}

impl ProbabilityField {
    /// Build the grid with an even placeholder distribution; call `refresh` before play
    pub fn new() -> Self {
        let probability = 0.1;
        Self {
            areas: AreaId::all()
                .map(|id| Area {
                    id,
                    probability,
                    odds: odds_for(probability),
                })
                .collect(),
        }
    }

    /// Drop a new storm center and recompute every probability and odds.
    /// Returns the storm center.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DVec2 {
        let center = DVec2::new(
            rng.random_range(0..GRID_SIZE) as f64,
            rng.random_range(0..GRID_SIZE) as f64,
        );

        for area in &mut self.areas {
            let distance = area.id.position().distance(center);
            let jitter = rng.random_range(0.0..PROBABILITY_JITTER);
            area.probability = probability_at(distance, jitter);
            area.odds = odds_for(area.probability);
        }

        log::debug!(
            "Storm center at {}",
            AreaId::new(center.x as u8, center.y as u8)
                .map(|id| id.to_string())
                .unwrap_or_default()
        );
        center
    }

    /// All areas in grid order
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn area(&self, id: AreaId) -> &Area {
        &self.areas[id.index()]
    }

    pub fn odds(&self, id: AreaId) -> f64 {
        self.area(id).odds
    }

    /// Odds for an area label, one decimal place; `"1.0"` for unknown labels
    pub fn odds_of(&self, label: &str) -> String {
        match label.parse::<AreaId>() {
            Ok(id) => format!("{:.1}", self.odds(id)),
            Err(_) => FALLBACK_ODDS.to_string(),
        }
    }

    /// Sum of all probabilities (independently clamped, so not 1.0)
    pub fn total_probability(&self) -> f64 {
        self.areas.iter().map(|a| a.probability).sum()
    }

    /// Odds sorted ascending; ties keep grid order
    pub fn odds_table(&self) -> Vec<OddsEntry> {
        let mut table: Vec<OddsEntry> = self
            .areas
            .iter()
            .map(|a| OddsEntry {
                id: a.id,
                odds: a.odds,
            })
            .collect();
        table.sort_by(|a, b| a.odds.total_cmp(&b.odds));
        table
    }

    /// Pick the struck area for a uniform roll in `[0, 1)`.
    ///
    /// Walks areas in grid order accumulating normalized probability; the
    /// first area whose cumulative share reaches the roll is struck. Falls
    /// back to the first area if rounding leaves the roll uncovered.
    pub fn strike(&self, roll: f64) -> AreaId {
        let total = self.total_probability();
        let mut cumulative = 0.0;
        for area in &self.areas {
            cumulative += area.probability / total;
            if roll <= cumulative {
                return area.id;
            }
        }
        self.areas[0].id
    }

    /// Overwrite one area's probability and odds, bypassing the clamp
    #[cfg(test)]
    pub(crate) fn rig(&mut self, id: AreaId, probability: f64, odds: f64) {
        let area = &mut self.areas[id.index()];
        area.probability = probability;
        area.odds = odds;
    }

    /// Put all strike weight on one area
    #[cfg(test)]
    pub(crate) fn rig_strike(&mut self, struck: AreaId) {
        for area in &mut self.areas {
            area.probability = if area.id == struck { 1.0 } else { 0.0 };
        }
    }
}

impl Default for ProbabilityField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn id(label: &str) -> AreaId {
        label.parse().unwrap()
    }

    #[test]
    fn test_area_ids_cover_grid_in_order() {
        let labels: Vec<String> = AreaId::all().map(|id| id.to_string()).collect();
        assert_eq!(labels.len(), AREA_COUNT);
        assert_eq!(labels[0], "A1");
        assert_eq!(labels[3], "A4");
        assert_eq!(labels[4], "B1");
        assert_eq!(labels[15], "D4");

        for (i, area) in AreaId::all().enumerate() {
            assert_eq!(area.index(), i);
            assert_eq!(area.to_string().parse::<AreaId>().unwrap(), area);
        }
    }

    #[test]
    fn test_area_id_parse() {
        let b2 = id("B2");
        assert_eq!((b2.row(), b2.col()), (1, 1));
        assert_eq!(id("D4"), AreaId::new(3, 3).unwrap());

        for bad in ["", "E1", "A0", "A5", "A12", "1A", "B", "b2", "d4"] {
            assert!(bad.parse::<AreaId>().is_err(), "{bad} should not parse");
        }
        assert!(AreaId::new(4, 0).is_none());
    }

    #[test]
    fn test_area_id_serializes_as_label() {
        let json = serde_json::to_string(&id("C3")).unwrap();
        assert_eq!(json, "\"C3\"");
        let back: AreaId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id("C3"));
        assert!(serde_json::from_str::<AreaId>("\"Z9\"").is_err());
    }

    #[test]
    fn test_probability_clamped_after_jitter() {
        // At the center the base is already the max, jitter cannot push past it
        assert_eq!(probability_at(0.0, 0.049), MAX_PROBABILITY);
        // Far corner: base is negative, clamp lifts it to the floor
        assert_eq!(probability_at(18f64.sqrt(), 0.0), MIN_PROBABILITY);
        // One step away: 0.20 + jitter, inside the range
        assert!((probability_at(1.0, 0.02) - 0.22).abs() < 1e-12);
        // Base sitting on the floor, jitter lifts it back in
        assert!((probability_at(4.0, 0.04) - 0.09).abs() < 1e-12);
    }

    #[test]
    fn test_odds_for_probability() {
        assert_eq!(odds_for(0.1), 9.0);
        assert_eq!(odds_for(0.25), 3.6);
        assert_eq!(odds_for(0.05), 18.0);
        assert_eq!(odds_for(0.2), 4.5);
    }

    #[test]
    fn test_payout_exact_at_one_decimal_odds() {
        assert_eq!(payout_for(100, 4.1), 410);
        assert_eq!(payout_for(50, 4.1), 205);
        assert_eq!(payout_for(100, 4.6), 460);
        assert_eq!(payout_for(50, 5.1), 255);
        assert_eq!(payout_for(55, 4.7), 258);
        assert_eq!(payout_for(100, 9.0), 900);

        // Every reachable odds value against every preset, checked in integers
        for tenths in 36u64..=180 {
            let odds = tenths as f64 / 10.0;
            for wager in BET_PRESETS {
                assert_eq!(payout_for(wager, odds), wager * tenths / 10, "{wager} at x{odds}");
            }
        }
    }

    #[test]
    fn test_odds_of_fallback() {
        let field = ProbabilityField::new();
        assert_eq!(field.odds_of("B2"), "9.0");
        assert_eq!(field.odds_of("Q7"), "1.0");
        assert_eq!(field.odds_of("b2"), "1.0");
        assert_eq!(field.odds_of(""), "1.0");
    }

    #[test]
    fn test_odds_table_sorted_ascending() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ProbabilityField::new();
        field.refresh(&mut rng);

        let table = field.odds_table();
        assert_eq!(table.len(), AREA_COUNT);
        assert!(table.windows(2).all(|w| w[0].odds <= w[1].odds));
    }

    #[test]
    fn test_odds_table_ties_keep_grid_order() {
        let field = ProbabilityField::new();
        let table = field.odds_table();
        let ids: Vec<AreaId> = table.iter().map(|e| e.id).collect();
        assert_eq!(ids, AreaId::all().collect::<Vec<_>>());
    }

    #[test]
    fn test_storm_center_is_most_likely() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut field = ProbabilityField::new();
        for _ in 0..20 {
            let center = field.refresh(&mut rng);
            let center_id = AreaId::new(center.x as u8, center.y as u8).unwrap();
            let center_p = field.area(center_id).probability;
            assert_eq!(center_p, MAX_PROBABILITY);
            assert!(field.areas().iter().all(|a| a.probability <= center_p));
        }
    }

    #[test]
    fn test_strike_walks_cumulative_share() {
        let mut field = ProbabilityField::new();
        // Even weights: each area owns 1/16 of [0, 1]
        assert_eq!(field.strike(0.0), id("A1"));
        assert_eq!(field.strike(0.06), id("A1"));
        assert_eq!(field.strike(0.07), id("A2"));
        assert_eq!(field.strike(0.99), id("D4"));

        // Roll past the final cumulative sum falls back to A1
        assert_eq!(field.strike(1.5), id("A1"));

        field.rig_strike(id("C2"));
        assert_eq!(field.strike(0.5), id("C2"));
        assert_eq!(field.strike(0.999), id("C2"));
    }

    #[test]
    fn test_strike_frequency_matches_weights() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut field = ProbabilityField::new();
        field.refresh(&mut rng);

        const TRIALS: usize = 200_000;
        let mut hits = [0usize; AREA_COUNT];
        for _ in 0..TRIALS {
            let roll: f64 = rng.random();
            hits[field.strike(roll).index()] += 1;
        }

        let total = field.total_probability();
        for area in field.areas() {
            let expected = area.probability / total;
            let observed = hits[area.id.index()] as f64 / TRIALS as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "{}: observed {observed:.4}, expected {expected:.4}",
                area.id
            );
        }
    }

    proptest! {
        #[test]
        fn prop_refresh_stays_in_bounds(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ProbabilityField::new();
            field.refresh(&mut rng);

            for area in field.areas() {
                prop_assert!((MIN_PROBABILITY..=MAX_PROBABILITY).contains(&area.probability));
                prop_assert_eq!(area.odds, odds_for(area.probability));
                prop_assert_eq!(area.odds, round_tenth((1.0 / area.probability) * HOUSE_EDGE));
                prop_assert!((3.6..=18.0).contains(&area.odds));
            }

            let total = field.total_probability();
            prop_assert!((0.8 - 1e-9..=4.0 + 1e-9).contains(&total));
        }

        #[test]
        fn prop_strike_always_lands_on_grid(seed in any::<u64>(), roll in 0.0f64..1.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ProbabilityField::new();
            field.refresh(&mut rng);
            let struck = field.strike(roll);
            prop_assert!(struck.index() < AREA_COUNT);
        }
    }
}
