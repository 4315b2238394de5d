//! Statistics calculation engine.
//!
//! Derives competitive insight from fetched upstream data:
//! - Joining rank-history entries with full match details
//! - Overall, per-agent and per-map rollups
//! - Leaderboard position search with a neighbour window

pub mod aggregate;
pub mod joiner;
pub mod leaderboard;

pub use aggregate::*;
pub use joiner::*;
pub use leaderboard::*;

use serde::Serialize;

/// Result of a competitive match as seen through its RR change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Win,
    Loss,
    /// RR did not move (draw, or a match with no rating effect)
    Unchanged,
}

impl MatchOutcome {
    pub fn from_mmr_change(change: i64) -> Self {
        match change {
            c if c > 0 => MatchOutcome::Win,
            c if c < 0 => MatchOutcome::Loss,
            _ => MatchOutcome::Unchanged,
        }
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Kill/death ratio with deaths floored at 1.
pub fn kd_ratio(kills: i64, deaths: i64) -> f64 {
    round2(kills as f64 / deaths.max(1) as f64)
}

/// (kills + assists) / deaths with deaths floored at 1.
pub fn kda_ratio(kills: i64, deaths: i64, assists: i64) -> f64 {
    round2((kills + assists) as f64 / deaths.max(1) as f64)
}

/// `total / count`, or 0 when there is nothing to average.
pub fn average(total: i64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(total as f64 / count as f64)
    }
}

/// Percentage of `wins` over `count`, 0 when `count` is 0.
pub fn win_rate(wins: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(wins as f64 / count as f64 * 100.0)
    }
}
