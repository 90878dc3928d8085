//! Standing models: a player's derived record within a tournament.

use serde::{Deserialize, Serialize};

use super::{Outcome, PlayerId};
use crate::config::ScoringConfig;

const SCORE_SCALE: f64 = 1e9;

/// Win/loss/draw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl WinLossRecord {
    /// Create a new record.
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            wins,
            losses,
            draws,
        }
    }

    /// Count one more outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Total matches played.
    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Weighted score. Losses are worth nothing.
    ///
    /// Rounded to 9 decimal places, so records worth the same points compare
    /// exactly equal whatever order the weights were summed in.
    pub fn score(&self, scoring: &ScoringConfig) -> f64 {
        let raw = self.wins as f64 * scoring.win_points + self.draws as f64 * scoring.draw_points;
        (raw * SCORE_SCALE).round() / SCORE_SCALE
    }
}

/// A player's standing in one tournament. Derived from results, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub record: WinLossRecord,
    pub score: f64,
}

impl Standing {
    pub fn new(player_id: PlayerId, record: WinLossRecord, scoring: &ScoringConfig) -> Self {
        Self {
            player_id,
            record,
            score: record.score(scoring),
        }
    }
}

/// A standing as reported to callers, with the player's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
    pub score: f64,
}

impl RankedStanding {
    pub fn from_standing(standing: &Standing, name: String) -> Self {
        Self {
            player_id: standing.player_id,
            name,
            wins: standing.record.wins,
            losses: standing.record.losses,
            draws: standing.record.draws,
            matches_played: standing.record.matches_played(),
            score: standing.score,
        }
    }
}
