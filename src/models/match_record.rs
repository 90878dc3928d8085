//! Match and per-player result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, TournamentId};

/// A completed match. Always owned by exactly one tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier
    pub id: MatchId,

    /// Tournament this match was played in
    pub tournament_id: TournamentId,

    /// When the outcome was reported
    pub reported_at: DateTime<Utc>,
}

impl Match {
    pub fn new(id: MatchId, tournament_id: TournamentId) -> Self {
        Self {
            id,
            tournament_id,
            reported_at: Utc::now(),
        }
    }
}

/// Outcome of a match from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// One player's result in one match.
///
/// A reported match always produces two rows sharing a `match_id`:
/// either {win, loss} or {draw, draw}. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub outcome: Outcome,
}

impl MatchResult {
    pub fn new(player_id: PlayerId, match_id: MatchId, outcome: Outcome) -> Self {
        Self {
            player_id,
            match_id,
            outcome,
        }
    }

    /// Build both result rows for a decisive or drawn match.
    pub fn pair_for(
        match_id: MatchId,
        winner: PlayerId,
        loser: PlayerId,
        draw: bool,
    ) -> [MatchResult; 2] {
        if draw {
            [
                MatchResult::new(winner, match_id, Outcome::Draw),
                MatchResult::new(loser, match_id, Outcome::Draw),
            ]
        } else {
            [
                MatchResult::new(winner, match_id, Outcome::Win),
                MatchResult::new(loser, match_id, Outcome::Loss),
            ]
        }
    }
}
