//! Tournament and enrollment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PlayerId, TournamentId};

/// A tournament that players enroll in and play matches for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique identifier
    pub id: TournamentId,

    /// Tournament name (need not be unique)
    pub name: String,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn new(id: TournamentId, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
        }
    }
}

/// A player's entry into a tournament. At most one per (player, tournament).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub player_id: PlayerId,
    pub tournament_id: TournamentId,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(player_id: PlayerId, tournament_id: TournamentId) -> Self {
        Self {
            player_id,
            tournament_id,
            enrolled_at: Utc::now(),
        }
    }

    /// Check whether this enrollment is for the given pair.
    pub fn is_for(&self, player_id: PlayerId, tournament_id: TournamentId) -> bool {
        self.player_id == player_id && self.tournament_id == tournament_id
    }
}
