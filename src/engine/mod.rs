//! Ranking and pairing engine.
//!
//! Everything here is a pure read-then-compute pass over a `ResultStore`:
//! standings are re-derived from result rows on every call, and nothing is
//! written back or cached between calls.
//!
//! - `standings`: result rows to per-player standings
//! - `strength`: opponent-strength tie-break metric
//! - `ranking`: score order with the tie-break applied
//! - `pairing`: rematch-free Swiss pairing over the ranked list

pub mod pairing;
pub mod ranking;
pub mod standings;
pub mod strength;

use thiserror::Error;
use tracing::info;

use crate::config::ScoringConfig;
use crate::models::{Pairing, PlayerId, RankedStanding, TournamentId};
use crate::storage::{ResultStore, StorageError};

/// Errors returned by ranking and pairing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot pair an odd number of players ({0}); byes are not supported")]
    OddPlayerCount(usize),

    #[error("No opponent left for player {player} ({name}) without a rematch")]
    PairingExhausted { player: PlayerId, name: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnknownTournament(id) => EngineError::NotFound(format!("tournament {}", id)),
            StorageError::UnknownPlayer(id) => EngineError::NotFound(format!("player {}", id)),
            other => EngineError::StoreUnavailable(other),
        }
    }
}

/// Ranks standings and generates pairings for tournaments in a store.
pub struct SwissEngine<'a, S: ?Sized> {
    store: &'a S,
    scoring: ScoringConfig,
}

impl<'a, S> SwissEngine<'a, S>
where
    S: ResultStore + ?Sized,
{
    pub fn new(store: &'a S, scoring: ScoringConfig) -> Self {
        Self { store, scoring }
    }

    /// Standings ordered by score, then opponent strength, then enrollment.
    pub fn rank_standings(
        &self,
        tournament: TournamentId,
    ) -> Result<Vec<RankedStanding>, EngineError> {
        let ranked = ranking::rank(self.store, tournament, &self.scoring)?;

        let mut out = Vec::with_capacity(ranked.len());
        for standing in &ranked {
            let name = self
                .store
                .player_name(standing.player_id)?
                .ok_or_else(|| EngineError::NotFound(format!("player {}", standing.player_id)))?;
            out.push(RankedStanding::from_standing(standing, name));
        }

        info!("Ranked {} players in tournament {}", out.len(), tournament);
        Ok(out)
    }

    /// Opponent strength of one player: summed scores of everyone they have met.
    pub fn opponent_strength(
        &self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> Result<f64, EngineError> {
        let standings = standings::compute(self.store, tournament, &self.scoring)?;
        if !standings.iter().any(|s| s.player_id == player) {
            return Err(EngineError::NotFound(format!(
                "player {} in tournament {}",
                player, tournament
            )));
        }

        strength::StrengthCalculator::new(self.store, tournament, &standings).strength(player)
    }

    /// Pairings for the next round: everyone once, no rematches, each player
    /// as close to their rank as possible.
    pub fn generate_pairings(&self, tournament: TournamentId) -> Result<Vec<Pairing>, EngineError> {
        if self.store.tournament(tournament)?.is_none() {
            return Err(EngineError::NotFound(format!("tournament {}", tournament)));
        }

        let field = self.store.enrolled_players(tournament)?.len();
        if field % 2 != 0 {
            return Err(EngineError::OddPlayerCount(field));
        }

        let mut ranked = self.rank_standings(tournament)?;
        let pairings = pairing::pair_ranked(&mut ranked, |a, b| {
            Ok(self.store.has_played(a, b, tournament)?)
        })?;

        info!(
            "Generated {} pairings for tournament {}",
            pairings.len(),
            tournament
        );
        Ok(pairings)
    }
}
