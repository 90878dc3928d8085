//! Opponent strength: the summed score of every distinct opponent a player
//! has faced. Only ever used to order players with equal scores.

use std::collections::HashMap;

use super::EngineError;
use crate::models::{PlayerId, Standing, TournamentId};
use crate::storage::ResultStore;

/// Sum the scores of `opponents`. Players without a standing count as zero.
pub fn sum_scores(opponents: &[PlayerId], scores: &HashMap<PlayerId, f64>) -> f64 {
    opponents
        .iter()
        .map(|opponent| scores.get(opponent).copied().unwrap_or(0.0))
        .sum()
}

/// Opponent-strength lookups for one ranking pass.
///
/// Each player's strength is read from the store at most once per calculator;
/// nothing outlives the calculator.
pub struct StrengthCalculator<'a, S: ?Sized> {
    store: &'a S,
    tournament: TournamentId,
    scores: HashMap<PlayerId, f64>,
    memo: HashMap<PlayerId, f64>,
}

impl<'a, S> StrengthCalculator<'a, S>
where
    S: ResultStore + ?Sized,
{
    pub fn new(store: &'a S, tournament: TournamentId, standings: &[Standing]) -> Self {
        Self {
            store,
            tournament,
            scores: standings.iter().map(|s| (s.player_id, s.score)).collect(),
            memo: HashMap::new(),
        }
    }

    /// Opponent strength of `player`; zero if they have not played yet.
    pub fn strength(&mut self, player: PlayerId) -> Result<f64, EngineError> {
        if let Some(&cached) = self.memo.get(&player) {
            return Ok(cached);
        }

        let opponents = self.store.opponents(player, self.tournament)?;
        let strength = sum_scores(&opponents, &self.scores);
        self.memo.insert(player, strength);
        Ok(strength)
    }
}
