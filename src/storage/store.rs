//! Store traits.
//!
//! `ResultStore` is everything the ranking and pairing engine reads.
//! `TournamentStore` adds the record-keeping writes: registration,
//! enrollment, reporting outcomes and cascading tournament deletion.

use std::collections::HashSet;

use super::StorageError;
use crate::models::{MatchId, MatchResult, PlayerId, Tournament, TournamentId};

/// Read access to tournament records.
pub trait ResultStore {
    /// Look up a tournament.
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError>;

    /// Players enrolled in a tournament, in enrollment order.
    ///
    /// Fails with `UnknownTournament` for an unknown id.
    fn enrolled_players(&self, tournament: TournamentId) -> Result<Vec<PlayerId>, StorageError>;

    /// Every result row belonging to a match of this tournament, in reporting order.
    ///
    /// Fails with `UnknownTournament` for an unknown id.
    fn results(&self, tournament: TournamentId) -> Result<Vec<MatchResult>, StorageError>;

    /// Display name of a player, if registered.
    fn player_name(&self, player: PlayerId) -> Result<Option<String>, StorageError>;

    /// Distinct opponents a player has faced in this tournament, in the order
    /// they were first met.
    fn opponents(
        &self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> Result<Vec<PlayerId>, StorageError> {
        Ok(opponents_in(&self.results(tournament)?, player))
    }

    /// Whether two players have already met in this tournament.
    fn has_played(
        &self,
        a: PlayerId,
        b: PlayerId,
        tournament: TournamentId,
    ) -> Result<bool, StorageError> {
        Ok(self.opponents(a, tournament)?.contains(&b))
    }
}

/// Record-keeping writes on top of `ResultStore`.
pub trait TournamentStore: ResultStore {
    /// Register a player and return the assigned ID.
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StorageError>;

    /// Register a tournament and return the assigned ID.
    fn register_tournament(&mut self, name: &str) -> Result<TournamentId, StorageError>;

    /// Enroll a registered player in a registered tournament, at most once.
    fn enroll(&mut self, player: PlayerId, tournament: TournamentId) -> Result<(), StorageError>;

    /// Record a completed match between two enrolled players.
    ///
    /// Creates the match and both result rows: {win, loss}, or {draw, draw}
    /// when `draw` is set (in which case `winner`/`loser` are just the two sides).
    fn report_match(
        &mut self,
        tournament: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
        draw: bool,
    ) -> Result<MatchId, StorageError>;

    /// Remove a tournament with its results, matches and enrollments.
    fn delete_tournament(&mut self, tournament: TournamentId) -> Result<(), StorageError>;

    /// Number of players enrolled in a tournament.
    fn count_players(&self, tournament: TournamentId) -> Result<usize, StorageError> {
        Ok(self.enrolled_players(tournament)?.len())
    }
}

/// Distinct opponents of `player` across `results`, in first-met order.
pub fn opponents_in(results: &[MatchResult], player: PlayerId) -> Vec<PlayerId> {
    let played: HashSet<MatchId> = results
        .iter()
        .filter(|r| r.player_id == player)
        .map(|r| r.match_id)
        .collect();

    let mut opponents = Vec::new();
    for result in results {
        if result.player_id != player
            && played.contains(&result.match_id)
            && !opponents.contains(&result.player_id)
        {
            opponents.push(result.player_id);
        }
    }
    opponents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(matches: &[(u64, u64, u64)]) -> Vec<MatchResult> {
        matches
            .iter()
            .flat_map(|&(m, w, l)| {
                MatchResult::pair_for(MatchId::new(m), PlayerId::new(w), PlayerId::new(l), false)
            })
            .collect()
    }

    #[test]
    fn test_opponents_in_first_met_order() {
        let results = rows(&[(1, 1, 2), (2, 3, 4), (3, 4, 1), (4, 1, 3)]);

        let opponents = opponents_in(&results, PlayerId::new(1));
        assert_eq!(
            opponents,
            vec![PlayerId::new(2), PlayerId::new(4), PlayerId::new(3)]
        );
    }

    #[test]
    fn test_opponents_in_is_distinct() {
        let results = rows(&[(1, 1, 2), (2, 2, 1)]);

        assert_eq!(opponents_in(&results, PlayerId::new(1)), vec![PlayerId::new(2)]);
    }

    #[test]
    fn test_opponents_in_no_matches() {
        let results = rows(&[(1, 1, 2)]);
        assert!(opponents_in(&results, PlayerId::new(9)).is_empty());
    }
}
