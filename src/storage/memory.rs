//! In-process record store.
//!
//! Holds every table in memory. Used directly in tests, and as the working
//! snapshot behind the JSONL store.

use tracing::debug;

use super::store::{ResultStore, TournamentStore};
use super::StorageError;
use crate::models::{
    Enrollment, Match, MatchId, MatchResult, Player, PlayerId, Sequences, Tournament, TournamentId,
};

/// All tournament records, held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub(crate) players: Vec<Player>,
    pub(crate) tournaments: Vec<Tournament>,
    pub(crate) enrollments: Vec<Enrollment>,
    pub(crate) matches: Vec<Match>,
    pub(crate) results: Vec<MatchResult>,
    pub(crate) sequences: Sequences,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    fn require_tournament(&self, id: TournamentId) -> Result<(), StorageError> {
        if self.tournaments.iter().any(|t| t.id == id) {
            Ok(())
        } else {
            Err(StorageError::UnknownTournament(id))
        }
    }

    fn require_player(&self, id: PlayerId) -> Result<(), StorageError> {
        if self.player(id).is_some() {
            Ok(())
        } else {
            Err(StorageError::UnknownPlayer(id))
        }
    }

    fn is_enrolled(&self, player: PlayerId, tournament: TournamentId) -> bool {
        self.enrollments.iter().any(|e| e.is_for(player, tournament))
    }

    fn require_enrolled(
        &self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> Result<(), StorageError> {
        self.require_player(player)?;
        if self.is_enrolled(player, tournament) {
            Ok(())
        } else {
            Err(StorageError::NotEnrolled { player, tournament })
        }
    }

    fn tournament_of(&self, match_id: MatchId) -> Option<TournamentId> {
        self.matches
            .iter()
            .find(|m| m.id == match_id)
            .map(|m| m.tournament_id)
    }
}

impl ResultStore for MemoryStore {
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError> {
        Ok(self.tournaments.iter().find(|t| t.id == id).cloned())
    }

    fn enrolled_players(&self, tournament: TournamentId) -> Result<Vec<PlayerId>, StorageError> {
        self.require_tournament(tournament)?;
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.tournament_id == tournament)
            .map(|e| e.player_id)
            .collect())
    }

    fn results(&self, tournament: TournamentId) -> Result<Vec<MatchResult>, StorageError> {
        self.require_tournament(tournament)?;
        Ok(self
            .results
            .iter()
            .filter(|r| self.tournament_of(r.match_id) == Some(tournament))
            .cloned()
            .collect())
    }

    fn player_name(&self, player: PlayerId) -> Result<Option<String>, StorageError> {
        Ok(self.player(player).map(|p| p.name.clone()))
    }
}

impl TournamentStore for MemoryStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StorageError> {
        let id = self.sequences.players.next(self.players.iter().map(|p| p.id));
        self.players.push(Player::new(id, name.to_string()));
        debug!("Registered player {} ({})", id, name);
        Ok(id)
    }

    fn register_tournament(&mut self, name: &str) -> Result<TournamentId, StorageError> {
        let id = self
            .sequences
            .tournaments
            .next(self.tournaments.iter().map(|t| t.id));
        self.tournaments.push(Tournament::new(id, name.to_string()));
        debug!("Registered tournament {} ({})", id, name);
        Ok(id)
    }

    fn enroll(&mut self, player: PlayerId, tournament: TournamentId) -> Result<(), StorageError> {
        self.require_player(player)?;
        self.require_tournament(tournament)?;
        if self.is_enrolled(player, tournament) {
            return Err(StorageError::AlreadyEnrolled { player, tournament });
        }

        self.enrollments.push(Enrollment::new(player, tournament));
        debug!("Enrolled player {} in tournament {}", player, tournament);
        Ok(())
    }

    fn report_match(
        &mut self,
        tournament: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
        draw: bool,
    ) -> Result<MatchId, StorageError> {
        self.require_tournament(tournament)?;
        if winner == loser {
            return Err(StorageError::SelfMatch(winner));
        }
        self.require_enrolled(winner, tournament)?;
        self.require_enrolled(loser, tournament)?;

        let id = self.sequences.matches.next(self.matches.iter().map(|m| m.id));
        self.matches.push(Match::new(id, tournament));
        self.results
            .extend(MatchResult::pair_for(id, winner, loser, draw));

        debug!(
            "Reported match {} in tournament {}: {} vs {}{}",
            id,
            tournament,
            winner,
            loser,
            if draw { " (draw)" } else { "" }
        );
        Ok(id)
    }

    fn delete_tournament(&mut self, tournament: TournamentId) -> Result<(), StorageError> {
        self.require_tournament(tournament)?;

        let doomed: Vec<MatchId> = self
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament)
            .map(|m| m.id)
            .collect();

        // Keep the deleted IDs reserved.
        self.sequences.tournaments.cover(tournament);
        for &id in &doomed {
            self.sequences.matches.cover(id);
        }

        self.results.retain(|r| !doomed.contains(&r.match_id));
        self.matches.retain(|m| m.tournament_id != tournament);
        self.enrollments.retain(|e| e.tournament_id != tournament);
        self.tournaments.retain(|t| t.id != tournament);

        debug!(
            "Deleted tournament {} with {} matches",
            tournament,
            doomed.len()
        );
        Ok(())
    }
}
