//! Durable record store on top of JSONL files.
//!
//! The files under `<data_dir>/records/` are the source of truth. Every call
//! loads a fresh snapshot, so nothing is cached between calls. Inserts append
//! the new rows; a tournament deletion rewrites every file. The ID marks live
//! in `sequences.jsonl` as a single row, rewritten before each insert.

use tracing::info;

use super::jsonl::{EntityType, JsonlReader, JsonlWriter};
use super::memory::MemoryStore;
use super::store::{ResultStore, TournamentStore};
use super::{StorageConfig, StorageError};
use crate::models::{
    Enrollment, Match, MatchId, MatchResult, Player, PlayerId, Sequences, Tournament,
    TournamentId,
};

/// Record store backed by one JSONL file per entity type.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    config: StorageConfig,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Load every record file into memory.
    pub fn snapshot(&self) -> Result<MemoryStore, StorageError> {
        Ok(MemoryStore {
            players: self.reader(EntityType::Player).read_all()?,
            tournaments: self.reader(EntityType::Tournament).read_all()?,
            enrollments: self.reader(EntityType::Enrollment).read_all()?,
            matches: self.reader(EntityType::Match).read_all()?,
            results: self.reader(EntityType::Result).read_all()?,
            sequences: self
                .reader::<Sequences>(EntityType::Sequence)
                .read_all()?
                .pop()
                .unwrap_or_default(),
        })
    }

    fn save_sequences(&self, snapshot: &MemoryStore) -> Result<(), StorageError> {
        self.writer::<Sequences>(EntityType::Sequence)
            .write_all(&[snapshot.sequences])?;
        Ok(())
    }

    fn reader<T: serde::de::DeserializeOwned>(&self, entity: EntityType) -> JsonlReader<T> {
        JsonlReader::for_entity(&self.config, entity)
    }

    fn writer<T: serde::Serialize>(&self, entity: EntityType) -> JsonlWriter<T> {
        JsonlWriter::for_entity(&self.config, entity)
    }
}

impl ResultStore for JsonlStore {
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError> {
        let tournaments: Vec<Tournament> = self.reader(EntityType::Tournament).read_all()?;
        Ok(tournaments.into_iter().find(|t| t.id == id))
    }

    fn enrolled_players(&self, tournament: TournamentId) -> Result<Vec<PlayerId>, StorageError> {
        self.snapshot()?.enrolled_players(tournament)
    }

    fn results(&self, tournament: TournamentId) -> Result<Vec<MatchResult>, StorageError> {
        self.snapshot()?.results(tournament)
    }

    fn player_name(&self, player: PlayerId) -> Result<Option<String>, StorageError> {
        let players: Vec<Player> = self.reader(EntityType::Player).read_all()?;
        Ok(players.into_iter().find(|p| p.id == player).map(|p| p.name))
    }
}

impl TournamentStore for JsonlStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StorageError> {
        let mut snapshot = self.snapshot()?;
        let id = snapshot.register_player(name)?;
        self.save_sequences(&snapshot)?;
        if let Some(player) = snapshot.player(id) {
            self.writer::<Player>(EntityType::Player).append(player)?;
        }
        Ok(id)
    }

    fn register_tournament(&mut self, name: &str) -> Result<TournamentId, StorageError> {
        let mut snapshot = self.snapshot()?;
        let id = snapshot.register_tournament(name)?;
        self.save_sequences(&snapshot)?;
        if let Some(tournament) = snapshot.tournaments.iter().find(|t| t.id == id) {
            self.writer::<Tournament>(EntityType::Tournament)
                .append(tournament)?;
        }
        Ok(id)
    }

    fn enroll(&mut self, player: PlayerId, tournament: TournamentId) -> Result<(), StorageError> {
        let mut snapshot = self.snapshot()?;
        snapshot.enroll(player, tournament)?;
        if let Some(enrollment) = snapshot
            .enrollments
            .iter()
            .find(|e| e.is_for(player, tournament))
        {
            self.writer::<Enrollment>(EntityType::Enrollment)
                .append(enrollment)?;
        }
        Ok(())
    }

    fn report_match(
        &mut self,
        tournament: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
        draw: bool,
    ) -> Result<MatchId, StorageError> {
        let mut snapshot = self.snapshot()?;
        let id = snapshot.report_match(tournament, winner, loser, draw)?;

        let matches: Vec<Match> = snapshot
            .matches
            .iter()
            .filter(|m| m.id == id)
            .cloned()
            .collect();
        let results: Vec<MatchResult> = snapshot
            .results
            .iter()
            .filter(|r| r.match_id == id)
            .cloned()
            .collect();

        self.save_sequences(&snapshot)?;
        // The match row goes first so a result never references a missing match.
        self.writer::<Match>(EntityType::Match)
            .append_batch(&matches)?;
        self.writer::<MatchResult>(EntityType::Result)
            .append_batch(&results)?;

        info!("Recorded match {} in tournament {}", id, tournament);
        Ok(id)
    }

    fn delete_tournament(&mut self, tournament: TournamentId) -> Result<(), StorageError> {
        let mut snapshot = self.snapshot()?;
        snapshot.delete_tournament(tournament)?;

        // Dependents first, the tournament itself last.
        self.writer::<MatchResult>(EntityType::Result)
            .write_all(&snapshot.results)?;
        self.writer::<Match>(EntityType::Match)
            .write_all(&snapshot.matches)?;
        self.writer::<Enrollment>(EntityType::Enrollment)
            .write_all(&snapshot.enrollments)?;
        self.writer::<Tournament>(EntityType::Tournament)
            .write_all(&snapshot.tournaments)?;
        self.save_sequences(&snapshot)?;

        info!("Deleted tournament {} and its records", tournament);
        Ok(())
    }
}
