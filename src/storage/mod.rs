//! Record storage for players, tournaments, enrollments and results.
//!
//! - `store`: the collaborator traits the engine reads through
//! - `memory`: an in-process store, the reference implementation
//! - `file`: the durable store, one JSONL file per entity type
//! - `jsonl`: the JSON Lines reader/writer underneath `file`

pub mod file;
pub mod jsonl;
pub mod memory;
pub mod store;

pub use file::JsonlStore;
pub use memory::MemoryStore;
pub use store::{ResultStore, TournamentStore};

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{PlayerId, TournamentId};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt record at {path:?} line {line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown tournament: {0}")]
    UnknownTournament(TournamentId),

    #[error("Player {player} is already enrolled in tournament {tournament}")]
    AlreadyEnrolled {
        player: PlayerId,
        tournament: TournamentId,
    },

    #[error("Player {player} is not enrolled in tournament {tournament}")]
    NotEnrolled {
        player: PlayerId,
        tournament: TournamentId,
    },

    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join("records")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.records_dir(), PathBuf::from("/data/records"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_error_messages_name_ids() {
        let err = StorageError::AlreadyEnrolled {
            player: PlayerId::new(2),
            tournament: TournamentId::new(5),
        };
        assert_eq!(
            err.to_string(),
            "Player 2 is already enrolled in tournament 5"
        );
    }
}
