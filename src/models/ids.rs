//! Sequential entity IDs assigned by the record store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric entity ID, unique within its entity type.
///
/// IDs start at 1 and are handed out in registration order, so comparing two
/// IDs of the same type also compares when they were created.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an EntityId from a raw number.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The ID following the highest of `existing`, or 1 when there are none.
    pub fn next_after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        let max = existing.into_iter().map(|id| id.0).max().unwrap_or(0);
        Self(max + 1)
    }

    /// Get the raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// High-water mark for one entity type.
///
/// Deleting rows never lowers the mark, so an ID is never handed out twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdSequence(u64);

impl IdSequence {
    /// Hand out the ID after both the mark and the highest of `existing`.
    pub fn next<I>(&mut self, existing: I) -> EntityId
    where
        I: IntoIterator<Item = EntityId>,
    {
        let mark = std::iter::once(EntityId(self.0));
        let id = EntityId::next_after(existing.into_iter().chain(mark));
        self.0 = id.0;
        id
    }

    /// Raise the mark to at least `id`.
    pub fn cover(&mut self, id: EntityId) {
        self.0 = self.0.max(id.0);
    }

    /// The highest ID handed out so far, 0 when none.
    pub fn last(&self) -> u64 {
        self.0
    }
}

/// Per-type ID marks for a record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sequences {
    pub players: IdSequence,
    pub tournaments: IdSequence,
    pub matches: IdSequence,
}

/// Type alias for player IDs
pub type PlayerId = EntityId;

/// Type alias for tournament IDs
pub type TournamentId = EntityId;

/// Type alias for match IDs
pub type MatchId = EntityId;
