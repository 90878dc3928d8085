//! Pairing model: two players assigned to meet in the next round.

use serde::{Deserialize, Serialize};

use super::{PlayerId, RankedStanding};

/// A proposed match for the next round. Not persisted; the caller reports the
/// eventual outcome as a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player_a_id: PlayerId,
    pub player_a_name: String,
    pub player_b_id: PlayerId,
    pub player_b_name: String,
}

impl Pairing {
    /// Pair two ranked players, higher-ranked first.
    pub fn between(a: &RankedStanding, b: &RankedStanding) -> Self {
        Self {
            player_a_id: a.player_id,
            player_a_name: a.name.clone(),
            player_b_id: b.player_id,
            player_b_name: b.name.clone(),
        }
    }

    /// Check whether this pairing is between the two given players, in either order.
    #[cfg(test)]
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player_a_id == a && self.player_b_id == b)
            || (self.player_a_id == b && self.player_b_id == a)
    }
}
