//! Core data models for Swiss tournaments.

mod ids;
mod match_record;
mod pairing;
mod player;
mod standing;
mod tournament;

pub use ids::*;
pub use match_record::*;
pub use pairing::*;
pub use player::*;
pub use standing::*;
pub use tournament::*;
