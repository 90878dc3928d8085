//! # Swiss Pairing
//!
//! Standings, tie-breaks and next-round pairings for Swiss-system tournaments.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, tournaments, matches, standings)
//! - **storage**: Record stores (in-memory and JSONL) behind the `ResultStore` traits
//! - **engine**: Standings aggregation, opponent-strength tie-break, ranking and pairing
//! - **config**: Configuration loading and validation, including scoring weights

pub mod config;
pub mod engine;
pub mod models;
pub mod storage;

pub use models::*;
