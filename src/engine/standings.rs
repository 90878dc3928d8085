//! Standings aggregation: recorded results to one standing per enrolled player.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::EngineError;
use crate::config::ScoringConfig;
use crate::models::{MatchResult, PlayerId, Standing, TournamentId, WinLossRecord};
use crate::storage::ResultStore;

/// Fold result rows into standings, one per enrolled player in enrollment order.
///
/// Players without results get an all-zero standing. Rows for players that are
/// not enrolled are ignored.
pub fn aggregate(
    enrolled: &[PlayerId],
    results: &[MatchResult],
    scoring: &ScoringConfig,
) -> Vec<Standing> {
    let mut records: HashMap<PlayerId, WinLossRecord> = enrolled
        .iter()
        .map(|&player| (player, WinLossRecord::default()))
        .collect();

    for result in results {
        match records.get_mut(&result.player_id) {
            Some(record) => record.record(result.outcome),
            None => warn!(
                "Ignoring result for player {} who is not enrolled (match {})",
                result.player_id, result.match_id
            ),
        }
    }

    enrolled
        .iter()
        .map(|player| {
            let record = records.get(player).copied().unwrap_or_default();
            Standing::new(*player, record, scoring)
        })
        .collect()
}

/// Read a tournament's enrollments and results and aggregate them.
pub fn compute<S>(
    store: &S,
    tournament: TournamentId,
    scoring: &ScoringConfig,
) -> Result<Vec<Standing>, EngineError>
where
    S: ResultStore + ?Sized,
{
    if store.tournament(tournament)?.is_none() {
        return Err(EngineError::NotFound(format!("tournament {}", tournament)));
    }

    let enrolled = store.enrolled_players(tournament)?;
    let results = store.results(tournament)?;
    let standings = aggregate(&enrolled, &results, scoring);

    debug!(
        "Aggregated {} results into {} standings for tournament {}",
        results.len(),
        standings.len(),
        tournament
    );
    Ok(standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchId;

    fn ids(raw: &[u64]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId::new).collect()
    }

    fn report(results: &mut Vec<MatchResult>, winner: u64, loser: u64, draw: bool) {
        let match_id = MatchId::new(results.len() as u64 / 2 + 1);
        results.extend(MatchResult::pair_for(
            match_id,
            PlayerId::new(winner),
            PlayerId::new(loser),
            draw,
        ));
    }

    #[test]
    fn test_aggregate_counts_outcomes() {
        let enrolled = ids(&[1, 2, 3, 4]);
        let mut results = Vec::new();
        report(&mut results, 1, 2, true);
        report(&mut results, 3, 4, false);
        report(&mut results, 1, 3, false);

        let standings = aggregate(&enrolled, &results, &ScoringConfig::default());

        assert_eq!(standings[0].record, WinLossRecord::new(1, 0, 1));
        assert_eq!(standings[0].score, 1.5);
        assert_eq!(standings[2].record, WinLossRecord::new(1, 1, 0));
        assert_eq!(standings[3].score, 0.0);
    }

    #[test]
    fn test_aggregate_includes_players_without_matches() {
        let enrolled = ids(&[1, 2, 3]);
        let mut results = Vec::new();
        report(&mut results, 1, 2, false);

        let standings = aggregate(&enrolled, &results, &ScoringConfig::default());

        assert_eq!(standings.len(), 3);
        assert_eq!(standings[2].player_id, PlayerId::new(3));
        assert_eq!(standings[2].record.matches_played(), 0);
        assert_eq!(standings[2].score, 0.0);
    }

    #[test]
    fn test_aggregate_keeps_enrollment_order() {
        let enrolled = ids(&[5, 2, 9]);
        let standings = aggregate(&enrolled, &[], &ScoringConfig::default());

        let order: Vec<PlayerId> = standings.iter().map(|s| s.player_id).collect();
        assert_eq!(order, enrolled);
    }

    #[test]
    fn test_aggregate_ignores_unenrolled_players() {
        let enrolled = ids(&[1]);
        let mut results = Vec::new();
        report(&mut results, 1, 7, false);

        let standings = aggregate(&enrolled, &results, &ScoringConfig::default());
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].record.wins, 1);
    }

    #[test]
    fn test_wins_balance_losses_and_draws_are_even() {
        let enrolled = ids(&[1, 2, 3, 4, 5, 6]);
        let mut results = Vec::new();
        report(&mut results, 1, 2, true);
        report(&mut results, 3, 4, false);
        report(&mut results, 5, 6, false);
        report(&mut results, 3, 5, false);
        report(&mut results, 1, 4, false);
        report(&mut results, 2, 6, true);

        let standings = aggregate(&enrolled, &results, &ScoringConfig::default());
        let wins: u32 = standings.iter().map(|s| s.record.wins).sum();
        let losses: u32 = standings.iter().map(|s| s.record.losses).sum();
        let draws: u32 = standings.iter().map(|s| s.record.draws).sum();

        assert_eq!(wins, losses);
        assert_eq!(draws % 2, 0);
    }
}
