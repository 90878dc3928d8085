//! Ranking: score descending, then opponent strength descending, then
//! enrollment order.

use std::cmp::Ordering;

use tracing::debug;

use super::strength::StrengthCalculator;
use super::{standings, EngineError};
use crate::config::ScoringConfig;
use crate::models::{PlayerId, Standing, TournamentId};
use crate::storage::ResultStore;

/// Whether two scores are tied for ranking purposes. Scores are already
/// rounded when computed, so a tie is exact equality.
pub fn scores_tied(a: f64, b: f64) -> bool {
    a.total_cmp(&b) == Ordering::Equal
}

/// Stable sort by score, highest first.
pub fn sort_by_score(standings: &mut [Standing]) {
    standings.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Reorder each band of equal scores by opponent strength, highest first.
///
/// Expects `standings` already sorted by score. This is an insertion sort: a
/// player moves up past every tied neighbour with strictly lower strength, so
/// a player can climb any distance within their band, never across it, and
/// equal strengths keep their existing order.
pub fn break_ties<F>(standings: &mut [Standing], mut strength: F) -> Result<(), EngineError>
where
    F: FnMut(PlayerId) -> Result<f64, EngineError>,
{
    for i in 1..standings.len() {
        let mut j = i;
        while j > 0 && scores_tied(standings[j].score, standings[j - 1].score) {
            let moving = strength(standings[j].player_id)?;
            let ahead = strength(standings[j - 1].player_id)?;
            if moving <= ahead {
                break;
            }
            standings.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

/// Compute and rank a tournament's standings.
pub fn rank<S>(
    store: &S,
    tournament: TournamentId,
    scoring: &ScoringConfig,
) -> Result<Vec<Standing>, EngineError>
where
    S: ResultStore + ?Sized,
{
    let mut standings = standings::compute(store, tournament, scoring)?;
    sort_by_score(&mut standings);

    let mut calculator = StrengthCalculator::new(store, tournament, &standings);
    break_ties(&mut standings, |player| calculator.strength(player))?;

    debug!(
        "Ranked {} players in tournament {}",
        standings.len(),
        tournament
    );
    Ok(standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WinLossRecord;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn standing(id: u64, wins: u32, draws: u32) -> Standing {
        Standing::new(
            PlayerId::new(id),
            WinLossRecord::new(wins, 0, draws),
            &ScoringConfig::default(),
        )
    }

    fn order(standings: &[Standing]) -> Vec<u64> {
        standings.iter().map(|s| s.player_id.get()).collect()
    }

    fn break_ties_with(standings: &mut [Standing], strengths: &[(u64, f64)]) {
        let table: HashMap<PlayerId, f64> = strengths
            .iter()
            .map(|&(id, s)| (PlayerId::new(id), s))
            .collect();
        break_ties(standings, |p| Ok(table.get(&p).copied().unwrap_or(0.0))).unwrap();
    }

    #[test]
    fn test_sort_by_score_is_stable() {
        let mut standings = vec![
            standing(1, 1, 0),
            standing(2, 2, 0),
            standing(3, 1, 0),
            standing(4, 0, 4),
        ];

        sort_by_score(&mut standings);

        // 2 wins and 4 draws both score 2.0; enrollment order holds.
        assert_eq!(order(&standings), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_break_ties_moves_more_than_one_position() {
        let mut standings = vec![standing(1, 2, 0), standing(2, 2, 0), standing(3, 2, 0)];

        break_ties_with(&mut standings, &[(1, 0.0), (2, 1.0), (3, 2.0)]);

        assert_eq!(order(&standings), vec![3, 2, 1]);
    }

    #[test]
    fn test_break_ties_never_crosses_score_bands() {
        let mut standings = vec![
            standing(1, 3, 0),
            standing(2, 2, 0),
            standing(3, 2, 0),
            standing(4, 1, 0),
        ];

        break_ties_with(&mut standings, &[(1, 0.0), (2, 1.0), (3, 5.0), (4, 9.0)]);

        assert_eq!(order(&standings), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_break_ties_keeps_order_on_equal_strength() {
        let mut standings = vec![standing(1, 1, 0), standing(2, 1, 0), standing(3, 1, 0)];

        break_ties_with(&mut standings, &[(1, 1.0), (2, 3.0), (3, 1.0)]);

        assert_eq!(order(&standings), vec![2, 1, 3]);
    }

    #[test]
    fn test_break_ties_no_inversions_left() {
        let mut standings: Vec<Standing> = (1..=8).map(|id| standing(id, 1, 0)).collect();
        let strengths = [
            (1, 2.0),
            (2, 7.0),
            (3, 1.0),
            (4, 7.0),
            (5, 3.5),
            (6, 0.0),
            (7, 9.0),
            (8, 3.5),
        ];

        break_ties_with(&mut standings, &strengths);

        assert_eq!(order(&standings), vec![7, 2, 4, 5, 8, 1, 3, 6]);
    }

    #[test]
    fn test_break_ties_propagates_errors() {
        let mut standings = vec![standing(1, 1, 0), standing(2, 1, 0)];

        let err = break_ties(&mut standings, |p| {
            Err(EngineError::NotFound(format!("player {}", p)))
        })
        .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_scores_tied_is_exact() {
        assert!(scores_tied(2.0, 2.0));
        assert!(!scores_tied(2.0, 2.5));
        assert!(!scores_tied(0.0, 6e-10));
    }

    #[test]
    fn test_close_scores_stay_in_separate_bands() {
        let raw = |id: u64, score: f64| Standing {
            player_id: PlayerId::new(id),
            record: WinLossRecord::default(),
            score,
        };
        let mut standings = vec![raw(1, 0.0), raw(2, 6e-10), raw(3, 1.2e-9)];

        sort_by_score(&mut standings);
        assert_eq!(order(&standings), vec![3, 2, 1]);

        // Strength would reverse the order if any two were tied.
        break_ties_with(&mut standings, &[(1, 9.0), (2, 5.0), (3, 0.0)]);
        assert_eq!(order(&standings), vec![3, 2, 1]);
    }
}
