//! Swiss pairing over a ranked list.

use super::EngineError;
use crate::models::{Pairing, PlayerId, RankedStanding};

/// Pair a ranked field top-down without rematches.
///
/// The highest unpaired player takes the nearest player below them they have
/// not met yet. That opponent is lifted into the slot directly below, shifting
/// the players they jumped down by one with their order kept, and the scan
/// moves on two places. There is no backtracking over earlier pairs, so a
/// field that could be paired another way can still end in `PairingExhausted`.
///
/// `ranked` is left in pairing order: pair `k` is positions `2k` and `2k + 1`.
pub fn pair_ranked<F>(
    ranked: &mut [RankedStanding],
    mut has_played: F,
) -> Result<Vec<Pairing>, EngineError>
where
    F: FnMut(PlayerId, PlayerId) -> Result<bool, EngineError>,
{
    if ranked.len() % 2 != 0 {
        return Err(EngineError::OddPlayerCount(ranked.len()));
    }

    let mut pairings = Vec::with_capacity(ranked.len() / 2);
    let mut i = 0;
    while i < ranked.len() {
        let top = ranked[i].player_id;

        let mut found = None;
        for j in (i + 1)..ranked.len() {
            if !has_played(top, ranked[j].player_id)? {
                found = Some(j);
                break;
            }
        }

        let j = found.ok_or_else(|| EngineError::PairingExhausted {
            player: top,
            name: ranked[i].name.clone(),
        })?;

        // Adjacent swaps up to i + 1; the players passed over keep their order.
        ranked[(i + 1)..=j].rotate_right(1);

        pairings.push(Pairing::between(&ranked[i], &ranked[i + 1]));
        i += 2;
    }

    Ok(pairings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field(ids: &[u64]) -> Vec<RankedStanding> {
        ids.iter()
            .map(|&id| RankedStanding {
                player_id: PlayerId::new(id),
                name: format!("P{}", id),
                wins: 0,
                losses: 0,
                draws: 0,
                matches_played: 0,
                score: 0.0,
            })
            .collect()
    }

    fn played(meetings: &[(u64, u64)]) -> impl Fn(PlayerId, PlayerId) -> Result<bool, EngineError> + '_ {
        move |a, b| {
            Ok(meetings.iter().any(|&(x, y)| {
                (PlayerId::new(x) == a && PlayerId::new(y) == b)
                    || (PlayerId::new(x) == b && PlayerId::new(y) == a)
            }))
        }
    }

    fn ids(pairings: &[Pairing]) -> Vec<(u64, u64)> {
        pairings
            .iter()
            .map(|p| (p.player_a_id.get(), p.player_b_id.get()))
            .collect()
    }

    #[test]
    fn test_pairs_adjacent_when_no_history() {
        let mut ranked = field(&[1, 2, 3, 4, 5, 6]);

        let pairings = pair_ranked(&mut ranked, played(&[])).unwrap();

        assert_eq!(ids(&pairings), vec![(1, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn test_skips_previous_opponent() {
        let mut ranked = field(&[1, 2, 3, 4]);

        let pairings = pair_ranked(&mut ranked, played(&[(1, 2)])).unwrap();

        assert_eq!(ids(&pairings), vec![(1, 3), (2, 4)]);
    }

    #[test]
    fn test_promotion_keeps_displaced_order() {
        let mut ranked = field(&[1, 2, 3, 4, 5, 6]);

        let pairings = pair_ranked(&mut ranked, played(&[(1, 2), (1, 3), (1, 4)])).unwrap();

        assert_eq!(ids(&pairings), vec![(1, 5), (2, 3), (4, 6)]);
        let order: Vec<u64> = ranked.iter().map(|s| s.player_id.get()).collect();
        assert_eq!(order, vec![1, 5, 2, 3, 4, 6]);
    }

    #[test]
    fn test_every_player_paired_once() {
        let mut ranked = field(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let pairings = pair_ranked(&mut ranked, played(&[(1, 2), (3, 4), (5, 6), (7, 8)])).unwrap();

        let mut seen: Vec<u64> = pairings
            .iter()
            .flat_map(|p| [p.player_a_id.get(), p.player_b_id.get()])
            .collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_odd_field_rejected_before_any_lookup() {
        let mut ranked = field(&[1, 2, 3]);

        let err = pair_ranked(&mut ranked, |_, _| panic!("no lookups expected")).unwrap_err();
        assert!(matches!(err, EngineError::OddPlayerCount(3)));
    }

    #[test]
    fn test_empty_field_pairs_to_nothing() {
        let mut ranked = field(&[]);
        assert!(pair_ranked(&mut ranked, played(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_exhausted_when_top_player_met_everyone() {
        let mut ranked = field(&[1, 2, 3, 4]);

        let err = pair_ranked(&mut ranked, played(&[(1, 2), (1, 3), (1, 4)])).unwrap_err();
        match err {
            EngineError::PairingExhausted { player, .. } => assert_eq!(player, PlayerId::new(1)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_backtracking_over_earlier_pairs() {
        // 1-3 is available, leaving 2-4 who have already met; 1-4 and 2-3
        // would have worked but earlier pairs are never revisited.
        let mut ranked = field(&[1, 2, 3, 4]);

        let err = pair_ranked(&mut ranked, played(&[(1, 2), (2, 4)])).unwrap_err();
        assert!(matches!(err, EngineError::PairingExhausted { player, .. } if player == PlayerId::new(2)));
    }
}
