//! Best-response search.
//!
//! For each pure strategy of the opponent, a player's best responses are the
//! own strategies reaching the maximum payoff. Every tie is kept, compared
//! with exact equality:
//!
//! ```text
//! player 1, column j:  { (j, i) : u1(i, j) == max_k u1(k, j) }
//! player 2, row i:     { (j, i) : u2(i, j) == max_k u2(i, k) }
//! ```
//!
//! These functions are pure. Committing results into per-game state is done
//! by [`StrategicGame::find_best_responses`](crate::nash::game::StrategicGame::find_best_responses).

use log::debug;

use crate::nash::error::GameResult;
use crate::nash::expected::expected_payoff_one_sided;
use crate::nash::grid::{Coordinate, CoordinateSet, PayoffGrid, Player};

/// Cell coordinate for `player` playing `own` against the opponent's `other`.
fn coordinate_for(player: Player, own: usize, other: usize) -> Coordinate {
    match player {
        Player::One => Coordinate::new(other, own),
        Player::Two => Coordinate::new(own, other),
    }
}

/// All pure best responses of `player`, one scan per opponent strategy.
pub fn best_responses(grid: &PayoffGrid, player: Player) -> CoordinateSet {
    let own_count = grid.strategy_count(player);
    let other_count = grid.strategy_count(player.opponent());

    let mut found = CoordinateSet::new();
    let mut ties: Vec<usize> = Vec::with_capacity(own_count);

    for other in 0..other_count {
        let mut best = f64::NEG_INFINITY;
        ties.clear();

        for own in 0..own_count {
            let value = grid.utility_from(player, own, other);
            if ties.is_empty() || value > best {
                best = value;
                ties.clear();
                ties.push(own);
            } else if value == best {
                ties.push(own);
            }
        }

        found.extend(ties.iter().map(|&own| coordinate_for(player, own, other)));
    }

    debug!("{} best responses: {} cells", player, found.len());
    found
}

/// Labels of `player`'s pure strategies that are best responses to the
/// opponent's mixed strategy `opponent_beliefs`. Ties are kept.
///
/// # Errors
/// `DimensionMismatch` if the beliefs do not cover the opponent's strategies.
pub fn best_responses_to_mix(
    grid: &PayoffGrid,
    player: Player,
    opponent_beliefs: &[f64],
) -> GameResult<Vec<String>> {
    let expected = expected_payoff_one_sided(grid, player, opponent_beliefs)?;
    Ok(expected.best_labels())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(coords: &[(usize, usize)]) -> CoordinateSet {
        coords.iter().map(|&(c, r)| Coordinate::new(c, r)).collect()
    }

    fn grid(rows: Vec<Vec<(f64, f64)>>) -> PayoffGrid {
        PayoffGrid::from_matrix(rows).unwrap()
    }

    #[test]
    fn test_prisoners_dilemma_best_responses() {
        let g = grid(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ]);
        // Defect (row 1 / column 1) is always the best response
        assert_eq!(best_responses(&g, Player::One), set(&[(0, 1), (1, 1)]));
        assert_eq!(best_responses(&g, Player::Two), set(&[(1, 0), (1, 1)]));
    }

    #[test]
    fn test_ties_are_all_kept() {
        let g = grid(vec![
            vec![(4.0, 2.0), (1.0, 2.0), (0.0, 1.0)],
            vec![(4.0, 0.0), (3.0, 5.0), (0.0, 5.0)],
            vec![(2.0, 9.0), (3.0, 9.0), (0.0, 9.0)],
        ]);

        assert_eq!(
            best_responses(&g, Player::One),
            set(&[(0, 0), (0, 1), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)])
        );
        assert_eq!(
            best_responses(&g, Player::Two),
            set(&[(0, 0), (1, 0), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)])
        );
    }

    #[test]
    fn test_exact_equality_no_epsilon() {
        let g = grid(vec![vec![(1.0, 0.0)], vec![(1.0 + 1e-12, 0.0)]]);
        assert_eq!(best_responses(&g, Player::One), set(&[(0, 1)]));
    }

    #[test]
    fn test_negative_payoffs() {
        let g = grid(vec![vec![(-5.0, -1.0), (-2.0, -3.0)]]);
        assert_eq!(best_responses(&g, Player::One), set(&[(0, 0), (1, 0)]));
        assert_eq!(best_responses(&g, Player::Two), set(&[(0, 0)]));
    }

    #[test]
    fn test_coordinates_within_bounds() {
        let g = grid(vec![
            vec![(1.0, 6.0), (2.0, 5.0)],
            vec![(3.0, 4.0), (4.0, 3.0)],
            vec![(5.0, 2.0), (6.0, 1.0)],
        ]);
        for player in Player::BOTH {
            for coord in best_responses(&g, player) {
                assert!(coord.col < g.columns());
                assert!(coord.row < g.rows());
            }
        }
    }

    #[test]
    fn test_empty_grid() {
        let g = PayoffGrid::from_matrix(Vec::<Vec<(f64, f64)>>::new()).unwrap();
        assert!(best_responses(&g, Player::One).is_empty());
    }

    #[test]
    fn test_best_responses_to_mix() {
        let g = grid(vec![
            vec![(2.0, 0.0), (0.0, 2.0)],
            vec![(0.0, 2.0), (2.0, 0.0)],
        ]);
        // Against an even mix player 1 is indifferent between A1 and A2
        assert_eq!(best_responses_to_mix(&g, Player::One, &[0.5, 0.5]).unwrap(), vec!["A1", "A2"]);
        assert_eq!(best_responses_to_mix(&g, Player::One, &[0.9, 0.1]).unwrap(), vec!["A1"]);
        assert_eq!(best_responses_to_mix(&g, Player::Two, &[0.0, 1.0]).unwrap(), vec!["B1"]);
        assert!(best_responses_to_mix(&g, Player::Two, &[1.0]).is_err());
    }
}
