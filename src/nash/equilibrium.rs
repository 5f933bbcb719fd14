//! Pure-strategy Nash equilibria.
//!
//! A cell is a pure equilibrium exactly when it is a best response for both
//! players, so the equilibrium set is the intersection of the two
//! best-response sets.

use log::debug;

use crate::nash::best_response::best_responses;
use crate::nash::grid::{CoordinateSet, PayoffGrid, Player};

/// Intersect two best-response sets.
pub fn intersect(p1_best: &CoordinateSet, p2_best: &CoordinateSet) -> CoordinateSet {
    p1_best.intersection(p2_best).copied().collect()
}

/// All pure-strategy Nash equilibria of `grid`, as `(col, row)` coordinates.
///
/// Ranges from empty (e.g. matching pennies) to every cell (constant
/// payoffs).
pub fn pure_nash(grid: &PayoffGrid) -> CoordinateSet {
    let p1 = best_responses(grid, Player::One);
    let p2 = best_responses(grid, Player::Two);
    let nash = intersect(&p1, &p2);
    debug!("pure nash search on {}x{}: {} equilibria", grid.rows(), grid.columns(), nash.len());
    nash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::grid::Coordinate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(rows: Vec<Vec<(f64, f64)>>) -> PayoffGrid {
        PayoffGrid::from_matrix(rows).unwrap()
    }

    fn set(coords: &[(usize, usize)]) -> CoordinateSet {
        coords.iter().map(|&(c, r)| Coordinate::new(c, r)).collect()
    }

    #[test]
    fn test_prisoners_dilemma() {
        let g = grid(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ]);
        assert_eq!(pure_nash(&g), set(&[(1, 1)]));
    }

    #[test]
    fn test_coordination_game() {
        let g = grid(vec![
            vec![(5.0, 5.0), (0.0, 0.0)],
            vec![(0.0, 0.0), (3.0, 3.0)],
        ]);
        assert_eq!(pure_nash(&g), set(&[(0, 0), (1, 1)]));
    }

    #[test]
    fn test_matching_pennies_has_none() {
        let g = grid(vec![
            vec![(1.0, -1.0), (-1.0, 1.0)],
            vec![(-1.0, 1.0), (1.0, -1.0)],
        ]);
        assert!(pure_nash(&g).is_empty());
    }

    #[test]
    fn test_constant_payoffs_make_every_cell_an_equilibrium() {
        let g = grid(vec![vec![(2.0, 2.0); 3]; 2]);
        assert_eq!(pure_nash(&g).len(), 6);
    }

    #[test]
    fn test_equals_intersection_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(42);
        for trial in 0..50 {
            let rows = 1 + trial % 5;
            let cols = 1 + (trial / 5) % 4;
            let mut g = PayoffGrid::new(rows, cols).unwrap();
            g.fill_random(-3, 3, &mut rng).unwrap();

            let nash = pure_nash(&g);
            let expected = intersect(
                &best_responses(&g, Player::One),
                &best_responses(&g, Player::Two),
            );
            assert_eq!(nash, expected);
            assert_eq!(pure_nash(&g), nash, "not idempotent");
            for c in &nash {
                assert!(c.col < cols && c.row < rows);
            }
        }
    }
}
