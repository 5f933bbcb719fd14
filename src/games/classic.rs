//! Classic 2x2 games with known equilibria.
//!
//! | Game | Pure equilibria | Mixed equilibrium |
//! |------|-----------------|-------------------|
//! | Prisoner's dilemma | mutual defection `(A2, B2)` | none (dominance) |
//! | Coordination | both diagonal cells | `p = b / (a + b)` |
//! | Battle of the sexes | both diagonal cells | `p = a / (a + b)`, `q = b / (a + b)` |
//! | Zero-sum | depends on values | depends on values |
//!
//! Each factory validates its parameters and fails with
//! [`GameError::Validation`] when they do not describe the named game.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::nash::error::{GameError, GameResult};
use crate::nash::game::StrategicGame;

/// Inclusive bound for random zero-sum payoffs.
pub const ZERO_SUM_LIMIT: i64 = 5;

/// Prisoner's dilemma: temptation `t`, reward `r`, punishment `p`, sucker `s`.
///
/// Requires `t > r > p > s` and `2r > t + s`.
pub fn prisoners_dilemma(t: f64, r: f64, p: f64, s: f64) -> GameResult<StrategicGame> {
    if !(t > r && r > p && p > s) {
        return Err(GameError::Validation(format!(
            "prisoner's dilemma requires t > r > p > s, got t={}, r={}, p={}, s={}",
            t, r, p, s
        )));
    }
    if 2.0 * r <= t + s {
        return Err(GameError::Validation(format!(
            "prisoner's dilemma requires 2r > t + s, got 2*{} <= {} + {}",
            r, t, s
        )));
    }
    StrategicGame::from_matrix(vec![vec![(r, r), (s, t)], vec![(t, s), (p, p)]])
}

/// Pure coordination: both players prefer matching, `a` on `(A1, B1)` and
/// `b` on `(A2, B2)`.
pub fn coordination(a: f64, b: f64) -> GameResult<StrategicGame> {
    if !(a > 0.0 && b > 0.0) {
        return Err(GameError::Validation(format!(
            "coordination payoffs must be positive, got a={}, b={}",
            a, b
        )));
    }
    StrategicGame::from_matrix(vec![vec![(a, a), (0.0, 0.0)], vec![(0.0, 0.0), (b, b)]])
}

/// Battle of the sexes: player 1 prefers `(A1, B1)`, player 2 prefers
/// `(A2, B2)`, and miscoordination pays nothing.
pub fn battle_of_sexes(a: f64, b: f64) -> GameResult<StrategicGame> {
    if !(a > b && b > 0.0) {
        return Err(GameError::Validation(format!(
            "battle of the sexes requires a > b > 0, got a={}, b={}",
            a, b
        )));
    }
    StrategicGame::from_matrix(vec![vec![(a, b), (0.0, 0.0)], vec![(0.0, 0.0), (b, a)]])
}

/// Zero-sum 2x2 game from player 1's payoffs in row-major order.
pub fn zero_sum(values: &[f64]) -> GameResult<StrategicGame> {
    if values.len() != 4 {
        return Err(GameError::Validation(format!(
            "zero-sum game needs exactly 4 payoffs, got {}",
            values.len()
        )));
    }
    StrategicGame::from_matrix(vec![
        vec![(values[0], -values[0]), (values[1], -values[1])],
        vec![(values[2], -values[2]), (values[3], -values[3])],
    ])
}

/// Zero-sum 2x2 game with integer payoffs drawn from
/// `[-ZERO_SUM_LIMIT, ZERO_SUM_LIMIT]`.
pub fn random_zero_sum<R: Rng + ?Sized>(rng: &mut R) -> GameResult<StrategicGame> {
    let values: Vec<f64> = (0..4)
        .map(|_| rng.gen_range(-ZERO_SUM_LIMIT..=ZERO_SUM_LIMIT) as f64)
        .collect();
    zero_sum(&values)
}

/// A classic game with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassicGame {
    /// See [`prisoners_dilemma`].
    PrisonersDilemma {
        /// Temptation
        t: f64,
        /// Reward
        r: f64,
        /// Punishment
        p: f64,
        /// Sucker
        s: f64,
    },
    /// See [`coordination`].
    Coordination {
        /// Payoff on `(A1, B1)`
        a: f64,
        /// Payoff on `(A2, B2)`
        b: f64,
    },
    /// See [`battle_of_sexes`].
    BattleOfSexes {
        /// Preferred outcome payoff
        a: f64,
        /// Compromise payoff
        b: f64,
    },
    /// See [`zero_sum`]; `None` draws random values.
    ZeroSum(Option<Vec<f64>>),
}

impl ClassicGame {
    /// Prisoner's dilemma with `(t, r, p, s) = (5, 3, 1, 0)`.
    pub fn prisoners_dilemma() -> Self {
        ClassicGame::PrisonersDilemma { t: 5.0, r: 3.0, p: 1.0, s: 0.0 }
    }

    /// Coordination with `(a, b) = (5, 3)`.
    pub fn coordination() -> Self {
        ClassicGame::Coordination { a: 5.0, b: 3.0 }
    }

    /// Battle of the sexes with `(a, b) = (3, 2)`.
    pub fn battle_of_sexes() -> Self {
        ClassicGame::BattleOfSexes { a: 3.0, b: 2.0 }
    }

    /// All four games with canonical parameters.
    pub fn canonical() -> Vec<Self> {
        vec![
            Self::prisoners_dilemma(),
            Self::coordination(),
            Self::battle_of_sexes(),
            ClassicGame::ZeroSum(None),
        ]
    }

    /// Build the game, drawing from `rng` only for a random zero-sum game.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> GameResult<StrategicGame> {
        match self {
            ClassicGame::PrisonersDilemma { t, r, p, s } => prisoners_dilemma(*t, *r, *p, *s),
            ClassicGame::Coordination { a, b } => coordination(*a, *b),
            ClassicGame::BattleOfSexes { a, b } => battle_of_sexes(*a, *b),
            ClassicGame::ZeroSum(Some(values)) => zero_sum(values),
            ClassicGame::ZeroSum(None) => random_zero_sum(rng),
        }
    }
}

impl fmt::Display for ClassicGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassicGame::PrisonersDilemma { .. } => write!(f, "Prisoner's Dilemma"),
            ClassicGame::Coordination { .. } => write!(f, "Coordination Game"),
            ClassicGame::BattleOfSexes { .. } => write!(f, "Battle of the Sexes"),
            ClassicGame::ZeroSum(_) => write!(f, "Zero-Sum Game"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::grid::{Coordinate, CoordinateSet, Payoff, Player};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn set(coords: &[(usize, usize)]) -> CoordinateSet {
        coords.iter().map(|&(c, r)| Coordinate::new(c, r)).collect()
    }

    #[test]
    fn test_prisoners_dilemma() {
        let game = ClassicGame::prisoners_dilemma().build(&mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(game.get_payoff(0, 1).unwrap(), Payoff(0.0, 5.0));
        assert_eq!(game.pure_nash(), set(&[(1, 1)]));
        assert!(game.is_dominant(1, Player::One, true).unwrap());
        assert!(game.is_dominant(1, Player::Two, true).unwrap());
    }

    #[test]
    fn test_prisoners_dilemma_validation() {
        assert!(matches!(prisoners_dilemma(3.0, 5.0, 1.0, 0.0), Err(GameError::Validation(_))));
        // t > r > p > s holds but alternating beats mutual cooperation
        assert!(matches!(prisoners_dilemma(10.0, 3.0, 1.0, 0.0), Err(GameError::Validation(_))));
        assert!(prisoners_dilemma(4.0, 3.0, 2.0, 1.0).is_ok());
    }

    #[test]
    fn test_coordination() {
        let game = coordination(5.0, 3.0).unwrap();
        assert_eq!(game.pure_nash(), set(&[(0, 0), (1, 1)]));
        let mixed = game.get_mixed_equilibrium(false).unwrap();
        let (p1, _) = mixed.strategies().unwrap();
        assert_abs_diff_eq!(p1.probabilities()[0], 3.0 / 8.0, epsilon = 1e-12);

        assert!(coordination(0.0, 3.0).is_err());
        assert!(coordination(2.0, -1.0).is_err());
    }

    #[test]
    fn test_battle_of_sexes() {
        let game = battle_of_sexes(3.0, 2.0).unwrap();
        assert_eq!(game.pure_nash(), set(&[(0, 0), (1, 1)]));
        let mixed = game.get_mixed_equilibrium(false).unwrap();
        let (p1, p2) = mixed.strategies().unwrap();
        assert_abs_diff_eq!(p1.probabilities()[0], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(p2.probabilities()[0], 0.4, epsilon = 1e-12);

        assert!(battle_of_sexes(2.0, 3.0).is_err());
        assert!(battle_of_sexes(2.0, 2.0).is_err());
    }

    #[test]
    fn test_zero_sum() {
        let game = zero_sum(&[1.0, -1.0, -1.0, 1.0]).unwrap();
        for row in game.grid().matrix() {
            for p in row {
                assert_eq!(p.0 + p.1, 0.0);
            }
        }
        assert!(game.pure_nash().is_empty());
        assert!(matches!(zero_sum(&[1.0, 2.0, 3.0]), Err(GameError::Validation(_))));
    }

    #[test]
    fn test_random_zero_sum_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let game = random_zero_sum(&mut rng).unwrap();
            for row in game.grid().matrix() {
                for p in row {
                    assert!(p.0.abs() <= ZERO_SUM_LIMIT as f64);
                    assert_eq!(p.0, -p.1);
                }
            }
        }
    }

    #[test]
    fn test_canonical_games_build() {
        let mut rng = StdRng::seed_from_u64(11);
        let names: Vec<String> = ClassicGame::canonical().iter().map(|g| g.to_string()).collect();
        assert_eq!(names.len(), 4);
        for classic in ClassicGame::canonical() {
            let game = classic.build(&mut rng).unwrap();
            assert_eq!((game.rows(), game.columns()), (2, 2));
        }
    }
}
