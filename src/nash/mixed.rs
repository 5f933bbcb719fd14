//! Mixed strategies and the closed-form 2x2 mixed equilibrium.
//!
//! For a 2x2 game each player mixes so that the *opponent* is indifferent
//! between their two pure strategies. With the opponent's payoffs at
//! `(row, col)` cells `x = (0,0)`, `y = (1,0)`, `z = (0,1)`, `w = (1,1)`:
//!
//! ```text
//! player 1 plays A1 with  p = (w - y) / (x - y + w - z)   (player 2's payoffs)
//! player 2 plays B1 with  q = (w - z) / (x - y + w - z)   (player 1's payoffs)
//! ```
//!
//! A zero denominator or a probability outside [0, 1] is an expected outcome
//! (usually a dominated strategy) and is reported as a [`MixedFailure`], not
//! an error.

use std::fmt;

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Exp1};
use serde::{Deserialize, Serialize};

use crate::nash::equilibrium::pure_nash;
use crate::nash::error::{GameError, GameResult};
use crate::nash::grid::{PayoffGrid, Player};

/// Default tolerance on the probability sum of a mixed strategy.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A probability distribution over one player's pure strategies.
///
/// Deserializes from a plain list and is validated with
/// [`DEFAULT_TOLERANCE`] on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MixedStrategy(Vec<f64>);

impl MixedStrategy {
    /// Validate `probabilities` with [`DEFAULT_TOLERANCE`].
    pub fn new(probabilities: Vec<f64>) -> GameResult<Self> {
        Self::with_tolerance(probabilities, DEFAULT_TOLERANCE)
    }

    /// Validate `probabilities`: each in [0, 1], summing to 1 within
    /// `tolerance`.
    pub fn with_tolerance(probabilities: Vec<f64>, tolerance: f64) -> GameResult<Self> {
        if probabilities.is_empty() {
            return Err(GameError::Validation(
                "mixed strategy must have at least one probability".to_string(),
            ));
        }
        if let Some(bad) = probabilities.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(GameError::Validation(format!(
                "all probabilities must be between 0 and 1, got {}",
                bad
            )));
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(GameError::Validation(format!(
                "strategy probabilities must sum to 1, got {}",
                sum
            )));
        }
        Ok(Self(probabilities))
    }

    /// All weight on strategy `index`.
    pub fn pure(len: usize, index: usize) -> GameResult<Self> {
        if index >= len {
            return Err(GameError::IndexOutOfRange { axis: "strategy", index, len });
        }
        let mut probabilities = vec![0.0; len];
        probabilities[index] = 1.0;
        Ok(Self(probabilities))
    }

    /// Equal weight on `len` strategies.
    pub fn uniform(len: usize) -> GameResult<Self> {
        Self::new(vec![1.0 / len as f64; len])
    }

    /// Draw a random strategy over `len` pure strategies.
    pub fn random<R: Rng + ?Sized>(len: usize, mode: BeliefSampling, rng: &mut R) -> GameResult<Self> {
        if len == 0 {
            return Err(GameError::Validation(
                "cannot sample a mixed strategy over zero strategies".to_string(),
            ));
        }
        let weights: Vec<f64> = match mode {
            // Normalized unit exponentials are a uniform draw from the simplex
            BeliefSampling::Dirichlet => (0..len).map(|_| Exp1.sample(rng)).collect(),
            BeliefSampling::Normalized => (0..len).map(|_| rng.gen::<f64>()).collect(),
        };
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Self::uniform(len);
        }
        Ok(Self(weights.into_iter().map(|w| w / total).collect()))
    }

    /// Build from probabilities already known to form a distribution.
    pub(crate) fn from_raw(probabilities: Vec<f64>) -> Self {
        Self(probabilities)
    }

    /// The probabilities, in strategy order.
    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    /// Number of strategies covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated strategy.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices played with positive probability.
    pub fn support(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Consume into the raw probability vector.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl TryFrom<Vec<f64>> for MixedStrategy {
    type Error = GameError;

    fn try_from(probabilities: Vec<f64>) -> GameResult<Self> {
        Self::new(probabilities)
    }
}

impl From<MixedStrategy> for Vec<f64> {
    fn from(strategy: MixedStrategy) -> Self {
        strategy.0
    }
}

impl AsRef<[f64]> for MixedStrategy {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// How [`MixedStrategy::random`] draws probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BeliefSampling {
    /// Uniform over the probability simplex (flat Dirichlet).
    #[default]
    Dirichlet,
    /// Independent uniform weights divided by their sum.
    Normalized,
}

/// Why a 2x2 mixed equilibrium could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixedFailure {
    /// A pure equilibrium exists, so mixing is unnecessary.
    PureEquilibriumExists,
    /// Indifference denominator is zero when deriving this player's mix.
    DegenerateDenominator(Player),
    /// Derived probability for this player falls outside [0, 1].
    NegativeProbability(Player),
}

impl MixedFailure {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            MixedFailure::PureEquilibriumExists => "pure-equilibrium-exists",
            MixedFailure::DegenerateDenominator(_) => "degenerate-denominator",
            MixedFailure::NegativeProbability(_) => "negative-probability",
        }
    }
}

impl fmt::Display for MixedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixedFailure::PureEquilibriumExists => {
                write!(f, "Pure Nash equilibria exist, no need for mixed strategy")
            }
            MixedFailure::DegenerateDenominator(player) => write!(
                f,
                "Division by zero when calculating {}'s strategy. One or more strategies may be dominated.",
                player
            ),
            MixedFailure::NegativeProbability(player) => write!(
                f,
                "Negative probabilities for {}. One or more strategies may be dominated.",
                player
            ),
        }
    }
}

/// Outcome of the 2x2 mixed-equilibrium solve.
#[derive(Debug, Clone, PartialEq)]
pub enum MixedEquilibrium {
    /// Both players' equilibrium mixes.
    Solved {
        /// Player 1's mix over A1, A2.
        p1: MixedStrategy,
        /// Player 2's mix over B1, B2.
        p2: MixedStrategy,
    },
    /// No mixed equilibrium from the indifference conditions.
    Unsolved(MixedFailure),
}

impl MixedEquilibrium {
    /// True when strategies were produced.
    pub fn is_solved(&self) -> bool {
        matches!(self, MixedEquilibrium::Solved { .. })
    }

    /// Both strategies, if solved.
    pub fn strategies(&self) -> Option<(&MixedStrategy, &MixedStrategy)> {
        match self {
            MixedEquilibrium::Solved { p1, p2 } => Some((p1, p2)),
            MixedEquilibrium::Unsolved(_) => None,
        }
    }

    /// Failure reason, if unsolved.
    pub fn failure(&self) -> Option<MixedFailure> {
        match self {
            MixedEquilibrium::Solved { .. } => None,
            MixedEquilibrium::Unsolved(reason) => Some(*reason),
        }
    }
}

/// Fail unless `grid` is 2x2.
pub fn require_two_by_two(grid: &PayoffGrid) -> GameResult<()> {
    if grid.rows() != 2 || grid.columns() != 2 {
        return Err(GameError::UnsupportedGameSize {
            rows: grid.rows(),
            columns: grid.columns(),
        });
    }
    Ok(())
}

/// Probability that `mixer` plays their first strategy so the opponent is
/// indifferent, derived from the opponent's payoffs.
fn indifference_probability(grid: &PayoffGrid, mixer: Player) -> Result<f64, MixedFailure> {
    let judge = mixer.opponent();
    let x = grid.utility(judge, 0, 0);
    let y = grid.utility(judge, 1, 0);
    let z = grid.utility(judge, 0, 1);
    let w = grid.utility(judge, 1, 1);

    let denominator = x - y + w - z;
    if denominator == 0.0 {
        return Err(MixedFailure::DegenerateDenominator(mixer));
    }

    let numerator = match mixer {
        Player::One => w - y,
        Player::Two => w - z,
    };
    let prob = numerator / denominator;
    if prob < 0.0 || 1.0 - prob < 0.0 {
        return Err(MixedFailure::NegativeProbability(mixer));
    }
    Ok(prob)
}

/// Solve the indifference conditions of a 2x2 game, without checking for
/// pure equilibria first.
///
/// # Errors
/// `UnsupportedGameSize` unless the grid is 2x2.
pub fn solve_indifference(grid: &PayoffGrid) -> GameResult<MixedEquilibrium> {
    require_two_by_two(grid)?;

    let solved = indifference_probability(grid, Player::One).and_then(|p| {
        indifference_probability(grid, Player::Two).map(|q| (p, q))
    });

    let outcome = match solved {
        Ok((p, q)) => MixedEquilibrium::Solved {
            p1: MixedStrategy::from_raw(vec![p, 1.0 - p]),
            p2: MixedStrategy::from_raw(vec![q, 1.0 - q]),
        },
        Err(reason) => MixedEquilibrium::Unsolved(reason),
    };
    debug!("2x2 mixed solve: {:?}", outcome);
    Ok(outcome)
}

/// Mixed equilibrium of a 2x2 game.
///
/// With `check_pure_first`, a game that has any pure equilibrium yields
/// [`MixedFailure::PureEquilibriumExists`] without solving.
pub fn mixed_equilibrium(grid: &PayoffGrid, check_pure_first: bool) -> GameResult<MixedEquilibrium> {
    require_two_by_two(grid)?;
    if check_pure_first && !pure_nash(grid).is_empty() {
        return Ok(MixedEquilibrium::Unsolved(MixedFailure::PureEquilibriumExists));
    }
    solve_indifference(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::expected::expected_payoff_one_sided;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(rows: Vec<Vec<(f64, f64)>>) -> PayoffGrid {
        PayoffGrid::from_matrix(rows).unwrap()
    }

    fn battle_of_sexes() -> PayoffGrid {
        grid(vec![
            vec![(3.0, 2.0), (0.0, 0.0)],
            vec![(0.0, 0.0), (2.0, 3.0)],
        ])
    }

    #[test]
    fn test_battle_of_sexes_bypassing_pure_check() {
        let result = mixed_equilibrium(&battle_of_sexes(), false).unwrap();
        let (p1, p2) = result.strategies().expect("should solve");

        assert_abs_diff_eq!(p1.probabilities()[0], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(p1.probabilities()[1], 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(p2.probabilities()[0], 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(p2.probabilities()[1], 0.6, epsilon = 1e-12);
        assert!(result.failure().is_none());
    }

    #[test]
    fn test_battle_of_sexes_with_pure_check() {
        let result = mixed_equilibrium(&battle_of_sexes(), true).unwrap();
        assert_eq!(result, MixedEquilibrium::Unsolved(MixedFailure::PureEquilibriumExists));
        assert!(result.strategies().is_none());
    }

    #[test]
    fn test_constant_player_one_payoffs_are_degenerate() {
        let g = grid(vec![
            vec![(1.0, 3.0), (1.0, 0.0)],
            vec![(1.0, 0.0), (1.0, 2.0)],
        ]);
        let result = mixed_equilibrium(&g, false).unwrap();
        assert_eq!(result.failure(), Some(MixedFailure::DegenerateDenominator(Player::Two)));
        assert!(result.strategies().is_none());
        assert_eq!(result.failure().unwrap().code(), "degenerate-denominator");
    }

    #[test]
    fn test_dominated_strategy_gives_negative_probability() {
        let prisoners = grid(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ]);
        let result = solve_indifference(&prisoners).unwrap();
        assert_eq!(result.failure(), Some(MixedFailure::NegativeProbability(Player::One)));
    }

    #[test]
    fn test_matching_pennies() {
        let g = grid(vec![
            vec![(1.0, -1.0), (-1.0, 1.0)],
            vec![(-1.0, 1.0), (1.0, -1.0)],
        ]);
        let result = mixed_equilibrium(&g, true).unwrap();
        let (p1, p2) = result.strategies().unwrap();
        assert_eq!(p1.probabilities(), &[0.5, 0.5]);
        assert_eq!(p2.probabilities(), &[0.5, 0.5]);
    }

    #[test]
    fn test_solution_makes_opponent_indifferent() {
        let g = grid(vec![
            vec![(4.0, -1.0), (-2.0, 3.0)],
            vec![(-3.0, 5.0), (1.0, -2.0)],
        ]);
        let result = mixed_equilibrium(&g, true).unwrap();
        let (p1, p2) = result.strategies().unwrap();

        let p2_values = expected_payoff_one_sided(&g, Player::Two, p1.probabilities()).unwrap();
        assert_abs_diff_eq!(p2_values.values()[0], p2_values.values()[1], epsilon = 1e-9);

        let p1_values = expected_payoff_one_sided(&g, Player::One, p2.probabilities()).unwrap();
        assert_abs_diff_eq!(p1_values.values()[0], p1_values.values()[1], epsilon = 1e-9);
    }

    #[test]
    fn test_unsupported_sizes() {
        let g = grid(vec![vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]; 2]);
        assert_eq!(
            mixed_equilibrium(&g, false),
            Err(GameError::UnsupportedGameSize { rows: 2, columns: 3 })
        );
        assert!(solve_indifference(&grid(vec![vec![(0.0, 0.0)]])).is_err());
    }

    #[test]
    fn test_mixed_strategy_validation() {
        assert!(MixedStrategy::new(vec![0.25, 0.75]).is_ok());
        assert!(MixedStrategy::new(vec![0.5, 0.5000001]).is_ok());
        assert!(MixedStrategy::new(vec![0.5, 0.6]).is_err());
        assert!(MixedStrategy::new(vec![1.5, -0.5]).is_err());
        assert!(MixedStrategy::new(vec![f64::NAN, 1.0]).is_err());
        assert!(MixedStrategy::new(Vec::new()).is_err());
        assert!(MixedStrategy::with_tolerance(vec![0.5, 0.6], 0.2).is_ok());
    }

    #[test]
    fn test_mixed_strategy_constructors() {
        let pure = MixedStrategy::pure(3, 1).unwrap();
        assert_eq!(pure.probabilities(), &[0.0, 1.0, 0.0]);
        assert_eq!(pure.support(), vec![1]);
        assert!(MixedStrategy::pure(3, 3).is_err());

        let uniform = MixedStrategy::uniform(4).unwrap();
        assert_eq!(uniform.support(), vec![0, 1, 2, 3]);
        assert!(MixedStrategy::uniform(0).is_err());
    }

    #[test]
    fn test_random_strategies_are_distributions() {
        let mut rng = StdRng::seed_from_u64(11);
        for mode in [BeliefSampling::Dirichlet, BeliefSampling::Normalized] {
            for len in 1..6 {
                let s = MixedStrategy::random(len, mode, &mut rng).unwrap();
                assert_eq!(s.len(), len);
                assert!(MixedStrategy::new(s.clone().into_inner()).is_ok());
            }
        }
        assert!(MixedStrategy::random(0, BeliefSampling::Dirichlet, &mut rng).is_err());
    }

    #[test]
    fn test_deserialize_validates_probabilities() {
        let ok: MixedStrategy = serde_json::from_str("[0.25, 0.75]").unwrap();
        assert_eq!(ok.probabilities(), &[0.25, 0.75]);
        assert_eq!(serde_json::to_string(&ok).unwrap(), "[0.25,0.75]");

        assert!(serde_json::from_str::<MixedStrategy>("[2.0, -1.0]").is_err());
        assert!(serde_json::from_str::<MixedStrategy>("[0.5, 0.6]").is_err());
        assert!(serde_json::from_str::<MixedStrategy>("[]").is_err());
    }
}
