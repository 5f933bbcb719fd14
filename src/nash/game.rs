//! A normal-form game with persistent analysis state.
//!
//! [`StrategicGame`] owns a [`PayoffGrid`], the configuration used to analyze
//! it, and the [`BestResponseStorage`] that committing calls write to. Every
//! stateful operation has a `&self` counterpart that computes a fresh result
//! and mutates nothing:
//!
//! | pure (`&self`)           | committing (`&mut self`)                    |
//! |--------------------------|---------------------------------------------|
//! | [`best_responses`]       | [`find_best_responses`] with `update_state` |
//! | [`pure_nash`]            | [`find_pure_nash`] with `update_state`      |
//!
//! [`best_responses`]: StrategicGame::best_responses
//! [`find_best_responses`]: StrategicGame::find_best_responses
//! [`pure_nash`]: StrategicGame::pure_nash
//! [`find_pure_nash`]: StrategicGame::find_pure_nash

use std::fmt;

use log::debug;
use rand::Rng;

use crate::nash::best_response::{best_responses, best_responses_to_mix};
use crate::nash::config::AnalysisConfig;
use crate::nash::dominance::{dominated_strategies, is_dominant, regret};
use crate::nash::equilibrium::{intersect, pure_nash};
use crate::nash::error::{GameError, GameResult};
use crate::nash::expected::{expected_payoff_one_sided, expected_payoff_two_sided, ExpectedPayoffs};
use crate::nash::grid::{Coordinate, CoordinateSet, Payoff, PayoffGrid, Player};
use crate::nash::mixed::{
    require_two_by_two, solve_indifference, BeliefSampling, MixedEquilibrium, MixedFailure,
    MixedStrategy,
};
use crate::nash::storage::{BestResponseStorage, CellMarks};

/// A two-player normal-form game.
///
/// # Example
/// ```
/// use bimatrix_nash::nash::{Coordinate, StrategicGame};
///
/// let mut game = StrategicGame::from_matrix(vec![
///     vec![(3.0, 3.0), (0.0, 5.0)],
///     vec![(5.0, 0.0), (1.0, 1.0)],
/// ]).unwrap();
///
/// let nash = game.find_pure_nash(true);
/// assert_eq!(nash.into_iter().collect::<Vec<_>>(), vec![Coordinate::new(1, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct StrategicGame {
    /// The payoffs being analyzed.
    grid: PayoffGrid,

    /// Tolerances, random limits and seed.
    config: AnalysisConfig,

    /// Committed best responses, annotations and Nash cache.
    storage: BestResponseStorage,
}

impl StrategicGame {
    /// Wrap an existing grid with default configuration.
    pub fn from_grid(grid: PayoffGrid) -> Self {
        Self {
            grid,
            config: AnalysisConfig::default(),
            storage: BestResponseStorage::new(),
        }
    }

    /// Build a game directly from a payoff matrix.
    pub fn from_matrix<P: Into<Payoff>>(matrix: Vec<Vec<P>>) -> GameResult<Self> {
        Ok(Self::from_grid(PayoffGrid::from_matrix(matrix)?))
    }

    /// Build a `rows` x `columns` game with random integer payoffs in
    /// `config`'s limits, seeded from `config.seed` when set.
    pub fn random(rows: usize, columns: usize, config: AnalysisConfig) -> GameResult<Self> {
        let mut rng = config.rng();
        let mut game = Self::random_with(rows, columns, config.lower_limit, config.upper_limit, &mut rng)?;
        game.config = config;
        Ok(game)
    }

    /// Build a random game drawing from a caller-supplied generator.
    pub fn random_with<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        lower: i64,
        upper: i64,
        rng: &mut R,
    ) -> GameResult<Self> {
        let mut grid = PayoffGrid::new(rows, columns)?;
        grid.fill_random(lower, upper, rng)?;
        Ok(Self::from_grid(grid))
    }

    /// Build a game from a text supplier yielding `"u1, u2"` per cell, called
    /// in row-major order.
    pub fn manual<F, S>(rows: usize, columns: usize, supplier: F) -> GameResult<Self>
    where
        F: FnMut(usize, usize) -> S,
        S: AsRef<str>,
    {
        let mut grid = PayoffGrid::new(rows, columns)?;
        grid.fill_manual(supplier)?;
        Ok(Self::from_grid(grid))
    }

    /// Build a game from a numeric supplier yielding `(u1, u2)` per cell,
    /// called in row-major order.
    pub fn manual_values<F>(rows: usize, columns: usize, supplier: F) -> GameResult<Self>
    where
        F: FnMut(usize, usize) -> (f64, f64),
    {
        let mut grid = PayoffGrid::new(rows, columns)?;
        grid.fill_with(supplier)?;
        Ok(Self::from_grid(grid))
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying payoff grid.
    pub fn grid(&self) -> &PayoffGrid {
        &self.grid
    }

    /// Analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Committed analysis state.
    pub fn storage(&self) -> &BestResponseStorage {
        &self.storage
    }

    /// Number of player 1 strategies.
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of player 2 strategies.
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// Payoff at `(row, col)`.
    pub fn get_payoff(&self, row: usize, col: usize) -> GameResult<Payoff> {
        self.grid.get_payoff(row, col)
    }

    /// Overwrite one cell.
    ///
    /// The cell's best-response marks are dropped and the cached Nash set is
    /// invalidated, since both were derived from the old value.
    pub fn set_payoff(&mut self, row: usize, col: usize, payoff: Payoff) -> GameResult<()> {
        self.grid.set_payoff(row, col, payoff)?;
        self.storage.clear_cell(Coordinate::new(col, row));
        self.storage.invalidate_nash();
        Ok(())
    }

    /// `player`'s payoff view, indexed `[row][col]`.
    pub fn get_payoffs(&self, player: Player) -> Vec<Vec<f64>> {
        self.grid.payoffs(player)
    }

    /// Strategy labels for `player`.
    pub fn get_strategy_labels(&self, player: Player) -> Vec<String> {
        self.grid.strategy_labels(player)
    }

    /// Fresh best responses for `player`; mutates nothing.
    pub fn best_responses(&self, player: Player) -> CoordinateSet {
        best_responses(&self.grid, player)
    }

    /// Best responses for `player`, optionally committed to storage.
    ///
    /// With `update_state`, the cells are marked for `player` and merged into
    /// the accumulated best-response set, so repeated calls accumulate.
    pub fn find_best_responses(&mut self, player: Player, update_state: bool) -> CoordinateSet {
        let found = self.best_responses(player);
        if update_state {
            let added = self.storage.commit(player, &found);
            debug!("committed {} new best responses for {}", added, player);
        }
        found
    }

    /// Best responses accumulated by committing calls.
    pub fn committed_best_responses(&self, player: Player) -> &CoordinateSet {
        self.storage.best_responses(player)
    }

    /// Best-response marks for a cell.
    pub fn marks(&self, coord: Coordinate) -> CellMarks {
        self.storage.marks(coord)
    }

    /// Fresh pure Nash equilibria; mutates nothing.
    pub fn pure_nash(&self) -> CoordinateSet {
        pure_nash(&self.grid)
    }

    /// Pure Nash equilibria, optionally committing both players' best
    /// responses and caching the result.
    pub fn find_pure_nash(&mut self, update_state: bool) -> CoordinateSet {
        if !update_state {
            return self.pure_nash();
        }
        let p1 = self.find_best_responses(Player::One, true);
        let p2 = self.find_best_responses(Player::Two, true);
        let nash = intersect(&p1, &p2);
        self.storage.set_nash(nash.clone());
        nash
    }

    /// Cached Nash set when one was committed and is nonempty, otherwise a
    /// fresh computation.
    pub fn nash_equilibria(&self) -> CoordinateSet {
        match self.storage.nash() {
            Some(nash) if !nash.is_empty() => nash.clone(),
            _ => self.pure_nash(),
        }
    }

    /// Expected payoff of each of `player`'s strategies against
    /// `opponent_beliefs`.
    pub fn expected_payoff_one_sided(
        &self,
        player: Player,
        opponent_beliefs: &[f64],
    ) -> GameResult<ExpectedPayoffs> {
        expected_payoff_one_sided(&self.grid, player, opponent_beliefs)
    }

    /// Expected payoffs `(v1, v2)` of the mixed profile.
    pub fn expected_payoff_two_sided(
        &self,
        p1_beliefs: &[f64],
        p2_beliefs: &[f64],
    ) -> GameResult<(f64, f64)> {
        expected_payoff_two_sided(&self.grid, p1_beliefs, p2_beliefs)
    }

    /// Labels of `player`'s best responses to a mixed opponent.
    pub fn best_responses_to_mix(
        &self,
        player: Player,
        opponent_beliefs: &[f64],
    ) -> GameResult<Vec<String>> {
        best_responses_to_mix(&self.grid, player, opponent_beliefs)
    }

    /// Closed-form mixed equilibrium of a 2x2 game.
    ///
    /// With `check_pure_first`, the cached (or freshly computed) pure Nash
    /// set is consulted and a nonempty one short-circuits the solve.
    ///
    /// # Errors
    /// `UnsupportedGameSize` unless the game is 2x2.
    pub fn get_mixed_equilibrium(&self, check_pure_first: bool) -> GameResult<MixedEquilibrium> {
        require_two_by_two(&self.grid)?;
        if check_pure_first && !self.nash_equilibria().is_empty() {
            return Ok(MixedEquilibrium::Unsolved(MixedFailure::PureEquilibriumExists));
        }
        solve_indifference(&self.grid)
    }

    /// True if `strategy_index` dominates all of `player`'s other strategies.
    pub fn is_dominant(&self, strategy_index: usize, player: Player, strict: bool) -> GameResult<bool> {
        is_dominant(&self.grid, strategy_index, player, strict)
    }

    /// `player`'s strategies dominated by some alternative.
    pub fn get_dominated_strategies(&self, player: Player, strict: bool) -> Vec<usize> {
        dominated_strategies(&self.grid, player, strict)
    }

    /// Regret `(r1, r2)` of a mixed profile.
    pub fn calculate_regret(&self, p1_strategy: &[f64], p2_strategy: &[f64]) -> GameResult<(f64, f64)> {
        regret(&self.grid, p1_strategy, p2_strategy, self.config.tolerance)
    }

    /// Check that `strategy` is a valid mixed strategy for `player`.
    pub fn validate_strategy(&self, strategy: &[f64], player: Player) -> GameResult<MixedStrategy> {
        let expected = self.grid.strategy_count(player);
        if strategy.len() != expected {
            return Err(GameError::DimensionMismatch {
                what: match player {
                    Player::One => "player 1 strategy",
                    Player::Two => "player 2 strategy",
                },
                expected,
                actual: strategy.len(),
            });
        }
        MixedStrategy::with_tolerance(strategy.to_vec(), self.config.tolerance)
    }

    /// Random beliefs for both players.
    pub fn random_beliefs<R: Rng + ?Sized>(
        &self,
        mode: BeliefSampling,
        rng: &mut R,
    ) -> GameResult<(MixedStrategy, MixedStrategy)> {
        let p1 = MixedStrategy::random(self.rows(), mode, rng)?;
        let p2 = MixedStrategy::random(self.columns(), mode, rng)?;
        Ok((p1, p2))
    }

    /// Forget all committed best responses, marks and the Nash cache.
    pub fn reset_state(&mut self) {
        self.storage.clear();
    }
}

impl PartialEq for StrategicGame {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl fmt::Display for StrategicGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrategicGame({}x{})", self.rows(), self.columns())
    }
}
