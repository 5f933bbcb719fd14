//! Payoff grid definition.
//!
//! A [`PayoffGrid`] is the ground truth for every analysis in the crate: a
//! rows x columns table of [`Payoff`] pairs where rows are player 1's
//! strategies (A1..Am) and columns are player 2's strategies (B1..Bn).
//!
//! Cells are addressed two ways:
//! - `(row, col)` arguments on accessors, matching how the table is printed;
//! - [`Coordinate`] values `(col, row)` in analysis results, matching the
//!   x/y convention used when reporting best responses and equilibria.

use std::collections::BTreeSet;
use std::fmt;

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::nash::error::{GameError, GameResult};

/// One of the two players.
///
/// Player 1 picks rows, player 2 picks columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Row player (strategies A1..Am).
    One,
    /// Column player (strategies B1..Bn).
    Two,
}

impl Player {
    /// Both players, in order.
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// Resolve a 1-based player id.
    pub fn from_id(id: u8) -> GameResult<Self> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }

    /// 1-based player id.
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Prefix used in strategy labels.
    pub fn label_prefix(self) -> char {
        match self {
            Player::One => 'A',
            Player::Two => 'B',
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(id: u8) -> GameResult<Self> {
        Player::from_id(id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// Utilities `(u1, u2)` for one strategy profile.
///
/// Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Payoff(pub f64, pub f64);

impl Payoff {
    /// Create a payoff pair.
    pub fn new(p1: f64, p2: f64) -> Self {
        Payoff(p1, p2)
    }

    /// Utility to the given player.
    pub fn for_player(&self, player: Player) -> f64 {
        match player {
            Player::One => self.0,
            Player::Two => self.1,
        }
    }
}

impl From<(f64, f64)> for Payoff {
    fn from((p1, p2): (f64, f64)) -> Self {
        Payoff(p1, p2)
    }
}

/// A cell address in `(column, row)` order.
///
/// Displayed 1-indexed as `(A{row+1}, B{col+1})`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    /// Column index (player 2's strategy).
    pub col: usize,
    /// Row index (player 1's strategy).
    pub row: usize,
}

impl Coordinate {
    /// Create a coordinate from column and row indices.
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(A{}, B{})", self.row + 1, self.col + 1)
    }
}

/// Ordered, duplicate-free set of coordinates (best responses, equilibria).
pub type CoordinateSet = BTreeSet<Coordinate>;

/// Rectangular matrix of payoff pairs, stored row-major.
///
/// Serializes as nested rows of `[u1, u2]` pairs. Deserializing goes through
/// [`PayoffGrid::from_matrix`], so ragged or non-finite input is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Payoff>>", into = "Vec<Vec<Payoff>>")]
pub struct PayoffGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Payoff>,
}

impl PayoffGrid {
    /// Create a zero-filled grid.
    ///
    /// A 0x0 grid is accepted as a degenerate case; a grid with exactly one
    /// zero dimension is not.
    pub fn new(rows: usize, columns: usize) -> GameResult<Self> {
        Self::check_shape(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![Payoff::default(); rows * columns],
        })
    }

    /// Build a grid from nested rows, validating that it is rectangular.
    ///
    /// # Example
    /// ```
    /// use bimatrix_nash::nash::PayoffGrid;
    ///
    /// let grid = PayoffGrid::from_matrix(vec![
    ///     vec![(3.0, 3.0), (0.0, 5.0)],
    ///     vec![(5.0, 0.0), (1.0, 1.0)],
    /// ]).unwrap();
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid.columns(), 2);
    /// ```
    pub fn from_matrix<P: Into<Payoff>>(matrix: Vec<Vec<P>>) -> GameResult<Self> {
        let rows = matrix.len();
        let columns = matrix.first().map_or(0, |row| row.len());
        Self::check_shape(rows, columns)?;

        let mut cells = Vec::with_capacity(rows * columns);
        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != columns {
                return Err(GameError::Validation(format!(
                    "row {} has {} columns but should have {}",
                    i,
                    row.len(),
                    columns
                )));
            }
            for (j, payoff) in row.into_iter().map(Into::into).enumerate() {
                check_finite(i, j, payoff)?;
                cells.push(payoff);
            }
        }

        Ok(Self { rows, columns, cells })
    }

    fn check_shape(rows: usize, columns: usize) -> GameResult<()> {
        if (rows == 0) != (columns == 0) {
            return Err(GameError::Validation(format!(
                "game must have at least one row and one column, got {}x{}",
                rows, columns
            )));
        }
        Ok(())
    }

    /// Number of player 1 strategies.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of player 2 strategies.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// True for the degenerate 0x0 grid.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of pure strategies available to `player`.
    pub fn strategy_count(&self, player: Player) -> usize {
        match player {
            Player::One => self.rows,
            Player::Two => self.columns,
        }
    }

    /// Payoff at `(row, col)`.
    pub fn get_payoff(&self, row: usize, col: usize) -> GameResult<Payoff> {
        self.check_cell(row, col)?;
        Ok(self.cell(row, col))
    }

    /// Overwrite the payoff at `(row, col)`.
    pub fn set_payoff(&mut self, row: usize, col: usize, payoff: Payoff) -> GameResult<()> {
        self.check_cell(row, col)?;
        check_finite(row, col, payoff)?;
        let idx = row * self.columns + col;
        self.cells[idx] = payoff;
        Ok(())
    }

    fn check_cell(&self, row: usize, col: usize) -> GameResult<()> {
        if row >= self.rows {
            return Err(GameError::IndexOutOfRange { axis: "row", index: row, len: self.rows });
        }
        if col >= self.columns {
            return Err(GameError::IndexOutOfRange {
                axis: "column",
                index: col,
                len: self.columns,
            });
        }
        Ok(())
    }

    /// Unchecked cell access for the analysis loops.
    pub(crate) fn cell(&self, row: usize, col: usize) -> Payoff {
        self.cells[row * self.columns + col]
    }

    /// Unchecked utility of `player` at `(row, col)`.
    pub(crate) fn utility(&self, player: Player, row: usize, col: usize) -> f64 {
        self.cell(row, col).for_player(player)
    }

    /// Utility to `player` when they play `own` and the opponent plays `other`.
    ///
    /// Hides the row/column orientation from per-player algorithms.
    pub(crate) fn utility_from(&self, player: Player, own: usize, other: usize) -> f64 {
        match player {
            Player::One => self.utility(player, own, other),
            Player::Two => self.utility(player, other, own),
        }
    }

    /// Fill every cell with two independent integers drawn from
    /// `lower..=upper`.
    pub fn fill_random<R: Rng + ?Sized>(
        &mut self,
        lower: i64,
        upper: i64,
        rng: &mut R,
    ) -> GameResult<()> {
        if lower > upper {
            return Err(GameError::Validation(format!(
                "lower limit {} exceeds upper limit {}",
                lower, upper
            )));
        }
        for cell in self.cells.iter_mut() {
            let p1 = rng.gen_range(lower..=upper);
            let p2 = rng.gen_range(lower..=upper);
            *cell = Payoff(p1 as f64, p2 as f64);
        }
        Ok(())
    }

    /// Fill every cell from a text supplier called in row-major order.
    ///
    /// `supplier(row, col)` must return `"u1, u2"`. All cells are parsed
    /// before any is written, so an error leaves the grid untouched.
    pub fn fill_manual<F, S>(&mut self, mut supplier: F) -> GameResult<()>
    where
        F: FnMut(usize, usize) -> S,
        S: AsRef<str>,
    {
        let mut parsed = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in 0..self.columns {
                let text = supplier(row, col);
                match parse_payoff(text.as_ref()) {
                    Some(payoff) => parsed.push(payoff),
                    None => {
                        warn!("rejected manual payoff {:?} at ({}, {})", text.as_ref(), row, col);
                        return Err(GameError::PayoffFormat {
                            row,
                            col,
                            input: text.as_ref().to_string(),
                        });
                    }
                }
            }
        }
        self.cells = parsed;
        Ok(())
    }

    /// Fill every cell from a numeric supplier called in row-major order.
    ///
    /// Every pair is checked for finiteness before any cell is written, so an
    /// error leaves the grid untouched.
    pub fn fill_with<F>(&mut self, mut supplier: F) -> GameResult<()>
    where
        F: FnMut(usize, usize) -> (f64, f64),
    {
        let mut filled = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in 0..self.columns {
                let payoff = Payoff::from(supplier(row, col));
                check_finite(row, col, payoff)?;
                filled.push(payoff);
            }
        }
        self.cells = filled;
        Ok(())
    }

    /// Per-player payoff view, indexed `[row][col]`.
    pub fn payoffs(&self, player: Player) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.columns.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|p| p.for_player(player)).collect())
            .collect()
    }

    /// The grid as nested rows of payoff pairs.
    pub fn matrix(&self) -> Vec<Vec<Payoff>> {
        self.cells
            .chunks(self.columns.max(1))
            .take(self.rows)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Labels for `player`'s strategies: `A1..Am` or `B1..Bn`.
    pub fn strategy_labels(&self, player: Player) -> Vec<String> {
        (0..self.strategy_count(player))
            .map(|i| strategy_label(player, i))
            .collect()
    }
}

// Best-response ties are compared with exact equality, which NaN would break.
fn check_finite(row: usize, col: usize, payoff: Payoff) -> GameResult<()> {
    if payoff.0.is_finite() && payoff.1.is_finite() {
        Ok(())
    } else {
        Err(GameError::Validation(format!(
            "payoff at (A{}, B{}) must be finite, got ({}, {})",
            row + 1,
            col + 1,
            payoff.0,
            payoff.1
        )))
    }
}

impl TryFrom<Vec<Vec<Payoff>>> for PayoffGrid {
    type Error = GameError;

    fn try_from(matrix: Vec<Vec<Payoff>>) -> GameResult<Self> {
        Self::from_matrix(matrix)
    }
}

impl From<PayoffGrid> for Vec<Vec<Payoff>> {
    fn from(grid: PayoffGrid) -> Self {
        grid.matrix()
    }
}

/// Label of a single strategy, e.g. `A1` for player 1's first row.
pub fn strategy_label(player: Player, index: usize) -> String {
    format!("{}{}", player.label_prefix(), index + 1)
}

/// Parse `"u1, u2"` into a payoff. Both values must be integers.
pub fn parse_payoff(text: &str) -> Option<Payoff> {
    let mut parts = text.split(',');
    let p1 = parts.next()?.trim().parse::<i64>().ok()?;
    let p2 = parts.next()?.trim().parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Payoff(p1 as f64, p2 as f64))
}
