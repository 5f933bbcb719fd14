//! Expected payoffs against belief vectors.
//!
//! Both calculations are bilinear in the belief vectors:
//!
//! ```text
//! one-sided (player 1):  EU1(A_i) = Σ_j q[j] · u1(i, j)
//! two-sided:             (v1, v2) = Σ_i Σ_j p[i]·q[j] · (u1(i, j), u2(i, j))
//! ```
//!
//! Belief lengths are checked explicitly; probabilities are not, since
//! callers may legitimately evaluate arbitrary weightings. Validate with
//! [`MixedStrategy`](crate::nash::mixed::MixedStrategy) where a proper
//! distribution is required.

use serde::Serialize;

use crate::nash::error::{GameError, GameResult};
use crate::nash::grid::{strategy_label, PayoffGrid, Player};

/// Expected payoff of each pure strategy for one player, in strategy order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedPayoffs {
    player: Player,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ExpectedPayoffs {
    /// Player the values belong to.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Expected payoff for a strategy label such as `"A2"`.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    /// Values indexed by strategy.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Strategy labels, parallel to [`values`](Self::values).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate `(label, value)` pairs in strategy order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the player has no strategies (0x0 grid).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Highest expected payoff, or `None` for an empty game.
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Indices of strategies reaching the maximum (exact equality).
    pub fn best_indices(&self) -> Vec<usize> {
        match self.max_value() {
            Some(best) => self
                .values
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v == best)
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Labels of strategies reaching the maximum.
    pub fn best_labels(&self) -> Vec<String> {
        self.best_indices()
            .into_iter()
            .map(|i| self.labels[i].clone())
            .collect()
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> GameResult<()> {
    if expected != actual {
        return Err(GameError::DimensionMismatch { what, expected, actual });
    }
    Ok(())
}

/// Expected payoff of each of `player`'s pure strategies when the opponent
/// mixes according to `opponent_beliefs`.
///
/// # Errors
/// `DimensionMismatch` unless `opponent_beliefs` has one entry per opponent
/// strategy.
pub fn expected_payoff_one_sided(
    grid: &PayoffGrid,
    player: Player,
    opponent_beliefs: &[f64],
) -> GameResult<ExpectedPayoffs> {
    let own = grid.strategy_count(player);
    let other = grid.strategy_count(player.opponent());
    check_len("opponent beliefs", other, opponent_beliefs.len())?;

    let values = (0..own)
        .map(|s| {
            opponent_beliefs
                .iter()
                .enumerate()
                .map(|(o, &b)| b * grid.utility_from(player, s, o))
                .sum::<f64>()
        })
        .collect();

    Ok(ExpectedPayoffs {
        player,
        labels: (0..own).map(|s| strategy_label(player, s)).collect(),
        values,
    })
}

/// Expected payoffs `(v1, v2)` when both players mix independently.
///
/// # Errors
/// `DimensionMismatch` if `p1_beliefs.len() != rows` or
/// `p2_beliefs.len() != columns`.
pub fn expected_payoff_two_sided(
    grid: &PayoffGrid,
    p1_beliefs: &[f64],
    p2_beliefs: &[f64],
) -> GameResult<(f64, f64)> {
    check_len("player 1 beliefs", grid.rows(), p1_beliefs.len())?;
    check_len("player 2 beliefs", grid.columns(), p2_beliefs.len())?;

    let mut v1 = 0.0;
    let mut v2 = 0.0;
    for (i, &p) in p1_beliefs.iter().enumerate() {
        for (j, &q) in p2_beliefs.iter().enumerate() {
            let joint = p * q;
            let cell = grid.cell(i, j);
            v1 += joint * cell.0;
            v2 += joint * cell.1;
        }
    }
    Ok((v1, v2))
}
