//! Dominance and regret.
//!
//! Strategy `s` dominates `t` for a player when, against every opponent pure
//! strategy, `s` pays:
//! - **strictly**: more than `t` everywhere
//! - **weakly**: at least as much as `t` everywhere, and more somewhere
//!
//! Regret measures how far a profile is from each player's best reply:
//!
//! ```text
//! r_i = max_s EU_i(s | opponent mix) - EU_i(p1, p2)
//! ```

use log::debug;

use crate::nash::error::{GameError, GameResult};
use crate::nash::expected::{expected_payoff_one_sided, expected_payoff_two_sided};
use crate::nash::grid::{PayoffGrid, Player};
use crate::nash::mixed::MixedStrategy;

/// True if `player`'s strategy `s` dominates strategy `t`.
fn dominates(grid: &PayoffGrid, player: Player, s: usize, t: usize, strict: bool) -> bool {
    let mut better_somewhere = false;
    for other in 0..grid.strategy_count(player.opponent()) {
        let a = grid.utility_from(player, s, other);
        let b = grid.utility_from(player, t, other);
        if a < b || (strict && a == b) {
            return false;
        }
        if a > b {
            better_somewhere = true;
        }
    }
    strict || better_somewhere
}

fn check_strategy(grid: &PayoffGrid, player: Player, index: usize) -> GameResult<()> {
    let len = grid.strategy_count(player);
    if index >= len {
        return Err(GameError::IndexOutOfRange { axis: "strategy", index, len });
    }
    Ok(())
}

/// True if `strategy_index` dominates every other strategy of `player`.
///
/// A player with a single strategy is trivially dominant.
///
/// # Errors
/// `IndexOutOfRange` if `strategy_index` is not one of `player`'s strategies.
pub fn is_dominant(
    grid: &PayoffGrid,
    strategy_index: usize,
    player: Player,
    strict: bool,
) -> GameResult<bool> {
    check_strategy(grid, player, strategy_index)?;
    Ok((0..grid.strategy_count(player))
        .filter(|&t| t != strategy_index)
        .all(|t| dominates(grid, player, strategy_index, t, strict)))
}

/// Indices of `player`'s strategies dominated by at least one alternative,
/// in ascending order.
pub fn dominated_strategies(grid: &PayoffGrid, player: Player, strict: bool) -> Vec<usize> {
    let count = grid.strategy_count(player);
    (0..count)
        .filter(|&t| (0..count).any(|s| s != t && dominates(grid, player, s, t, strict)))
        .collect()
}

/// Regret `(r1, r2)` of the profile `(p1_strategy, p2_strategy)`.
///
/// Both strategies must be valid distributions within `tolerance`, which
/// keeps each regret non-negative.
///
/// # Errors
/// `DimensionMismatch` for wrong lengths, `Validation` for vectors that are
/// not probability distributions.
pub fn regret(
    grid: &PayoffGrid,
    p1_strategy: &[f64],
    p2_strategy: &[f64],
    tolerance: f64,
) -> GameResult<(f64, f64)> {
    let (actual1, actual2) = expected_payoff_two_sided(grid, p1_strategy, p2_strategy)?;
    MixedStrategy::with_tolerance(p1_strategy.to_vec(), tolerance)?;
    MixedStrategy::with_tolerance(p2_strategy.to_vec(), tolerance)?;

    let best1 = expected_payoff_one_sided(grid, Player::One, p2_strategy)?
        .max_value()
        .unwrap_or(0.0);
    let best2 = expected_payoff_one_sided(grid, Player::Two, p1_strategy)?
        .max_value()
        .unwrap_or(0.0);

    let r1 = clamp_regret(best1, actual1, tolerance);
    let r2 = clamp_regret(best2, actual2, tolerance);
    debug!("regret: ({}, {})", r1, r2);
    Ok((r1, r2))
}

// Only rounding and the probability-sum tolerance may push regret below zero.
fn clamp_regret(best: f64, actual: f64, tolerance: f64) -> f64 {
    let raw = best - actual;
    let slack = (tolerance + 1e-9) * (1.0 + best.abs() + actual.abs());
    debug_assert!(raw >= -slack, "negative regret {} (best {}, actual {})", raw, best, actual);
    raw.max(0.0)
}
