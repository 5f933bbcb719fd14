//! Analysis export utilities.
//!
//! Snapshots a [`StrategicGame`] into a serializable [`GameExport`] for
//! writing to JSON.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::nash::game::StrategicGame;
use crate::nash::grid::{Coordinate, Payoff, Player};
use crate::nash::mixed::MixedEquilibrium;
use crate::nash::storage::AnnotatedCell;

/// Mixed equilibrium block, present for 2x2 games only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedExport {
    /// Player 1 probabilities, when solved
    pub p1_strategy: Option<Vec<f64>>,
    /// Player 2 probabilities, when solved
    pub p2_strategy: Option<Vec<f64>>,
    /// Why the solve failed, when it did
    pub error: Option<String>,
}

impl From<MixedEquilibrium> for MixedExport {
    fn from(mixed: MixedEquilibrium) -> Self {
        match mixed {
            MixedEquilibrium::Solved { p1, p2 } => Self {
                p1_strategy: Some(p1.into_inner()),
                p2_strategy: Some(p2.into_inner()),
                error: None,
            },
            MixedEquilibrium::Unsolved(failure) => Self {
                p1_strategy: None,
                p2_strategy: None,
                error: Some(failure.to_string()),
            },
        }
    }
}

/// Complete game snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameExport {
    /// Number of player 1 strategies
    pub rows: usize,
    /// Number of player 2 strategies
    pub columns: usize,
    /// Payoff pairs, row-major
    pub payoff_matrix: Vec<Vec<Payoff>>,
    /// Player 1 strategy labels
    pub p1_strategies: Vec<String>,
    /// Player 2 strategy labels
    pub p2_strategies: Vec<String>,
    /// Player 1 payoff view
    pub p1_payoffs: Vec<Vec<f64>>,
    /// Player 2 payoff view
    pub p2_payoffs: Vec<Vec<f64>>,
    /// Pure Nash equilibria as `(col, row)` coordinates
    pub nash_equilibria: Vec<Coordinate>,
    /// Cells marked as best responses by committing calls
    pub best_responses: Vec<AnnotatedCell>,
    /// Mixed equilibrium (2x2 games only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_strategy: Option<MixedExport>,
}

impl GameExport {
    /// Snapshot a game.
    ///
    /// Uses the cached Nash set when one was committed and is nonempty. The
    /// mixed block bypasses the pure-equilibrium check so that every 2x2 game
    /// reports its indifference solution or the reason there is none.
    pub fn from_game(game: &StrategicGame) -> Self {
        let mixed_strategy = game
            .get_mixed_equilibrium(false)
            .ok()
            .map(MixedExport::from);

        Self {
            rows: game.rows(),
            columns: game.columns(),
            payoff_matrix: game.grid().matrix(),
            p1_strategies: game.get_strategy_labels(Player::One),
            p2_strategies: game.get_strategy_labels(Player::Two),
            p1_payoffs: game.get_payoffs(Player::One),
            p2_payoffs: game.get_payoffs(Player::Two),
            nash_equilibria: game.nash_equilibria().into_iter().collect(),
            best_responses: game.storage().export(),
            mixed_strategy,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }
}
