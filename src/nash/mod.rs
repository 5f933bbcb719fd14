//! Normal-form game analysis.
//!
//! This module contains everything needed to analyze a two-player game given
//! as a payoff matrix:
//! - [`PayoffGrid`]: the matrix of payoff pairs
//! - Best responses and pure-strategy Nash equilibria
//! - Expected payoffs against mixed strategies
//! - The closed-form 2x2 mixed equilibrium
//! - Dominance and regret
//! - [`StrategicGame`]: a grid plus configuration and committed analysis state
//!
//! ## Conventions
//!
//! Player 1 picks rows (strategies `A1..Am`), player 2 picks columns
//! (`B1..Bn`). Cells are addressed by [`Coordinate`] in `(col, row)` order and
//! displayed 1-indexed as `(A{row+1}, B{col+1})`.
//!
//! ## Usage
//!
//! ```
//! use bimatrix_nash::nash::{AnalysisConfig, PayoffGrid, StrategicGame};
//!
//! let grid = PayoffGrid::from_matrix(vec![
//!     vec![(3.0, 2.0), (0.0, 0.0)],
//!     vec![(0.0, 0.0), (2.0, 3.0)],
//! ]).unwrap();
//!
//! let game = StrategicGame::from_grid(grid).with_config(AnalysisConfig::default());
//! assert_eq!(game.pure_nash().len(), 2);
//! ```

pub mod best_response;
pub mod config;
pub mod dominance;
pub mod equilibrium;
pub mod error;
pub mod expected;
pub mod export;
pub mod game;
pub mod grid;
pub mod mixed;
pub mod render;
pub mod storage;

pub use best_response::{best_responses, best_responses_to_mix};
pub use config::{AnalysisConfig, ConfigError};
pub use dominance::{dominated_strategies, is_dominant, regret};
pub use equilibrium::{intersect, pure_nash};
pub use error::{GameError, GameResult};
pub use expected::{expected_payoff_one_sided, expected_payoff_two_sided, ExpectedPayoffs};
pub use export::{GameExport, MixedExport};
pub use game::StrategicGame;
pub use grid::{parse_payoff, strategy_label, Coordinate, CoordinateSet, Payoff, PayoffGrid, Player};
pub use mixed::{
    mixed_equilibrium, solve_indifference, BeliefSampling, MixedEquilibrium, MixedFailure,
    MixedStrategy, DEFAULT_TOLERANCE,
};
pub use render::{annotated_table, format_beliefs, format_coordinates, normal_form_table};
pub use storage::{AnnotatedCell, BestResponseStorage, CellMarks};
