//! # Bimatrix Nash
//!
//! Analysis of two-player normal-form (bimatrix) games: best responses, pure
//! and 2x2 mixed Nash equilibria, expected payoffs, dominance and regret.
//!
//! ## Features
//!
//! - **Pure equilibria**: Exact best-response intersection, ties included
//! - **Mixed equilibria**: Closed-form indifference solution for 2x2 games
//! - **Committed state**: Optional best-response annotations and Nash cache
//! - **Dominance & Regret**: Strict/weak dominance and profile regret
//! - **Export**: JSON snapshots of a game and its analysis
//!
//! ## Quick Start
//!
//! ```
//! use bimatrix_nash::games::battle_of_sexes;
//! use bimatrix_nash::nash::{format_coordinates, Player};
//!
//! let mut game = battle_of_sexes(3.0, 2.0).unwrap();
//!
//! let nash = game.find_pure_nash(true);
//! assert_eq!(format_coordinates(&nash), "(A1, B1), (A2, B2)");
//!
//! let mixed = game.get_mixed_equilibrium(false).unwrap();
//! assert!(mixed.is_solved());
//!
//! let ev = game.expected_payoff_one_sided(Player::One, &[0.5, 0.5]).unwrap();
//! assert_eq!(ev.best_labels(), vec!["A1"]);
//! ```
//!
//! ## Modules
//!
//! - [`nash`]: Payoff grid and analysis engine
//! - [`games`]: Classic games and the game registry
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   GameRegistry (id -> game)                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │      StrategicGame (grid + config + BestResponseStorage)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!         ┌──────────────┬──────┴───────┬──────────────┐
//!         ▼              ▼              ▼              ▼
//!   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐
//!   │   Best    │  │ Expected  │  │   Mixed   │  │ Dominance │
//!   │ Response  │  │  Payoff   │  │   (2x2)   │  │ & Regret  │
//!   └───────────┘  └───────────┘  └───────────┘  └───────────┘
//!         │
//!         ▼
//!   ┌───────────┐
//!   │ Pure Nash │
//!   └───────────┘
//! ```

#![warn(missing_docs)]

/// Normal-form game analysis module.
///
/// This is the core module containing the payoff grid and every analysis.
pub mod nash;

/// Classic games and the game registry.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use games::{ClassicGame, GameRegistry};
pub use nash::{
    AnalysisConfig, Coordinate, GameError, GameResult, MixedEquilibrium, MixedStrategy, Payoff,
    PayoffGrid, Player, StrategicGame,
};
