//! Ready-made games and a registry for managing many games at once.
//!
//! - [`classic`]: parameterized 2x2 games with known equilibria (prisoner's
//!   dilemma, coordination, battle of the sexes, zero-sum)
//! - [`registry`]: stores games under sequential string ids and runs
//!   analyses on them

pub mod classic;
pub mod registry;

pub use classic::{
    battle_of_sexes, coordination, prisoners_dilemma, random_zero_sum, zero_sum, ClassicGame,
};
pub use registry::{Analysis, GameRegistry};
