//! Persistent best-response state for a game.
//!
//! This module holds everything a committing analysis call leaves behind:
//! - **Marks**: which cells are a best response for player 1 and/or player 2,
//!   kept in a side table so the payoff grid itself is never rewritten
//! - **Best-response sets**: coordinates accumulated per player across calls
//! - **Nash cache**: the last committed pure equilibrium set
//!
//! Pure analysis never touches this storage; only the `update_state` paths
//! of [`StrategicGame`](crate::nash::game::StrategicGame) write to it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::nash::grid::{Coordinate, CoordinateSet, Player};

/// Best-response flags for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellMarks {
    /// Cell is a best response for player 1 (row player).
    pub p1: bool,
    /// Cell is a best response for player 2 (column player).
    pub p2: bool,
}

impl CellMarks {
    /// Flag for the given player.
    pub fn get(&self, player: Player) -> bool {
        match player {
            Player::One => self.p1,
            Player::Two => self.p2,
        }
    }

    fn set(&mut self, player: Player) {
        match player {
            Player::One => self.p1 = true,
            Player::Two => self.p2 = true,
        }
    }

    /// True when both players mark the cell.
    pub fn is_mutual(&self) -> bool {
        self.p1 && self.p2
    }
}

/// Storage for committed best responses and annotations.
#[derive(Debug, Clone, Default)]
pub struct BestResponseStorage {
    /// Annotation side table: coordinate -> flags.
    marks: FxHashMap<Coordinate, CellMarks>,

    /// Accumulated best responses for player 1.
    p1_best: CoordinateSet,

    /// Accumulated best responses for player 2.
    p2_best: CoordinateSet,

    /// Last committed pure Nash equilibrium set.
    nash: Option<CoordinateSet>,
}

impl BestResponseStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge freshly computed best responses for `player` into storage.
    ///
    /// Marks every coordinate in the annotation table and adds it to the
    /// player's accumulated set. Returns how many coordinates were new to
    /// the set.
    pub fn commit(&mut self, player: Player, found: &CoordinateSet) -> usize {
        let mut added = 0;
        for &coord in found {
            self.marks.entry(coord).or_default().set(player);
            if self.best_mut(player).insert(coord) {
                added += 1;
            }
        }
        added
    }

    fn best_mut(&mut self, player: Player) -> &mut CoordinateSet {
        match player {
            Player::One => &mut self.p1_best,
            Player::Two => &mut self.p2_best,
        }
    }

    /// Accumulated best responses for `player`.
    pub fn best_responses(&self, player: Player) -> &CoordinateSet {
        match player {
            Player::One => &self.p1_best,
            Player::Two => &self.p2_best,
        }
    }

    /// Annotation flags for a cell (all false if never marked).
    pub fn marks(&self, coord: Coordinate) -> CellMarks {
        self.marks.get(&coord).copied().unwrap_or_default()
    }

    /// Drop the annotation for a cell whose payoff was edited.
    pub fn clear_cell(&mut self, coord: Coordinate) {
        self.marks.remove(&coord);
    }

    /// Record a committed Nash set.
    pub fn set_nash(&mut self, nash: CoordinateSet) {
        self.nash = Some(nash);
    }

    /// Forget the committed Nash set after the payoffs changed.
    pub fn invalidate_nash(&mut self) {
        self.nash = None;
    }

    /// Last committed Nash set, if any.
    pub fn nash(&self) -> Option<&CoordinateSet> {
        self.nash.as_ref()
    }

    /// Number of cells carrying at least one mark.
    pub fn num_marked(&self) -> usize {
        self.marks.values().filter(|m| m.p1 || m.p2).count()
    }

    /// Clear all stored data.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.p1_best.clear();
        self.p2_best.clear();
        self.nash = None;
    }

    /// Export marked cells in coordinate order.
    pub fn export(&self) -> Vec<AnnotatedCell> {
        let mut cells: Vec<AnnotatedCell> = self
            .marks
            .iter()
            .filter(|(_, m)| m.p1 || m.p2)
            .map(|(&coord, &marks)| AnnotatedCell { coord, marks })
            .collect();
        cells.sort_by_key(|cell| cell.coord);
        cells
    }
}

/// Serializable annotation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCell {
    /// Cell address.
    pub coord: Coordinate,
    /// Best-response flags.
    pub marks: CellMarks,
}
