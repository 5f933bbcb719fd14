//! Registry of games addressed by string id.
//!
//! Ids are issued sequentially (`"1"`, `"2"`, ...) and never reused, even
//! after a game is removed.

use log::info;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::games::classic::ClassicGame;
use crate::nash::error::{GameError, GameResult};
use crate::nash::expected::ExpectedPayoffs;
use crate::nash::export::GameExport;
use crate::nash::game::StrategicGame;
use crate::nash::grid::{CoordinateSet, Player};
use crate::nash::mixed::{BeliefSampling, MixedEquilibrium, MixedStrategy};

/// Result of [`GameRegistry::analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Id of the analyzed game
    pub id: String,
    /// Pure Nash equilibria, when requested
    pub nash: Option<CoordinateSet>,
    /// Mixed equilibrium, when requested and the game is 2x2
    pub mixed: Option<MixedEquilibrium>,
}

/// Owns games and hands out ids.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: FxHashMap<String, StrategicGame>,
    next_id: u64,
}

impl GameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a game and return its id.
    pub fn create_game(&mut self, game: StrategicGame) -> String {
        self.next_id += 1;
        let id = self.next_id.to_string();
        info!("registered game {} ({}x{})", id, game.rows(), game.columns());
        self.games.insert(id.clone(), game);
        id
    }

    /// Build and store a classic game.
    pub fn create_classic<R: Rng + ?Sized>(
        &mut self,
        classic: &ClassicGame,
        rng: &mut R,
    ) -> GameResult<String> {
        info!("building {}", classic);
        let game = classic.build(rng)?;
        Ok(self.create_game(game))
    }

    /// Look up a game.
    pub fn get(&self, id: &str) -> GameResult<&StrategicGame> {
        self.games
            .get(id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))
    }

    /// Look up a game for mutation.
    pub fn get_mut(&mut self, id: &str) -> GameResult<&mut StrategicGame> {
        self.games
            .get_mut(id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))
    }

    /// Remove a game, returning it.
    pub fn remove(&mut self, id: &str) -> GameResult<StrategicGame> {
        let game = self
            .games
            .remove(id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))?;
        info!("removed game {}", id);
        Ok(game)
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True if no games are stored.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Analyze a stored game.
    ///
    /// `find_nash` commits the pure equilibria to the game's state.
    /// `find_mixed` solves the 2x2 mixed equilibrium with the pure check
    /// enabled, and is skipped for other shapes.
    pub fn analyze(&mut self, id: &str, find_nash: bool, find_mixed: bool) -> GameResult<Analysis> {
        let game = self.get_mut(id)?;

        let nash = if find_nash {
            Some(game.find_pure_nash(true))
        } else {
            None
        };

        let mixed = if find_mixed && game.rows() == 2 && game.columns() == 2 {
            Some(game.get_mixed_equilibrium(true)?)
        } else {
            None
        };

        info!(
            "analyzed game {}: {} pure equilibria, mixed {}",
            id,
            nash.as_ref().map_or(0, |n| n.len()),
            mixed.as_ref().map_or("skipped", |m| if m.is_solved() { "solved" } else { "unsolved" })
        );
        Ok(Analysis { id: id.to_string(), nash, mixed })
    }

    /// Expected payoffs of `player`'s strategies against `opponent_beliefs`.
    pub fn expected_payoffs(
        &self,
        id: &str,
        player: Player,
        opponent_beliefs: &[f64],
    ) -> GameResult<ExpectedPayoffs> {
        self.get(id)?.expected_payoff_one_sided(player, opponent_beliefs)
    }

    /// Random beliefs sized for a stored game.
    pub fn random_beliefs<R: Rng + ?Sized>(
        &self,
        id: &str,
        mode: BeliefSampling,
        rng: &mut R,
    ) -> GameResult<(MixedStrategy, MixedStrategy)> {
        self.get(id)?.random_beliefs(mode, rng)
    }

    /// Pretty JSON snapshot of a stored game.
    pub fn export_json(&self, id: &str) -> GameResult<String> {
        let export = GameExport::from_game(self.get(id)?);
        Ok(export.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::grid::Coordinate;
    use crate::nash::mixed::MixedFailure;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_sequential_ids() {
        let mut registry = GameRegistry::new();
        let mut rng = rng();
        let first = registry.create_classic(&ClassicGame::prisoners_dilemma(), &mut rng).unwrap();
        let second = registry.create_classic(&ClassicGame::coordination(), &mut rng).unwrap();
        assert_eq!((first.as_str(), second.as_str()), ("1", "2"));

        registry.remove("1").unwrap();
        let third = registry.create_classic(&ClassicGame::battle_of_sexes(), &mut rng).unwrap();
        assert_eq!(third, "3");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_id() {
        let mut registry = GameRegistry::new();
        assert!(matches!(registry.get("9"), Err(GameError::UnknownGame(id)) if id == "9"));
        assert!(matches!(registry.analyze("9", true, true), Err(GameError::UnknownGame(_))));
        assert!(matches!(registry.remove("9"), Err(GameError::UnknownGame(_))));
        assert!(matches!(registry.export_json("9"), Err(GameError::UnknownGame(_))));
    }

    #[test]
    fn test_analyze_commits_state() {
        let mut registry = GameRegistry::new();
        let id = registry.create_classic(&ClassicGame::prisoners_dilemma(), &mut rng()).unwrap();

        let analysis = registry.analyze(&id, true, true).unwrap();
        let expected: CoordinateSet = [Coordinate::new(1, 1)].into_iter().collect();
        assert_eq!(analysis.nash, Some(expected.clone()));
        assert_eq!(
            analysis.mixed.and_then(|m| m.failure()),
            Some(MixedFailure::PureEquilibriumExists)
        );
        assert_eq!(registry.get(&id).unwrap().storage().nash(), Some(&expected));
    }

    #[test]
    fn test_analyze_skips_mixed_for_larger_games() {
        let mut registry = GameRegistry::new();
        let game = StrategicGame::random_with(3, 3, -5, 5, &mut rng()).unwrap();
        let id = registry.create_game(game);

        let analysis = registry.analyze(&id, false, true).unwrap();
        assert!(analysis.nash.is_none());
        assert!(analysis.mixed.is_none());
    }

    #[test]
    fn test_expected_payoffs_and_beliefs() {
        let mut registry = GameRegistry::new();
        let id = registry.create_classic(&ClassicGame::battle_of_sexes(), &mut rng()).unwrap();

        let payoffs = registry.expected_payoffs(&id, Player::One, &[0.5, 0.5]).unwrap();
        assert_eq!(payoffs.values(), &[1.5, 1.0]);

        let (p1, p2) = registry.random_beliefs(&id, BeliefSampling::Normalized, &mut rng()).unwrap();
        assert_eq!((p1.len(), p2.len()), (2, 2));
    }

    #[test]
    fn test_export_json() {
        let mut registry = GameRegistry::new();
        let id = registry.create_classic(&ClassicGame::coordination(), &mut rng()).unwrap();
        registry.analyze(&id, true, false).unwrap();

        let json = registry.export_json(&id).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nash_equilibria"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["best_responses"].as_array().map(Vec::len), Some(2));
    }
}
