//! Normal-Form Game Analyzer
//!
//! Analyzes the classic 2x2 games and one seeded random game, printing
//! equilibria, best responses, dominance and regret. Each game's analysis
//! is saved as JSON.
//!
//! Honors `NASH_TOLERANCE`, `NASH_PRECISION` and `NASH_SEED`; set `RUST_LOG`
//! for engine logging.

use std::time::Instant;

use bimatrix_nash::games::{ClassicGame, GameRegistry};
use bimatrix_nash::nash::{
    annotated_table, format_beliefs, format_coordinates, normal_form_table, AnalysisConfig,
    BeliefSampling, GameExport, MixedEquilibrium, Player, StrategicGame,
};

fn main() {
    env_logger::init();

    println!("=== Normal-Form Game Analyzer ===\n");

    let config = match AnalysisConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration ({}), using defaults", e);
            AnalysisConfig::default()
        }
    };
    let seed = config.seed.unwrap_or(42);
    let config = config.with_seed(seed);
    let mut rng = config.rng();

    println!("Seed: {} | Tolerance: {} | Precision: {}", seed, config.tolerance, config.precision);
    println!();

    let start = Instant::now();
    let mut registry = GameRegistry::new();
    let mut ids = Vec::new();

    for classic in ClassicGame::canonical() {
        match registry.create_classic(&classic, &mut rng) {
            Ok(id) => ids.push((id, classic.to_string())),
            Err(e) => eprintln!("Could not build {}: {}", classic, e),
        }
    }

    match StrategicGame::random(3, 3, config.clone().with_limits(-9, 9)) {
        Ok(game) => ids.push((registry.create_game(game), "Random 3x3 Game".to_string())),
        Err(e) => eprintln!("Could not build random game: {}", e),
    }

    for (id, name) in &ids {
        println!("--- [{}] {} ---\n", id, name);

        let analysis = match registry.analyze(id, true, true) {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Analysis failed: {}", e);
                continue;
            }
        };
        let game = match registry.get(id) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        print!("{}", normal_form_table(game.grid()));
        println!();
        println!("Best responses (H):");
        print!("{}", annotated_table(game));
        println!();

        if let Some(nash) = &analysis.nash {
            println!("Pure Nash equilibria: {}", format_coordinates(nash));
        }
        match &analysis.mixed {
            Some(MixedEquilibrium::Solved { p1, p2 }) => println!(
                "Mixed equilibrium: P1 {} | P2 {}",
                format_beliefs(p1.probabilities(), config.precision),
                format_beliefs(p2.probabilities(), config.precision)
            ),
            Some(MixedEquilibrium::Unsolved(reason)) => println!("Mixed equilibrium: {}", reason),
            None => {}
        }

        for player in Player::BOTH {
            let strict = game.get_dominated_strategies(player, true);
            let weak = game.get_dominated_strategies(player, false);
            let labels = game.get_strategy_labels(player);
            let names = |indices: &[usize]| -> String {
                if indices.is_empty() {
                    "None".to_string()
                } else {
                    indices.iter().map(|&i| labels[i].clone()).collect::<Vec<_>>().join(", ")
                }
            };
            println!(
                "{} dominated strategies: strict {} | weak {}",
                player,
                names(&strict),
                names(&weak)
            );
        }

        match game.random_beliefs(BeliefSampling::Dirichlet, &mut rng) {
            Ok((p1, p2)) => {
                println!(
                    "Random beliefs: P1 {} | P2 {}",
                    format_beliefs(p1.probabilities(), config.precision),
                    format_beliefs(p2.probabilities(), config.precision)
                );
                if let Ok(ev) = game.expected_payoff_one_sided(Player::One, p2.probabilities()) {
                    let values: Vec<String> = ev
                        .iter()
                        .map(|(label, v)| format!("{}={:.*}", label, config.precision, v))
                        .collect();
                    println!("  P1 expected payoffs: {} (best: {})", values.join(", "), ev.best_labels().join(", "));
                }
                match game.calculate_regret(p1.probabilities(), p2.probabilities()) {
                    Ok((r1, r2)) => println!(
                        "  Regret: P1 {:.*} | P2 {:.*}",
                        config.precision, r1, config.precision, r2
                    ),
                    Err(e) => eprintln!("  Regret failed: {}", e),
                }
            }
            Err(e) => eprintln!("Could not sample beliefs: {}", e),
        }

        let json_path = format!("game_{}.json", id);
        match GameExport::from_game(game).save_json(&json_path) {
            Ok(_) => println!("Saved JSON: {}", json_path),
            Err(e) => eprintln!("Error saving JSON: {}", e),
        }
        println!();
    }

    println!("=== Complete ===");
    println!("Analyzed {} games in {:.3}s", ids.len(), start.elapsed().as_secs_f64());
}
