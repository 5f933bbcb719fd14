//! Random Game Survey
//!
//! Analyzes many seeded random games in parallel and reports how often each
//! number of pure Nash equilibria occurs, plus how many 2x2 games without a
//! pure equilibrium have a mixed one.

use std::collections::BTreeMap;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use bimatrix_nash::nash::{AnalysisConfig, MixedEquilibrium, StrategicGame};

/// Games analyzed per run.
const NUM_GAMES: u64 = 20_000;

/// Largest number of strategies per player.
const MAX_STRATEGIES: usize = 4;

/// Summary of one random game.
struct GameSummary {
    rows: usize,
    columns: usize,
    pure_count: usize,
    /// Set for 2x2 games without a pure equilibrium.
    mixed_solved: Option<bool>,
}

fn survey_one(seed: u64, config: &AnalysisConfig) -> Option<GameSummary> {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = rng.gen_range(2..=MAX_STRATEGIES);
    let columns = rng.gen_range(2..=MAX_STRATEGIES);
    let game = StrategicGame::random_with(rows, columns, config.lower_limit, config.upper_limit, &mut rng).ok()?;

    let pure_count = game.pure_nash().len();
    let mixed_solved = if rows == 2 && columns == 2 && pure_count == 0 {
        game.get_mixed_equilibrium(false)
            .ok()
            .map(|m| matches!(m, MixedEquilibrium::Solved { .. }))
    } else {
        None
    };

    Some(GameSummary { rows, columns, pure_count, mixed_solved })
}

fn main() {
    env_logger::init();

    println!("=== Random Game Survey ===\n");

    let config = match AnalysisConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration ({}), using defaults", e);
            AnalysisConfig::default()
        }
    };
    let base_seed = config.seed.unwrap_or(0);

    println!(
        "Games: {} | Strategies: 2-{} | Payoffs: [{}, {}] | Base seed: {}",
        NUM_GAMES, MAX_STRATEGIES, config.lower_limit, config.upper_limit, base_seed
    );
    println!("Threads: {}\n", rayon::current_num_threads());

    let pb = ProgressBar::new(NUM_GAMES);
    match ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})") {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => eprintln!("Warning: progress style rejected: {}", e),
    }

    let start = Instant::now();
    let summaries: Vec<GameSummary> = (0..NUM_GAMES)
        .into_par_iter()
        .filter_map(|i| {
            let summary = survey_one(base_seed.wrapping_add(i), &config);
            pb.inc(1);
            summary
        })
        .collect();
    pb.finish_and_clear();

    let elapsed = start.elapsed();

    let mut by_count: BTreeMap<usize, usize> = BTreeMap::new();
    let mut by_shape: BTreeMap<(usize, usize), (usize, usize)> = BTreeMap::new();
    let mut mixed_total = 0;
    let mut mixed_solved = 0;
    for s in &summaries {
        *by_count.entry(s.pure_count).or_insert(0) += 1;
        let shape = by_shape.entry((s.rows, s.columns)).or_insert((0, 0));
        shape.0 += 1;
        shape.1 += s.pure_count;
        if let Some(solved) = s.mixed_solved {
            mixed_total += 1;
            if solved {
                mixed_solved += 1;
            }
        }
    }

    let total = summaries.len().max(1) as f64;
    println!("Pure equilibria per game:");
    println!("  {:>6}  {:>8}  {:>7}", "count", "games", "share");
    for (count, games) in &by_count {
        println!("  {:>6}  {:>8}  {:>6.2}%", count, games, *games as f64 / total * 100.0);
    }

    println!("\nAverage pure equilibria by shape:");
    for ((rows, columns), (games, pure)) in &by_shape {
        println!("  {}x{}: {:.3} ({} games)", rows, columns, *pure as f64 / *games as f64, games);
    }

    println!(
        "\n2x2 games without a pure equilibrium: {} ({} with a mixed equilibrium)",
        mixed_total, mixed_solved
    );

    println!("\n=== Complete ===");
    println!(
        "Analyzed {} games in {:.2}s ({:.0} games/s)",
        summaries.len(),
        elapsed.as_secs_f64(),
        summaries.len() as f64 / elapsed.as_secs_f64().max(1e-9)
    );
}
