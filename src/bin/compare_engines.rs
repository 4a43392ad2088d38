use clap::Parser;
use sokoslide_solver::engine::Level;
use sokoslide_solver::solver::{solve_astar_with_budget, solve_bfs_with_budget, SolveOutcome};
use sokoslide_solver::utils::{builtin_levels, random_level};
use std::collections::HashMap;
use std::time::Duration;

const RANDOM_LEVEL_WIDTH: usize = 7;
const RANDOM_LEVEL_HEIGHT: usize = 6;
const RANDOM_LEVEL_OBJECTS: usize = 2;

type EngineFn = fn(&Level, Duration) -> SolveOutcome;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random levels to add to the batch
    #[clap(short, long, default_value_t = 10)]
    random: usize,

    /// Seed for the first random level; later ones increment it
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Wall-clock budget per solve, in seconds
    #[clap(short, long, default_value_t = 30)]
    budget_secs: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let budget = Duration::from_secs(args.budget_secs);

    let engines: Vec<(&str, EngineFn)> = vec![
        ("BFS", solve_bfs_with_budget),
        ("A*", solve_astar_with_budget),
    ];

    let mut batch: Vec<(String, Level)> = builtin_levels()
        .into_iter()
        .enumerate()
        .map(|(i, level)| (format!("builtin {}", i), level))
        .collect();
    for i in 0..args.random {
        let seed = args.seed + i as u64;
        match random_level(
            RANDOM_LEVEL_WIDTH,
            RANDOM_LEVEL_HEIGHT,
            RANDOM_LEVEL_OBJECTS,
            seed,
        ) {
            Ok(level) => batch.push((format!("random seed {}", seed), level)),
            Err(e) => eprintln!("Skipping random level with seed {}: {}", seed, e),
        }
    }

    println!(
        "Comparing engines over {} levels (budget {}s per solve)...",
        batch.len(),
        args.budget_secs
    );

    let mut nodes_per_engine: HashMap<&str, Vec<u64>> = HashMap::new();
    let mut solved_per_engine: HashMap<&str, usize> = HashMap::new();

    for (name, level) in &batch {
        println!("\nLevel: {}", name);
        for (engine_name, engine_fn) in &engines {
            let outcome = engine_fn(level, budget);
            let stats = outcome.stats();
            match &outcome {
                SolveOutcome::Solved(solution) => {
                    println!(
                        "  {:<4} solved in {:>3} moves, {:>8} nodes, {:.2?}",
                        engine_name, solution.move_count, stats.nodes_explored, stats.elapsed
                    );
                    *solved_per_engine.entry(*engine_name).or_insert(0) += 1;
                }
                SolveOutcome::NoSolution(_) => {
                    println!(
                        "  {:<4} found no solution, {:>8} nodes, {:.2?}",
                        engine_name, stats.nodes_explored, stats.elapsed
                    );
                }
                SolveOutcome::TimedOut(_) => {
                    println!(
                        "  {:<4} timed out, {:>8} nodes, {:.2?}",
                        engine_name, stats.nodes_explored, stats.elapsed
                    );
                }
            }
            nodes_per_engine
                .entry(*engine_name)
                .or_default()
                .push(stats.nodes_explored);
        }
    }

    println!("\n--- Summary ---");
    for (engine_name, _) in &engines {
        let nodes = &nodes_per_engine[engine_name];
        let total: u64 = nodes.iter().sum();
        let average = total as f64 / nodes.len().max(1) as f64;
        let solved = solved_per_engine.get(engine_name).copied().unwrap_or(0);
        println!(
            "{:<4} solved {}/{} levels, {:.1} nodes explored on average",
            engine_name,
            solved,
            batch.len(),
            average
        );
    }
}
