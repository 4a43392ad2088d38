use clap::{Parser, ValueEnum};
use sokoslide_solver::engine::Level;
use sokoslide_solver::solver::{solve_astar_with_budget, solve_bfs_with_budget, SolveOutcome};
use sokoslide_solver::utils::{builtin_levels, level_from_file};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Engine {
    /// Breadth-first search: guaranteed minimum-length solutions
    Bfs,
    /// A* guided by the Manhattan-distance heuristic: usually faster
    Astar,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search engine to run
    #[clap(short, long, value_enum, default_value = "bfs")]
    engine: Engine,

    /// Wall-clock budget for the search, in seconds
    #[clap(short, long, default_value_t = 300)]
    budget_secs: u64,

    /// Solve a level from the built-in set instead of a file
    #[clap(long, conflicts_with = "level_file")]
    builtin: Option<usize>,

    /// Path to a level file (ASCII rows)
    level_file: Option<PathBuf>,
}

fn load_level(args: &Args) -> Result<Level, String> {
    if let Some(index) = args.builtin {
        let mut levels = builtin_levels();
        if index >= levels.len() {
            return Err(format!(
                "no built-in level {} (the set has {})",
                index,
                levels.len()
            ));
        }
        return Ok(levels.swap_remove(index));
    }
    match &args.level_file {
        Some(path) => level_from_file(path),
        None => Err("pass a level file or --builtin <index>".to_string()),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let level = match load_level(&args) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Failed to load level: {}", e);
            std::process::exit(1);
        }
    };

    println!("Initial level state:\n{}\n", level.initial_state());
    println!(
        "Searching with {:?} (budget {}s)...\n",
        args.engine, args.budget_secs
    );

    let budget = Duration::from_secs(args.budget_secs);
    let outcome = match args.engine {
        Engine::Bfs => solve_bfs_with_budget(&level, budget),
        Engine::Astar => solve_astar_with_budget(&level, budget),
    };

    match outcome {
        SolveOutcome::Solved(solution) => {
            println!("Solution found:\n");
            println!("Moves ({}):", solution.move_count);
            for (i, direction) in solution.path.iter().enumerate() {
                println!("  Move {}: {}", i + 1, direction);
            }
            println!();
            println!("Nodes explored: {}", solution.stats.nodes_explored);
            println!("Elapsed: {:.2?}", solution.stats.elapsed);
        }
        SolveOutcome::NoSolution(stats) => {
            println!("No solution exists for this level.\n");
            println!("Nodes explored: {}", stats.nodes_explored);
            println!("Elapsed: {:.2?}", stats.elapsed);
        }
        SolveOutcome::TimedOut(stats) => {
            println!("Search timed out; retry with a larger budget or the other engine.\n");
            println!("Nodes explored: {}", stats.nodes_explored);
            println!("Elapsed: {:.2?}", stats.elapsed);
        }
    }
}
