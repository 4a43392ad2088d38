use clap::{Parser, ValueEnum};
use sokoslide_solver::engine::Level;
use sokoslide_solver::solver::{solve_astar_with_budget, solve_bfs_with_budget, SolveOutcome};
use sokoslide_solver::utils::{builtin_levels, level_from_file};
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Engine {
    Bfs,
    Astar,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search engine used to find the solution to replay
    #[clap(short, long, value_enum, default_value = "bfs")]
    engine: Engine,

    /// Wall-clock budget for the search, in seconds
    #[clap(short, long, default_value_t = 300)]
    budget_secs: u64,

    /// Milliseconds to pause between replay steps
    #[clap(long, default_value_t = 500)]
    delay_ms: u64,

    /// Wait for Enter between steps instead of pausing
    #[clap(long)]
    interactive: bool,

    /// Replay a level from the built-in set instead of a file
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

    let budget = Duration::from_secs(args.budget_secs);
    let outcome = match args.engine {
        Engine::Bfs => solve_bfs_with_budget(&level, budget),
        Engine::Astar => solve_astar_with_budget(&level, budget),
    };

    let solution = match &outcome {
        SolveOutcome::Solved(solution) => solution,
        SolveOutcome::NoSolution(stats) => {
            println!(
                "No solution to replay: the level is unsolvable ({} nodes explored in {:.2?}).",
                stats.nodes_explored, stats.elapsed
            );
            return;
        }
        SolveOutcome::TimedOut(stats) => {
            println!(
                "No solution to replay: the search timed out ({} nodes explored in {:.2?}).",
                stats.nodes_explored, stats.elapsed
            );
            return;
        }
    };

    println!("Solution with {} moves:\n", solution.move_count);
    let mut state = level.initial_state();
    let mut position = level.start_position();
    println!("{}\n", state);

    for (i, &direction) in solution.path.iter().enumerate() {
        if args.interactive {
            print!("Press Enter for the next step...");
            io::stdout().flush().unwrap();
            let mut line = String::new();
            if io::stdin().read_line(&mut line).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }

        println!("Step {}/{}: {}", i + 1, solution.move_count, direction);
        let (next_state, next_position) = level.apply_move(&state, position, direction);
        state = next_state;
        position = next_position;
        println!("{}\n", state);

        if level.is_goal(&state) {
            println!("🎉 Level solved! 🎉");
            break;
        }
    }
}
