//! # Sokoslide Solver Library
//!
//! This library provides the core game logic for a Sokoban-style puzzle
//! with "slide until collision" character movement, and two exhaustive
//! search engines (breadth-first and A*) that find a minimum-move solution
//! for a level.
//!
//! It is used by three binaries:
//! - `solve_level`: loads a level (from a file or the built-in set), runs
//!   one of the search engines and prints the move sequence together with
//!   the search statistics.
//! - `replay_solution`: solves a level and then replays the returned
//!   direction sequence one resolver step at a time.
//! - `compare_engines`: runs both engines over a batch of levels and
//!   reports move counts, explored nodes and timings side by side.
//!
//! ## Modules
//! - `engine`: the cell/direction vocabulary, the grid state representation,
//!   level validation, the movement resolver and the win test.
//! - `heuristics`: the Manhattan-distance move estimate that orders the A*
//!   frontier, and the axis-pinning deadlock detector.
//! - `solver`: the breadth-first and A* search engines, their outcome types
//!   and search statistics.
//! - `utils`: the ASCII level format, the built-in level set and a seeded
//!   random level generator.
//!
//! ## Example
//! ```
//! use sokoslide_solver::solver::solve_bfs;
//! use sokoslide_solver::utils::level_from_str_array;
//!
//! let level = level_from_str_array(&[
//!     "#####",
//!     "#@$.#",
//!     "#####",
//! ]).unwrap();
//! let outcome = solve_bfs(&level);
//! let solution = outcome.solution().expect("this level is solvable");
//! assert_eq!(solution.move_count, 1);
//! ```

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod utils;
