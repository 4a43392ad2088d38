//! Exhaustive search over the puzzle state space.
//!
//! Two engines share the same node generation, visited-set and deadlock
//! discipline: breadth-first search, which always returns a minimum-move
//! solution when one exists, and A* ordered by `f = g + h` with the
//! heuristic from [`crate::heuristics`], which is usually faster but only
//! as optimal as the heuristic allows. Callers should treat breadth-first
//! as the reference for correctness and A* as the performance alternative.
use crate::engine::{Direction, Grid, Level};
use crate::heuristics::{estimate_remaining_moves, is_deadlocked};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::time::{Duration, Instant};

/// Wall-clock budget used by [`solve_bfs`] and [`solve_astar`].
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(300);

/// How often (in expanded nodes) the engines emit a progress line.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Counters describing one search run, reported on every outcome so a
/// caller can judge whether retrying with a larger budget or the other
/// engine is worthwhile.
#[derive(Clone, Debug)]
pub struct SearchStats {
    /// Number of nodes taken off the frontier and expanded.
    pub nodes_explored: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// A solution found by one of the search engines.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Number of logical moves in the solution.
    pub move_count: usize,
    /// The move sequence, in play order.
    pub path: Vec<Direction>,
    /// Search counters for the run that produced this solution.
    pub stats: SearchStats,
}

/// The result of one solve invocation.
///
/// `NoSolution` and `TimedOut` are ordinary outcomes, not errors: the first
/// proves the level unsolvable (the state space was exhausted), the second
/// proves nothing beyond the budget running out.
#[derive(Clone, Debug)]
pub enum SolveOutcome {
    /// A goal state was reached; the path is minimum-length for
    /// breadth-first search.
    Solved(Solution),
    /// The reachable state space was exhausted without finding a goal.
    NoSolution(SearchStats),
    /// The wall-clock budget ran out before success or exhaustion.
    TimedOut(SearchStats),
}

impl SolveOutcome {
    /// Returns the solution when the search succeeded.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Returns the search counters for this run, whatever the outcome.
    pub fn stats(&self) -> &SearchStats {
        match self {
            SolveOutcome::Solved(solution) => &solution.stats,
            SolveOutcome::NoSolution(stats) => stats,
            SolveOutcome::TimedOut(stats) => stats,
        }
    }
}

fn search_stats(nodes_explored: u64, started: Instant) -> SearchStats {
    SearchStats {
        nodes_explored,
        elapsed: started.elapsed(),
    }
}

/// Solves `level` by breadth-first search with the default time budget.
///
/// The first goal node dequeued is guaranteed to carry a minimum move
/// count, since every move costs one.
pub fn solve_bfs(level: &Level) -> SolveOutcome {
    solve_bfs_with_budget(level, DEFAULT_TIME_BUDGET)
}

/// Breadth-first search with an explicit wall-clock budget.
///
/// The budget is checked cooperatively, once per dequeued node; it is the
/// only cancellation mechanism.
pub fn solve_bfs_with_budget(level: &Level, budget: Duration) -> SolveOutcome {
    let started = Instant::now();
    let mut frontier: VecDeque<(usize, Grid, Vec<Direction>)> = VecDeque::new();
    frontier.push_back((level.start_position(), level.initial_state(), Vec::new()));
    let mut visited: HashSet<(usize, Grid)> = HashSet::new();
    let mut nodes_explored: u64 = 0;

    while let Some((position, state, path)) = frontier.pop_front() {
        if started.elapsed() >= budget {
            info!(
                "breadth-first search timed out after {} nodes",
                nodes_explored
            );
            return SolveOutcome::TimedOut(search_stats(nodes_explored, started));
        }
        if !visited.insert((position, state.clone())) {
            continue;
        }
        nodes_explored += 1;
        if nodes_explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "breadth-first search explored {} nodes, frontier holds {}",
                nodes_explored,
                frontier.len()
            );
        }

        if level.is_goal(&state) {
            info!(
                "breadth-first search found a {}-move solution after {} nodes",
                path.len(),
                nodes_explored
            );
            return SolveOutcome::Solved(Solution {
                move_count: path.len(),
                path,
                stats: search_stats(nodes_explored, started),
            });
        }

        for (next_state, next_position, direction) in level.successors(&state, position) {
            let key = (next_position, next_state);
            if visited.contains(&key) {
                continue;
            }
            let (next_position, next_state) = key;
            if is_deadlocked(level, &next_state) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(direction);
            frontier.push_back((next_position, next_state, next_path));
        }
    }

    info!(
        "breadth-first search exhausted the state space after {} nodes",
        nodes_explored
    );
    SolveOutcome::NoSolution(search_stats(nodes_explored, started))
}

/// One entry in the A* priority frontier.
///
/// Ordered so that popping the `BinaryHeap` maximum yields the node with
/// the lowest `f`, ties broken by lower `g`, then by earliest insertion.
/// The sequence number makes the ordering total, so repeated runs on the
/// same level expand nodes in the same order.
struct AStarNode {
    f: u32,
    g: u32,
    sequence: u64,
    position: usize,
    state: Grid,
    path: Vec<Direction>,
}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g && self.sequence == other.sequence
    }
}

impl Eq for AStarNode {}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Solves `level` by A* search with the default time budget.
///
/// The heuristic is not guaranteed admissible, so the returned path is
/// minimum-length only when the heuristic never overestimates along an
/// optimal path; use [`solve_bfs`] when optimality must be certain.
pub fn solve_astar(level: &Level) -> SolveOutcome {
    solve_astar_with_budget(level, DEFAULT_TIME_BUDGET)
}

/// A* search with an explicit wall-clock budget.
///
/// Expansion, visited-set and deadlock handling match
/// [`solve_bfs_with_budget`]; only the frontier ordering differs.
pub fn solve_astar_with_budget(level: &Level, budget: Duration) -> SolveOutcome {
    let started = Instant::now();
    let initial_state = level.initial_state();
    let initial_estimate =
        estimate_remaining_moves(level, &initial_state, level.start_position());
    let mut frontier = BinaryHeap::new();
    frontier.push(AStarNode {
        f: initial_estimate,
        g: 0,
        sequence: 0,
        position: level.start_position(),
        state: initial_state,
        path: Vec::new(),
    });
    let mut visited: HashSet<(usize, Grid)> = HashSet::new();
    let mut nodes_explored: u64 = 0;
    let mut sequence: u64 = 0;

    while let Some(node) = frontier.pop() {
        if started.elapsed() >= budget {
            info!("A* search timed out after {} nodes", nodes_explored);
            return SolveOutcome::TimedOut(search_stats(nodes_explored, started));
        }
        if !visited.insert((node.position, node.state.clone())) {
            continue;
        }
        nodes_explored += 1;
        if nodes_explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "A* search explored {} nodes, frontier holds {}",
                nodes_explored,
                frontier.len()
            );
        }

        if level.is_goal(&node.state) {
            info!(
                "A* search found a {}-move solution after {} nodes",
                node.path.len(),
                nodes_explored
            );
            return SolveOutcome::Solved(Solution {
                move_count: node.path.len(),
                path: node.path,
                stats: search_stats(nodes_explored, started),
            });
        }

        for (next_state, next_position, direction) in level.successors(&node.state, node.position) {
            let key = (next_position, next_state);
            if visited.contains(&key) {
                continue;
            }
            let (next_position, next_state) = key;
            if is_deadlocked(level, &next_state) {
                continue;
            }
            let g = node.g + 1;
            let estimate = estimate_remaining_moves(level, &next_state, next_position);
            let mut next_path = node.path.clone();
            next_path.push(direction);
            sequence += 1;
            frontier.push(AStarNode {
                // The unreachable sentinel saturates instead of wrapping, so
                // a count-mismatched state sinks to the back of the queue.
                f: g.saturating_add(estimate),
                g,
                sequence,
                position: next_position,
                state: next_state,
                path: next_path,
            });
        }
    }

    info!(
        "A* search exhausted the state space after {} nodes",
        nodes_explored
    );
    SolveOutcome::NoSolution(search_stats(nodes_explored, started))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Direction::{Down, Right};
    use crate::utils::level_from_str_array;

    fn level(rows: &[&str]) -> Level {
        level_from_str_array(rows).unwrap()
    }

    fn solved(outcome: &SolveOutcome) -> &Solution {
        outcome
            .solution()
            .expect("expected the level to be solved")
    }

    #[test]
    fn test_bfs_solves_one_push_level() {
        let level = level(&[
            "#####", //
            "#@$.#", //
            "#####",
        ]);
        let outcome = solve_bfs(&level);
        let solution = solved(&outcome);
        assert_eq!(solution.move_count, 1);
        assert_eq!(solution.path, vec![Right]);
        assert!(solution.stats.nodes_explored >= 1);
    }

    #[test]
    fn test_astar_solves_one_push_level() {
        let level = level(&[
            "#####", //
            "#@$.#", //
            "#####",
        ]);
        let outcome = solve_astar(&level);
        let solution = solved(&outcome);
        assert_eq!(solution.move_count, 1);
        assert_eq!(solution.path, vec![Right]);
    }

    #[test]
    fn test_bfs_finds_minimum_move_count_with_sliding() {
        // Hand-checked: the character must first drop down the left side
        // (one sliding move) and then push the object twice; no shorter
        // sequence reaches the goal.
        let level = level(&[
            "######", //
            "#@   #", //
            "# $ .#", //
            "######",
        ]);
        let outcome = solve_bfs(&level);
        let solution = solved(&outcome);
        assert_eq!(solution.move_count, 3);
        assert_eq!(solution.path, vec![Down, Right, Right]);
    }

    #[test]
    fn test_engines_agree_on_two_push_level() {
        let level = level(&[
            "######", //
            "#@$ .#", //
            "#    #", //
            "######",
        ]);
        let bfs = solve_bfs(&level);
        let astar = solve_astar(&level);
        assert_eq!(solved(&bfs).move_count, 2);
        assert_eq!(solved(&bfs).path, vec![Right, Right]);
        assert_eq!(solved(&astar).move_count, 2);
    }

    #[test]
    fn test_count_mismatch_exhausts_to_no_solution() {
        // One object, two goals: the heuristic reports the unreachable
        // sentinel and both engines exhaust the bounded state space.
        let level = level(&[
            "#####", //
            "#@$.#", //
            "#.###", //
            "#####",
        ]);
        for outcome in [solve_bfs(&level), solve_astar(&level)] {
            match outcome {
                SolveOutcome::NoSolution(stats) => assert!(stats.nodes_explored > 0),
                other => panic!("expected NoSolution, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_budget_times_out() {
        let level = level(&[
            "#####", //
            "#@$.#", //
            "#####",
        ]);
        match solve_bfs_with_budget(&level, Duration::ZERO) {
            SolveOutcome::TimedOut(stats) => assert_eq!(stats.nodes_explored, 0),
            other => panic!("expected TimedOut, got {:?}", other),
        }
        match solve_astar_with_budget(&level, Duration::ZERO) {
            SolveOutcome::TimedOut(stats) => assert_eq!(stats.nodes_explored, 0),
            other => panic!("expected TimedOut, got {:?}", other),
        }
    }

    #[test]
    fn test_astar_is_deterministic_across_runs() {
        let level = level(&[
            "######", //
            "#@   #", //
            "# $ .#", //
            "######",
        ]);
        let first = solve_astar(&level);
        let second = solve_astar(&level);
        assert_eq!(solved(&first).path, solved(&second).path);
        assert_eq!(
            solved(&first).stats.nodes_explored,
            solved(&second).stats.nodes_explored
        );
    }

    #[test]
    fn test_solutions_replay_to_a_goal_state() {
        let level = level(&[
            "######", //
            "#@   #", //
            "# $ .#", //
            "######",
        ]);
        let solution = solve_bfs(&level);
        let mut state = level.initial_state();
        let mut position = level.start_position();
        for &direction in &solved(&solution).path {
            let (next_state, next_position) = level.apply_move(&state, position, direction);
            assert_ne!(next_position, position, "replayed move had no effect");
            state = next_state;
            position = next_position;
        }
        assert!(level.is_goal(&state));
    }
}
