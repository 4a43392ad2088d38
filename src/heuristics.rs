//! Search-guidance heuristics: the Manhattan-distance move estimate used to
//! order the A* frontier, and the axis-pinning deadlock test both engines
//! use to discard unsolvable branches early.
use crate::engine::{Cell, Grid, Level};

/// Sentinel returned by [`estimate_remaining_moves`] when the number of
/// movable objects differs from the number of goals. Treated as infinity:
/// the node sinks to the back of the priority queue but is not pruned.
pub const UNREACHABLE: u32 = u32::MAX;

/// Manhattan distance between two cell indices on a grid of `width` columns.
fn manhattan(a: usize, b: usize, width: usize) -> u32 {
    let (row_a, col_a) = (a / width, a % width);
    let (row_b, col_b) = (b / width, b % width);
    (row_a.abs_diff(row_b) + col_a.abs_diff(col_b)) as u32
}

/// Estimates how many moves remain before `state` can be solved.
///
/// The estimate is the sum over all movable objects of the Manhattan
/// distance to the nearest goal (zero for an object already on a goal),
/// plus the Manhattan distance from the character to the nearest object
/// that still needs placing. It ignores obstacles and lets several objects
/// claim the same goal, so it is an ordering signal for best-first search,
/// not a provable lower bound.
///
/// Returns [`UNREACHABLE`] when the object count does not match the goal
/// count, since no sequence of moves can fix a count mismatch.
pub fn estimate_remaining_moves(level: &Level, state: &Grid, position: usize) -> u32 {
    let width = level.width();
    let goals = level.goal_indices();
    let objects: Vec<usize> = state
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == Cell::MovableObject)
        .map(|(i, _)| i)
        .collect();

    if objects.len() != goals.len() {
        return UNREACHABLE;
    }

    let mut total = 0u32;
    for &object in &objects {
        if goals.contains(&object) {
            continue;
        }
        let nearest = goals
            .iter()
            .map(|&goal| manhattan(object, goal, width))
            .min()
            .unwrap_or(0);
        total += nearest;
    }

    // Pull the character towards the nearest object that is not yet placed.
    let nearest_unplaced = objects
        .iter()
        .copied()
        .filter(|object| !goals.contains(object))
        .map(|object| manhattan(position, object, width))
        .min();
    if let Some(distance) = nearest_unplaced {
        total += distance;
    }

    total
}

/// Returns `true` when a cell rigidly obstructs a pinned object.
///
/// Only walls and void count: floor or goal neighbors can always be stepped
/// onto or pushed into later, so treating them as obstructions would flag
/// solvable states.
fn obstructs(cell: Cell) -> bool {
    matches!(cell, Cell::Wall | Cell::Void)
}

/// Structural deadlock test: flags `state` when some movable object not on
/// a goal is pinned on both axes.
///
/// An object is horizontally pinned when it sits in an interior column with
/// wall or void on both its left and right; vertically pinned likewise for
/// an interior row with wall or void above and below. An object pinned both
/// ways can never be moved again, so the state cannot be solved and the
/// search drops it.
///
/// This is a necessary-but-not-sufficient corner detector: multi-object
/// freeze patterns pass through it (the search still terminates, just more
/// slowly), but it never flags a solvable state.
pub fn is_deadlocked(level: &Level, state: &Grid) -> bool {
    let width = level.width();
    let height = state.len() / width;
    for (index, &cell) in state.cells().iter().enumerate() {
        if cell != Cell::MovableObject {
            continue;
        }
        if level.goal_indices().contains(&index) {
            continue;
        }

        let (row, col) = (index / width, index % width);
        let horizontally_pinned = col > 0
            && col < width - 1
            && obstructs(state.get(index - 1))
            && obstructs(state.get(index + 1));
        let vertically_pinned = row > 0
            && row < height - 1
            && obstructs(state.get(index - width))
            && obstructs(state.get(index + width));

        if horizontally_pinned && vertically_pinned {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Direction;
    use crate::utils::level_from_str_array;

    #[test]
    fn test_estimate_is_zero_when_solved() {
        let level = level_from_str_array(&[
            "#####", //
            "#@$.#", //
            "#####",
        ])
        .unwrap();
        let (solved, position) = level.apply_move(
            &level.initial_state(),
            level.start_position(),
            Direction::Right,
        );
        assert!(level.is_goal(&solved));
        assert_eq!(estimate_remaining_moves(&level, &solved, position), 0);
    }

    #[test]
    fn test_estimate_sums_object_and_player_terms() {
        let level = level_from_str_array(&[
            "#######", //
            "#@ $ .#", //
            "#######",
        ])
        .unwrap();
        // Object is two cells from the goal, character two cells from the
        // object.
        let estimate = estimate_remaining_moves(
            &level,
            &level.initial_state(),
            level.start_position(),
        );
        assert_eq!(estimate, 4);
    }

    #[test]
    fn test_estimate_uses_nearest_goal() {
        let level = level_from_str_array(&[
            "########", //
            "#.@$  .#", //
            "########",
        ])
        .unwrap();
        // Nearest goal is the left one at distance 2, not the right one at
        // distance 3; the character is adjacent to the object.
        let estimate = estimate_remaining_moves(
            &level,
            &level.initial_state(),
            level.start_position(),
        );
        assert_eq!(estimate, 3);
    }

    #[test]
    fn test_estimate_sentinel_on_count_mismatch() {
        let level = level_from_str_array(&[
            "######", //
            "#@$..#", //
            "######",
        ])
        .unwrap();
        let estimate = estimate_remaining_moves(
            &level,
            &level.initial_state(),
            level.start_position(),
        );
        assert_eq!(estimate, UNREACHABLE);
    }

    #[test]
    fn test_corner_pinned_object_is_deadlocked() {
        // The pocketed object has walls on both sides and void above and
        // below: pinned on both axes, off its goal.
        let level = level_from_str_array(&[
            "#####", //
            "#@#-#", //
            "# #$#", //
            "#.#-#", //
            "#####",
        ])
        .unwrap();
        let state = level.initial_state();
        assert!(is_deadlocked(&level, &state));
    }

    #[test]
    fn test_object_on_goal_is_never_deadlocked() {
        let level = level_from_str_array(&[
            "#####", //
            "#@$.#", //
            "#####",
        ])
        .unwrap();
        let (solved, _) = level.apply_move(
            &level.initial_state(),
            level.start_position(),
            Direction::Right,
        );
        // The placed object is wall-pinned on both axes but sits on a goal.
        assert!(!is_deadlocked(&level, &solved));
    }

    #[test]
    fn test_single_axis_pin_is_not_a_deadlock() {
        // Walls above and below only; the object can still move sideways.
        let level = level_from_str_array(&[
            "#####", //
            "#@# #", //
            "# $ #", //
            "# # #", //
            "#..##",
            "#####",
        ])
        .unwrap();
        assert!(!is_deadlocked(&level, &level.initial_state()));
    }

    #[test]
    fn test_goal_neighbors_never_count_as_obstruction() {
        // Goal cells beside the object on one axis: still solvable, so the
        // detector must stay quiet even though bare goals block walking.
        let level = level_from_str_array(&[
            "#####", //
            "#@# #", //
            "#.$.#", //
            "# # #", //
            "#####",
        ])
        .unwrap();
        assert!(!is_deadlocked(&level, &level.initial_state()));
    }

    #[test]
    fn test_border_objects_are_not_pinned_by_the_edge() {
        // An object in the first column cannot be horizontally pinned.
        let level = level_from_str_array(&[
            "#####", //
            "$@  #", //
            "#####",
        ])
        .unwrap();
        assert!(!is_deadlocked(&level, &level.initial_state()));
    }
}
