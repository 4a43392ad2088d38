//! Level construction utilities: the ASCII level format, the built-in level
//! set used by the binaries and tests, and a seeded random level generator.
use crate::engine::{Cell, Level};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// Parses an array of string slices into a [`Level`].
///
/// Each string slice represents one row, starting from row 0. The level
/// width is the length of the longest row; shorter rows are padded with
/// `Void` on the right, so maps with ragged outlines parse naturally.
///
/// Valid characters:
/// - `#`: `Cell::Wall`
/// - ` ` (space): `Cell::Floor`
/// - `@`: `Cell::Character`
/// - `$`: `Cell::MovableObject`
/// - `.`: `Cell::Goal`
/// - `&`: `Cell::HeavyCrate`
/// - `O`: `Cell::Pit`
/// - `-`: `Cell::Void`
///
/// Any other character is an error, as is any grid that fails level
/// validation (no rows, or not exactly one `@`).
///
/// # Arguments
/// * `rows`: the rows of the level, top to bottom.
///
/// # Returns
/// * `Ok(Level)` if parsing and validation succeed.
/// * `Err(String)` describing the offending character or the validation
///   failure otherwise.
///
/// # Examples
/// ```
/// use sokoslide_solver::utils::level_from_str_array;
///
/// let level = level_from_str_array(&[
///     "####",
///     "#@$.",
///     "####",
/// ]).unwrap();
/// assert_eq!(level.width(), 4);
/// assert_eq!(level.start_position(), 5);
/// assert_eq!(level.goal_indices(), &[7]);
///
/// assert!(level_from_str_array(&["#@X#"]).is_err());
/// ```
pub fn level_from_str_array(rows: &[&str]) -> Result<Level, String> {
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);

    let mut cells = Vec::with_capacity(rows.len() * width);
    for (r, row) in rows.iter().enumerate() {
        let mut count = 0;
        for (c, ch) in row.chars().enumerate() {
            let cell = match ch {
                '#' => Cell::Wall,
                ' ' => Cell::Floor,
                '@' => Cell::Character,
                '$' => Cell::MovableObject,
                '.' => Cell::Goal,
                '&' => Cell::HeavyCrate,
                'O' => Cell::Pit,
                '-' => Cell::Void,
                _ => {
                    return Err(format!(
                        "Unrecognized character '{}' in row {} col {}",
                        ch, r, c
                    ))
                }
            };
            cells.push(cell);
            count += 1;
        }
        // Pad ragged rows out to the full width.
        cells.resize(cells.len() + width - count, Cell::Void);
    }

    Level::new(cells, width).map_err(|e| format!("invalid level: {}", e))
}

/// Reads a level from a text file in the format accepted by
/// [`level_from_str_array`].
///
/// Empty lines are dropped, so maps may be padded with blank lines; leading
/// spaces are significant (they are floor cells) and are preserved.
pub fn level_from_file(path: &Path) -> Result<Level, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    let lines: Vec<&str> = content.lines().filter(|line| !line.is_empty()).collect();
    level_from_str_array(&lines)
}

/// Returns the built-in level set.
///
/// Index 0 is the reference level the solver was written against (three
/// objects, three goals, a pit-free maze); index 1 is a small sliding
/// corridor; index 2 exercises the heavy crate and the pit. All three are
/// solvable.
pub fn builtin_levels() -> Vec<Level> {
    let maps: [&[&str]; 3] = [
        &[
            "######-", //
            "#@#  #-", //
            "# #$ #-", //
            "# #. #-", //
            "#$## #-", //
            "#  # ##", //
            "#.  $.#", //
            "#######",
        ],
        &[
            "######", //
            "#@   #", //
            "# $ .#", //
            "######",
        ],
        &[
            "######", //
            "#@&  #", //
            "#  $.#", //
            "#  O #", //
            "######",
        ],
    ];
    maps.iter()
        .map(|rows| level_from_str_array(rows).expect("built-in level must parse"))
        .collect()
}

/// Generates a random open-room level: a walled rectangle whose interior
/// holds the character, `object_count` movable objects and as many goals,
/// all placed on distinct floor cells.
///
/// Generation is deterministic for a given seed, so the same arguments
/// always produce the same level; different seeds produce different
/// placements. Nothing guarantees the generated level is solvable; the
/// engines report `NoSolution` on the unlucky ones, which is exactly what
/// the comparison harness wants to measure.
///
/// # Arguments
/// * `width`, `height`: outer dimensions including the wall border; both
///   must be at least 3.
/// * `object_count`: how many object/goal pairs to place.
/// * `seed`: seed for the deterministic placement.
///
/// # Returns
/// * `Ok(Level)` on success.
/// * `Err(String)` when the dimensions leave too little interior for the
///   requested placements.
///
/// # Examples
/// ```
/// use sokoslide_solver::utils::random_level;
///
/// let a = random_level(7, 6, 2, 42).unwrap();
/// let b = random_level(7, 6, 2, 42).unwrap();
/// assert_eq!(a.initial_state(), b.initial_state());
/// ```
pub fn random_level(
    width: usize,
    height: usize,
    object_count: usize,
    seed: u64,
) -> Result<Level, String> {
    if width < 3 || height < 3 {
        return Err(format!(
            "level must be at least 3x3, got {}x{}",
            width, height
        ));
    }

    let mut cells = vec![Cell::Floor; width * height];
    for col in 0..width {
        cells[col] = Cell::Wall;
        cells[(height - 1) * width + col] = Cell::Wall;
    }
    for row in 0..height {
        cells[row * width] = Cell::Wall;
        cells[row * width + width - 1] = Cell::Wall;
    }

    let mut interior: Vec<usize> = (1..height - 1)
        .flat_map(|row| (1..width - 1).map(move |col| row * width + col))
        .collect();
    if interior.len() < 2 * object_count + 1 {
        return Err(format!(
            "a {}x{} level has room for {} pieces, needed {}",
            width,
            height,
            interior.len(),
            2 * object_count + 1
        ));
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    interior.shuffle(&mut rng);

    cells[interior[0]] = Cell::Character;
    for &index in &interior[1..=object_count] {
        cells[index] = Cell::MovableObject;
    }
    for &index in &interior[object_count + 1..=2 * object_count] {
        cells[index] = Cell::Goal;
    }

    Level::new(cells, width).map_err(|e| format!("generated level was invalid: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maps_every_symbol() {
        let level = level_from_str_array(&["# @$.&O-"]).unwrap();
        assert_eq!(
            level.initial_state().cells(),
            &[
                Cell::Wall,
                Cell::Floor,
                Cell::Character,
                Cell::MovableObject,
                Cell::Goal,
                Cell::HeavyCrate,
                Cell::Pit,
                Cell::Void,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_characters() {
        let result = level_from_str_array(&["#@X#"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unrecognized character 'X'"));
    }

    #[test]
    fn test_parse_pads_ragged_rows_with_void() {
        let level = level_from_str_array(&[
            "#@", //
            "#",
        ])
        .unwrap();
        assert_eq!(level.width(), 2);
        assert_eq!(level.initial_state().get(3), Cell::Void);
    }

    #[test]
    fn test_parse_rejects_missing_character() {
        let result = level_from_str_array(&["## ##"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no character cell"));
    }

    #[test]
    fn test_builtin_levels_are_well_formed() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 3);
        for level in &levels {
            assert!(!level.goal_indices().is_empty());
            let objects = level
                .initial_state()
                .cells()
                .iter()
                .filter(|&&c| c == Cell::MovableObject)
                .count();
            assert_eq!(objects, level.goal_indices().len());
        }
    }

    #[test]
    fn test_random_level_is_deterministic_per_seed() {
        let a = random_level(8, 6, 2, 7).unwrap();
        let b = random_level(8, 6, 2, 7).unwrap();
        let c = random_level(8, 6, 2, 8).unwrap();
        assert_eq!(a.initial_state(), b.initial_state());
        assert_ne!(a.initial_state(), c.initial_state());
    }

    #[test]
    fn test_random_level_places_the_requested_pieces() {
        let level = random_level(9, 7, 3, 0).unwrap();
        let state = level.initial_state();
        let count =
            |cell: Cell| state.cells().iter().filter(|&&c| c == cell).count();
        assert_eq!(count(Cell::Character), 1);
        assert_eq!(count(Cell::MovableObject), 3);
        assert_eq!(count(Cell::Goal), 3);

        // The border is solid wall.
        let width = level.width();
        for col in 0..width {
            assert_eq!(state.get(col), Cell::Wall);
            assert_eq!(state.get(state.len() - width + col), Cell::Wall);
        }
        for row in 0..state.len() / width {
            assert_eq!(state.get(row * width), Cell::Wall);
            assert_eq!(state.get(row * width + width - 1), Cell::Wall);
        }
    }

    #[test]
    fn test_random_level_rejects_overfull_rooms() {
        assert!(random_level(4, 4, 3, 0).is_err());
        assert!(random_level(2, 5, 1, 0).is_err());
    }
}
