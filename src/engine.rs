//! Core game engine for the slide-and-push puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Cell`: the closed set of terrain and piece values a grid cell can hold.
//! - `Direction`: the four movement directions and their row-major offsets.
//! - `Grid`: a row-major cell vector with a fixed width, used both as the
//!   level terrain and as the search state snapshot.
//! - `Level`: a validated level (grid, goal indices, start position) exposing
//!   the movement resolver (`apply_move`) and the win test (`is_goal`).
use derive_more::{Display, Error};
use std::fmt;

/// Represents the semantic value of a single grid cell.
///
/// Exactly one value applies to a cell at any time; the character and the
/// movable pieces replace the terrain value of the cell they occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable wall.
    Wall,
    /// Open floor the character can slide across.
    Floor,
    /// The player character. A valid level holds exactly one.
    Character,
    /// A pushable object that must end on a goal cell to win.
    MovableObject,
    /// A marked floor cell; the level is solved when every goal holds a
    /// movable object. The character cannot step onto a bare goal.
    Goal,
    /// A secondary pushable piece with no goal requirement.
    HeavyCrate,
    /// A hazard cell; stepping onto it is an invalid move (not a restart).
    Pit,
    /// Space outside the playable area.
    Void,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// This is the inverse of the mapping used by
    /// [`crate::utils::level_from_str_array`] and is primarily used for
    /// text-based display of grids.
    ///
    /// # Examples
    ///
    /// ```
    /// use sokoslide_solver::engine::Cell;
    /// assert_eq!(Cell::Wall.to_char(), '#');
    /// assert_eq!(Cell::MovableObject.to_char(), '$');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => ' ',
            Cell::Character => '@',
            Cell::MovableObject => '$',
            Cell::Goal => '.',
            Cell::HeavyCrate => '&',
            Cell::Pit => 'O',
            Cell::Void => '-',
        }
    }
}

/// The four movement directions.
///
/// A logical move is one direction; the resolver decides how far the
/// character actually travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order the search engines try them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the row-major index offset for this direction on a grid of
    /// the given `width`: up is `-width`, down is `+width`, left is `-1`,
    /// right is `+1`.
    pub fn offset(self, width: usize) -> isize {
        match self {
            Direction::Up => -(width as isize),
            Direction::Down => width as isize,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl fmt::Display for Direction {
    /// Formats the direction as the lowercase word used in printed solutions.
    ///
    /// ```
    /// use sokoslide_solver::engine::Direction;
    /// assert_eq!(Direction::Up.to_string(), "up");
    /// assert_eq!(Direction::Right.to_string(), "right");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", word)
    }
}

/// A row-major grid of cells with a fixed width.
///
/// `Grid` has value semantics: cloning one copies every cell, and two grids
/// are equal iff their cell sequences are equal element-wise. Together with
/// the derived `Hash` this lets a grid serve directly as (part of) the
/// visited-set key during search, without ordering artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
}

impl Grid {
    /// Returns the row length of the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the grid.
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Returns the cells as a flat row-major slice.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Applies `offset` to `index`, returning `None` when the result falls
    /// outside the cell vector. This guards array bounds only; row wrapping
    /// for horizontal offsets is the caller's concern.
    pub(crate) fn offset_index(&self, index: usize, offset: isize) -> Option<usize> {
        let next = index as isize + offset;
        if next < 0 || next as usize >= self.cells.len() {
            None
        } else {
            Some(next as usize)
        }
    }
}

impl fmt::Display for Grid {
    /// Formats the grid as one text line per row using [`Cell::to_char`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.width == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

/// The ways level construction can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum InvalidLevelError {
    /// The declared width was zero.
    #[display("level width must be greater than zero")]
    ZeroWidth,
    /// The cell count is not a multiple of the declared width.
    #[display("cell count must be a multiple of the level width")]
    RaggedGrid,
    /// No cell holds the character.
    #[display("level has no character cell")]
    MissingCharacter,
    /// More than one cell holds the character.
    #[display("level has more than one character cell")]
    MultipleCharacters,
}

/// A validated, immutable puzzle level.
///
/// A `Level` is built once from a cell vector and a width, and is read-only
/// afterwards. It records the goal-cell indices and the character's start
/// index at construction time so every later win test and heuristic reuses
/// them, and it exposes the movement resolver that the search engines (and a
/// replay host) drive.
///
/// # Examples
/// ```
/// use sokoslide_solver::engine::{Cell, Level};
///
/// let cells = vec![
///     Cell::Wall, Cell::Wall, Cell::Wall,
///     Cell::Wall, Cell::Character, Cell::Wall,
///     Cell::Wall, Cell::Wall, Cell::Wall,
/// ];
/// let level = Level::new(cells, 3).unwrap();
/// assert_eq!(level.start_position(), 4);
/// assert_eq!(level.width(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Level {
    grid: Grid,
    goals: Vec<usize>,
    start: usize,
}

impl Level {
    /// Builds a level from a row-major cell vector and its row width.
    ///
    /// The goal indices are scanned once here; the character cell must occur
    /// exactly once.
    ///
    /// # Arguments
    /// * `cells`: the grid contents, row-major.
    /// * `width`: the row length.
    ///
    /// # Returns
    /// * `Ok(Level)` on success.
    /// * `Err(InvalidLevelError)` if `width` is zero, the cell count is not
    ///   a multiple of `width`, or the number of character cells is not
    ///   exactly one.
    pub fn new(cells: Vec<Cell>, width: usize) -> Result<Self, InvalidLevelError> {
        if width == 0 {
            return Err(InvalidLevelError::ZeroWidth);
        }
        if cells.len() % width != 0 {
            return Err(InvalidLevelError::RaggedGrid);
        }

        let mut starts = cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Character)
            .map(|(i, _)| i);
        let start = starts.next().ok_or(InvalidLevelError::MissingCharacter)?;
        if starts.next().is_some() {
            return Err(InvalidLevelError::MultipleCharacters);
        }

        let goals = cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Goal)
            .map(|(i, _)| i)
            .collect();

        Ok(Level {
            grid: Grid { cells, width },
            goals,
            start,
        })
    }

    /// Returns the row length of the level.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Returns the total number of cells in the level.
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Returns the indices of all goal cells, fixed at construction.
    pub fn goal_indices(&self) -> &[usize] {
        &self.goals
    }

    /// Returns the character's start index.
    pub fn start_position(&self) -> usize {
        self.start
    }

    /// Returns a fresh copy of the starting grid.
    pub fn initial_state(&self) -> Grid {
        self.grid.clone()
    }

    /// Tests whether `state` is solved: every goal index holds a movable
    /// object. Goal cells currently occupied by a pushed-in object read as
    /// `MovableObject`, which is exactly what this checks.
    pub fn is_goal(&self, state: &Grid) -> bool {
        self.goals
            .iter()
            .all(|&g| state.get(g) == Cell::MovableObject)
    }

    /// Resolves one logical move: the character slides in `direction` until
    /// it collides with something, possibly pushing one adjacent piece.
    ///
    /// The rules, evaluated for the cell immediately adjacent in
    /// `direction`:
    /// 1. Out of bounds: no effect.
    /// 2. `Pit`: no effect (an invalid move, not a level restart).
    /// 3. `Floor`: the character moves onto it and keeps sliding cell by
    ///    cell as long as the next cell ahead is also `Floor`; it stops at
    ///    the first collision. One call can advance several cells.
    /// 4. `HeavyCrate`: pushed one cell, only onto `Floor`; the character
    ///    takes the crate's cell and does not continue sliding.
    /// 5. `MovableObject`: pushed one cell, only onto `Floor` or `Goal`, and
    ///    only if the object is not already sitting on a goal index.
    /// 6. Anything else (`Wall`, bare `Goal`, `Void`): no effect.
    ///
    /// The function is pure: `state` is never mutated, and identical inputs
    /// produce identical outputs. When the returned position equals the
    /// input position the move had no effect, and callers must not treat it
    /// as a successor.
    ///
    /// # Arguments
    /// * `state`: the grid to move in.
    /// * `position`: the character's current index in `state`.
    /// * `direction`: the direction to move.
    ///
    /// # Returns
    /// The resulting `(grid, position)` pair; the inputs unchanged when the
    /// move is invalid.
    ///
    /// # Examples
    /// ```
    /// use sokoslide_solver::engine::Direction;
    /// use sokoslide_solver::utils::level_from_str_array;
    ///
    /// let level = level_from_str_array(&[
    ///     "######",
    ///     "#@   #",
    ///     "######",
    /// ]).unwrap();
    /// let start = level.start_position();
    /// // One logical move slides the character all the way to the wall.
    /// let (_, position) = level.apply_move(&level.initial_state(), start, Direction::Right);
    /// assert_eq!(position, start + 3);
    /// ```
    pub fn apply_move(&self, state: &Grid, position: usize, direction: Direction) -> (Grid, usize) {
        let offset = direction.offset(self.width());
        let Some(target) = state.offset_index(position, offset) else {
            return (state.clone(), position);
        };

        match state.get(target) {
            Cell::Floor => {
                let mut next = state.clone();
                let mut current = position;
                let mut dest = target;
                // Bounded by the grid length: every iteration moves the
                // character one cell further in a fixed direction.
                loop {
                    next.set(current, Cell::Floor);
                    next.set(dest, Cell::Character);
                    current = dest;
                    match next.offset_index(current, offset) {
                        Some(beyond) if next.get(beyond) == Cell::Floor => dest = beyond,
                        _ => break,
                    }
                }
                (next, current)
            }
            Cell::HeavyCrate => match state.offset_index(target, offset) {
                Some(beyond) if state.get(beyond) == Cell::Floor => {
                    let mut next = state.clone();
                    next.set(position, Cell::Floor);
                    next.set(target, Cell::Character);
                    next.set(beyond, Cell::HeavyCrate);
                    (next, target)
                }
                _ => (state.clone(), position),
            },
            Cell::MovableObject => {
                // An object already resting on a goal is locked in place.
                if self.goals.contains(&target) {
                    return (state.clone(), position);
                }
                match state.offset_index(target, offset) {
                    Some(beyond) if matches!(state.get(beyond), Cell::Floor | Cell::Goal) => {
                        let mut next = state.clone();
                        next.set(position, Cell::Floor);
                        next.set(target, Cell::Character);
                        next.set(beyond, Cell::MovableObject);
                        (next, target)
                    }
                    _ => (state.clone(), position),
                }
            }
            // Pit is an invalid move rather than a restart; walls, bare
            // goals and void all simply block.
            Cell::Pit | Cell::Wall | Cell::Goal | Cell::Void | Cell::Character => {
                (state.clone(), position)
            }
        }
    }

    /// Generates all effective moves from `(state, position)`.
    ///
    /// For each of the four directions this rejects left/right moves that
    /// would wrap across a row boundary, resolves the move, and keeps it
    /// only if the character's position changed. Both search engines expand
    /// nodes through this method.
    pub fn successors(&self, state: &Grid, position: usize) -> Vec<(Grid, usize, Direction)> {
        let width = self.width();
        let mut moves = Vec::new();
        for direction in Direction::ALL {
            if matches!(direction, Direction::Left | Direction::Right) {
                let neighbor = position as isize + direction.offset(width);
                if neighbor < 0 || neighbor as usize / width != position / width {
                    continue;
                }
            }
            let (next_state, next_position) = self.apply_move(state, position, direction);
            if next_position != position {
                moves.push((next_state, next_position, direction));
            }
        }
        moves
    }
}
