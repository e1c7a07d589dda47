use crate::error::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::trace;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rows (\d+)\s+cols (\d+)").expect("header pattern is a valid regex")
});
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*m (.*)$").expect("row pattern is a valid regex"));

// Row-major (dx, dy) offsets of the Moore neighbourhood
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A point on the grid.
///
/// Moving "right" increases `x` and moving "down" increases `y`.
/// Positions are unbounded until they are wrapped into a set of [`Dimensions`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Wraps the position onto the torus described by `dimensions`.
    pub fn wrap(self, dimensions: Dimensions) -> Position {
        dimensions.wrap(self)
    }
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position {
            x: value.0,
            y: value.1,
        }
    }
}

/// The fixed width and height of a toroidal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width: i32,
    height: i32,
}

// Deserialized sides still go through `Dimensions::new`
#[derive(Deserialize)]
struct RawDimensions {
    width: i32,
    height: i32,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = Error;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.width, raw.height)
    }
}

impl Dimensions {
    /// Creates new dimensions.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if either side is zero or negative.
    pub fn new(width: i32, height: i32) -> Result<Dimensions, Error> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Dimensions { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of positions on the grid.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Maps any position into `[0, width) x [0, height)` using floored modulo,
    /// so `-1` becomes `width - 1` and `width` becomes `0`.
    pub fn wrap(&self, position: Position) -> Position {
        self.wrap_offset(position, 0, 0)
    }

    /// Wraps `position + (dx, dy)` without overflowing on extreme coordinates.
    pub(crate) fn wrap_offset(&self, position: Position, dx: i32, dy: i32) -> Position {
        let x = (position.x as i64 + dx as i64).rem_euclid(self.width as i64);
        let y = (position.y as i64 + dy as i64).rem_euclid(self.height as i64);

        // Both values are below a positive i32 side, so the casts are lossless
        Position {
            x: x as i32,
            y: y as i32,
        }
    }
}

/// Wraps `position` onto the torus described by `dimensions`.
pub fn wrap(position: Position, dimensions: Dimensions) -> Position {
    dimensions.wrap(position)
}

/// The state of a single location on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub alive: bool,
}

impl Cell {
    pub fn new(position: Position, alive: bool) -> Cell {
        Cell { position, alive }
    }

    fn dead(position: Position) -> Cell {
        Cell {
            position,
            alive: false,
        }
    }

    /// Returns the same cell with its state flipped.
    pub fn toggle(self) -> Cell {
        Cell {
            position: self.position,
            alive: !self.alive,
        }
    }
}

/// A snapshot of one generation on a toroidal grid.
///
/// Only known cells are stored; any position without an entry is dead.
#[derive(Clone, Debug)]
pub struct Grid {
    dimensions: Dimensions,
    cells: HashMap<Position, Cell>,
}

impl Grid {
    pub fn new(dimensions: Dimensions) -> Grid {
        Grid {
            dimensions,
            cells: HashMap::new(),
        }
    }

    /// Parses a grid from its text map representation.
    ///
    /// The map starts with a `rows <height>` / `cols <width>` header followed by one
    /// `m <cells>` line per row, where `#` or `o` is a live cell and `.` a dead one.
    /// Rows that are not listed are dead.
    ///
    /// # Errors
    /// Fails if the header is missing, a side is zero, a cell character is unknown
    /// or the listed cells do not fit inside the header size.
    pub fn parse(map_contents: &str) -> Result<Grid, Error> {
        let metadata = HEADER.captures(map_contents).ok_or(Error::InvalidHeader)?;

        let height: i32 = metadata[1].parse().map_err(|_| Error::InvalidHeader)?;
        let width: i32 = metadata[2].parse().map_err(|_| Error::InvalidHeader)?;

        let mut grid = Grid::new(Dimensions::new(width, height)?);

        for (row, captures) in ROW.captures_iter(map_contents).enumerate() {
            if row >= height as usize {
                return Err(Error::PatternOutOfBounds { row, col: 0 });
            }

            let line = captures[1].trim();

            for (col, value) in line.chars().enumerate() {
                if col >= width as usize {
                    return Err(Error::PatternOutOfBounds { row, col });
                }

                match value {
                    '.' => {}
                    '#' | 'o' | 'O' => grid.set_cell(Position::new(col as i32, row as i32), true),
                    _ => return Err(Error::InvalidCell { row, col, value }),
                }
            }
        }

        Ok(grid)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Stores the wrapped position as alive or dead.
    pub fn set_cell(&mut self, position: Position, alive: bool) {
        let position = self.dimensions.wrap(position);
        self.cells.insert(position, Cell::new(position, alive));
    }

    /// Returns the cell at the wrapped position, dead if nothing is stored there.
    pub fn get_cell(&self, position: Position) -> Cell {
        let position = self.dimensions.wrap(position);
        self.cells
            .get(&position)
            .copied()
            .unwrap_or_else(|| Cell::dead(position))
    }

    pub fn toggle_cell(&mut self, position: Position) {
        let cell = self.get_cell(position).toggle();
        self.cells.insert(cell.position, cell);
    }

    /// The eight wrapped positions around `position`, in row-major order.
    ///
    /// On grids narrower or shorter than 3 some of them coincide.
    pub fn neighbors(&self, position: Position) -> [Position; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.dimensions.wrap_offset(position, dx, dy))
    }

    pub fn live_neighbor_count(&self, position: Position) -> u8 {
        self.neighbors(position)
            .iter()
            .filter(|neighbor| self.is_alive(**neighbor))
            .count() as u8
    }

    /// Applies the Game of Life rule to the cell at `position`.
    ///
    /// A live cell survives with 2 or 3 live neighbours and a dead cell is born with
    /// exactly 3. Every other cell dies or stays dead.
    pub fn should_live(&self, position: Position) -> bool {
        let alive = self.is_alive(position);

        match (alive, self.live_neighbor_count(position)) {
            // Underpopulation or overpopulation
            (true, count) if !(2..=3).contains(&count) => false,
            // Reproduction
            (false, 3) => true,
            _ => alive,
        }
    }

    /// Computes the successor of this grid.
    ///
    /// Only the known cells and their neighbours can change, so those are the only
    /// positions evaluated. The returned grid stores live cells only.
    pub fn next_generation(&self) -> Grid {
        let mut candidates = HashSet::with_capacity(self.cells.len() * 9);
        for &position in self.cells.keys() {
            candidates.insert(position);
            candidates.extend(self.neighbors(position));
        }

        trace!(
            candidates = candidates.len(),
            known = self.cells.len(),
            "evaluating candidates"
        );

        let mut next = Grid::new(self.dimensions);
        for position in candidates {
            if self.should_live(position) {
                next.set_cell(position, true);
            }
        }

        next
    }

    /// All live positions, sorted row by row.
    pub fn live_cells(&self) -> Vec<Position> {
        let mut live: Vec<Position> = self
            .cells
            .values()
            .filter(|cell| cell.alive)
            .map(|cell| cell.position)
            .collect();
        live.sort_by_key(|position| (position.y, position.x));
        live
    }

    pub fn population(&self) -> usize {
        self.cells.values().filter(|cell| cell.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    fn is_alive(&self, position: Position) -> bool {
        self.cells
            .get(&self.dimensions.wrap(position))
            .is_some_and(|cell| cell.alive)
    }
}

// Two grids are equal when they share dimensions and live cells,
// regardless of any explicitly stored dead entries.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.live_cells() == other.live_cells()
    }
}

impl Eq for Grid {}
