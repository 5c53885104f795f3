//! Grid model of a loaded maze.
//!
//! A [`Grid`] owns `rows x columns` [`Cell`]s in row-major order. Walls are recorded per cell:
//! the east wall of one cell says nothing about the west wall of its neighbour, and nothing here
//! assumes the two agree.

use crate::{
    config::SimConfig,
    direction::{Direction, Walls},
    error::LoadError,
};

/// One cell of the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Horizontal scene coordinate of the cell center.
    pub center_x: f32,
    /// Vertical scene coordinate of the cell center, growing downwards.
    pub center_y: f32,
    /// Walls present on the sides of the cell.
    pub walls: Walls,
    /// Whether a bread crumb has been dropped here.
    pub visited: bool,
}

/// Static representation of a maze.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Number of rows, always positive.
    rows: usize,
    /// Number of columns, always positive.
    columns: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Horizontal coordinate past which the mouse has left the maze.
    exit_x: f32,
}

impl Grid {
    /// Parses a maze description.
    ///
    /// The description is a stream of whitespace-separated integers: rows, columns, then one wall
    /// bitmask per cell in row-major order (north 1, east 2, south 4, west 8). This function reads
    /// the two dimensions first and rejects a zero in either before looking at any cell, then
    /// reads exactly `rows * columns` masks, placing each cell center with
    /// [`SimConfig::cell_center`]. Anything after the last cell is ignored, so a file may carry
    /// trailing notes. The start cell is marked visited and the exit line is derived from the
    /// last column.
    ///
    /// # Errors
    ///
    /// - [`LoadError::InvalidToken`] if a value is not a non-negative integer
    /// - [`LoadError::Truncated`] if the stream ends early
    /// - [`LoadError::ZeroDimensions`] if rows or columns is zero
    /// - [`LoadError::InvalidWalls`] if a mask is greater than 15
    pub fn parse(input: &str, config: &SimConfig) -> Result<Self, LoadError> {
        let mut tokens = input.split_whitespace().enumerate();

        let rows: usize = next_value(&mut tokens, 0, 2)?;
        let columns: usize = next_value(&mut tokens, 1, 2)?;
        if rows == 0 || columns == 0 {
            return Err(LoadError::ZeroDimensions { rows, columns });
        }

        let count = rows.saturating_mul(columns);
        let mut cells = Vec::new();
        for index in 0..count {
            let (row, column) = (index / columns, index % columns);
            let mask: u32 = next_value(&mut tokens, index + 2, count.saturating_add(2))?;
            let walls = u8::try_from(mask)
                .ok()
                .and_then(Walls::from_bits)
                .ok_or(LoadError::InvalidWalls { row, column, mask })?;

            cells.push(Cell {
                center_x: config.cell_center(column),
                center_y: config.cell_center(row),
                walls,
                visited: false,
            });
        }

        if let Some(start) = cells.first_mut() {
            start.visited = true;
        }

        Ok(Self {
            rows,
            columns,
            cells,
            exit_x: config.cell_center(columns - 1) + config.cell_size / 2.,
        })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Horizontal coordinate the mouse must reach to have left the maze: the center of the
    /// bottom-right cell plus half a cell.
    pub const fn exit_x(&self) -> f32 {
        self.exit_x
    }

    /// Returns the cell at `row`, `column`, if it is inside the grid.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Iterates over `(row, column, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let columns = self.columns;

        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (index / columns, index % columns, cell))
    }

    /// Whether the cell at `row`, `column` has a wall on its `direction` side.
    ///
    /// Cells outside the grid count as walled on every side.
    pub fn wall_present(&self, row: usize, column: usize, direction: Direction) -> bool {
        match self.cell(row, column) {
            Some(cell) => cell.walls.contains(direction),
            None => true,
        }
    }

    /// Whether the mouse can move one cell in `direction` from `row`, `column`.
    ///
    /// The side must be free of walls and the neighbour must be inside the grid, except for the
    /// exit move east out of the bottom-right cell.
    pub fn is_open(&self, row: usize, column: usize, direction: Direction) -> bool {
        if self.wall_present(row, column, direction) {
            return false;
        }

        match direction.step(row, column) {
            Some((next_row, next_column)) if next_row < self.rows && next_column < self.columns => {
                true
            }
            _ => self.is_exit(row, column, direction),
        }
    }

    /// Whether moving in `direction` from `row`, `column` leaves the maze through its exit.
    ///
    /// The maze has a single exit: the east side of the bottom-right cell. A gap in the east
    /// side of any other cell of the last column is treated as walled, so a mouse finding one
    /// turns away instead of finishing there.
    pub fn is_exit(&self, row: usize, column: usize, direction: Direction) -> bool {
        direction == Direction::East && row + 1 == self.rows && column + 1 == self.columns
    }

    /// Drops a bread crumb in the cell at `row`, `column`. Cells outside the grid are ignored.
    pub fn mark_visited(&mut self, row: usize, column: usize) {
        if row < self.rows && column < self.columns {
            if let Some(cell) = self.cells.get_mut(row * self.columns + column) {
                cell.visited = true;
            }
        }
    }
}

/// Reads the next token of a maze description as an unsigned integer.
///
/// `found` is the number of values read so far and `expected` the total the description should
/// hold; both are only used to report a truncated stream.
fn next_value<'input, T, I>(tokens: &mut I, found: usize, expected: usize) -> Result<T, LoadError>
where
    T: std::str::FromStr,
    I: Iterator<Item = (usize, &'input str)>,
{
    let Some((position, token)) = tokens.next() else {
        return Err(LoadError::Truncated { expected, found });
    };
    let Ok(value) = token.parse() else {
        return Err(LoadError::InvalidToken {
            position,
            token: token.to_owned(),
        });
    };

    Ok(value)
}
