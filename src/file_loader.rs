//! Loading of maze description files.

use std::{fs, path::Path};

use tracing::info;

use crate::{config::SimConfig, error::LoadError, grid::Grid};

/// Built-in 10x10 maze used when no file is given.
///
/// Its entry is the top-left cell and its exit the east side of the bottom-right cell.
pub const DEFAULT_MAZE: &str = include_str!("../mazes/maze_10x10.dat");

/// Reads and parses the maze description at `path`.
///
/// # Errors
///
/// - [`LoadError::Open`] if the file cannot be read
/// - any error of [`Grid::parse`] if its contents are not a valid description
pub fn load(path: &Path, config: &SimConfig) -> Result<Grid, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    let grid = Grid::parse(&contents, config)?;

    info!(
        path = %path.display(),
        rows = grid.rows(),
        columns = grid.columns(),
        "maze loaded"
    );

    Ok(grid)
}

/// Parses the built-in maze.
///
/// # Errors
///
/// Only fails if [`DEFAULT_MAZE`] itself is malformed.
pub fn default_maze(config: &SimConfig) -> Result<Grid, LoadError> {
    let grid = Grid::parse(DEFAULT_MAZE, config)?;

    info!(rows = grid.rows(), columns = grid.columns(), "built-in maze loaded");

    Ok(grid)
}
