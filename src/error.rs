//! Typed errors of the maze core.

use std::{io, path::PathBuf};

/// Errors raised while loading a maze description.
///
/// Every variant is a load failure: the caller reports it and no simulation is started.
#[expect(
    clippy::module_name_repetitions,
    reason = "Error types are imported on their own, where a bare `Load` would be ambiguous."
)]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The maze file could not be opened or read.
    #[error("could not open maze file {}", .path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A token is not a non-negative integer.
    #[error("invalid value {token:?} at position {position} of the maze description")]
    InvalidToken {
        /// Zero-based index of the token in the stream.
        position: usize,
        /// The offending token.
        token: String,
    },
    /// The stream ended before every expected value was read.
    #[error("maze description ended early: expected {expected} values, found {found}")]
    Truncated {
        /// Number of values the dimensions call for, including the dimensions themselves.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },
    /// Rows or columns is zero.
    #[error("rows and columns cannot be zero (got {rows}x{columns})")]
    ZeroDimensions {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        columns: usize,
    },
    /// A cell mask has bits outside the four directions.
    #[error("cell ({row}, {column}) has wall mask {mask}, expected a value from 0 to 15")]
    InvalidWalls {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        column: usize,
        /// Mask found in the description.
        mask: u32,
    },
}

/// Errors raised while running a simulation without a frame clock.
#[expect(
    clippy::module_name_repetitions,
    reason = "Error types are imported on their own, where a bare `Simulation` would clash."
)]
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The mouse did not leave the maze within the allowed number of ticks.
    #[error("mouse did not reach the exit within {limit} ticks (stuck near cell ({row}, {column}))")]
    TickLimit {
        /// Tick budget that was exhausted.
        limit: u64,
        /// Row of the mouse when the budget ran out.
        row: usize,
        /// Column of the mouse when the budget ran out.
        column: usize,
    },
}
