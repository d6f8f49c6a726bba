use std::fmt;

use thiserror::Error;

use crate::CellCoord;

/// Designated cells a level names explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelCell {
    /// Cell where the player starts.
    Entrance,
    /// Cell hosting the goal marker.
    Exit,
}

impl fmt::Display for LevelCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entrance => write!(f, "entrance"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Configuration errors detected while loading a level.
///
/// A level that fails validation never produces a session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LevelError {
    /// The grid contained no rows.
    #[error("maze grid has no rows")]
    EmptyGrid,
    /// A grid row contained no cells.
    #[error("maze row {row} has no cells")]
    EmptyRow {
        /// Index of the offending row.
        row: usize,
    },
    /// A grid row differed in length from the first row.
    #[error("maze row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A grid cell held a code other than wall or open.
    #[error("maze cell ({column}, {row}) has unknown code {code}")]
    InvalidCellCode {
        /// Column of the offending cell.
        column: usize,
        /// Row of the offending cell.
        row: usize,
        /// Raw code found in the level data.
        code: u8,
    },
    /// The grid exceeded the addressable coordinate range.
    #[error("maze grid is too large")]
    GridTooLarge,
    /// A designated cell fell outside the grid.
    #[error("{role} cell ({}, {}) lies outside the maze", .cell.column(), .cell.row())]
    CellOutOfBounds {
        /// Which designated cell was misplaced.
        role: LevelCell,
        /// Coordinate provided by the level.
        cell: CellCoord,
    },
    /// A designated cell pointed at a hedge.
    #[error("{role} cell ({}, {}) is a wall", .cell.column(), .cell.row())]
    CellIsWall {
        /// Which designated cell was misplaced.
        role: LevelCell,
        /// Coordinate provided by the level.
        cell: CellCoord,
    },
    /// The level requested a negative number of collectibles.
    #[error("collectible count must not be negative, got {0}")]
    NegativeCollectibleCount(i64),
    /// The floor size was zero, negative or not finite.
    #[error("floor size must be a positive finite number, got {0}")]
    InvalidFloorSize(f32),
    /// The wall height was zero, negative or not finite.
    #[error("wall height must be a positive finite number, got {0}")]
    InvalidWallHeight(f32),
    /// The goal trigger radius was zero, negative or not finite.
    #[error("trigger radius must be a positive finite number, got {0}")]
    InvalidTriggerRadius(f32),
    /// The score threshold for winning was zero.
    #[error("win threshold must be at least one")]
    ZeroWinThreshold,
}
