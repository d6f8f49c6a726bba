//! Occupancy grid and the affine mapping from grid cells into world space.

use crate::{CellCoord, LevelError, WorldPosition};

const WALL_CODE: u8 = 1;
const OPEN_CODE: u8 = 0;

/// Classification of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCode {
    /// Cell blocked by a hedge.
    Wall,
    /// Walkable cell.
    Open,
}

impl CellCode {
    /// Decodes a raw level code, returning `None` for unknown values.
    #[must_use]
    pub const fn from_raw(code: u8) -> Option<Self> {
        match code {
            WALL_CODE => Some(Self::Wall),
            OPEN_CODE => Some(Self::Open),
            _ => None,
        }
    }
}

/// Rectangular occupancy grid describing the maze layout.
///
/// The grid is validated once on construction and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellCode>,
}

impl Grid {
    /// Builds a grid from raw rows of level codes (`1` for walls, `0` for open cells).
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, LevelError>
    where
        R: AsRef<[u8]>,
    {
        let first = rows.first().ok_or(LevelError::EmptyGrid)?;
        let width = first.as_ref().len();
        if width == 0 {
            return Err(LevelError::EmptyRow { row: 0 });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }

            for (column_index, raw) in row.iter().copied().enumerate() {
                let code = CellCode::from_raw(raw).ok_or(LevelError::InvalidCellCode {
                    column: column_index,
                    row: row_index,
                    code: raw,
                })?;
                cells.push(code);
            }
        }

        let columns = u32::try_from(width).map_err(|_| LevelError::GridTooLarge)?;
        let rows = u32::try_from(rows.len()).map_err(|_| LevelError::GridTooLarge)?;
        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate addresses a cell of this grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the code stored at the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn code(&self, cell: CellCoord) -> Option<CellCode> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Iterates every cell in row-major order alongside its code.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellCode)> + '_ {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(index, code)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *code)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Affine transform between grid cells and world-space positions.
///
/// The floor is centred on the world origin. Column indices grow towards
/// positive `x`, row indices grow towards negative `z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTransform {
    origin_x: f32,
    origin_z: f32,
    cell_size: f32,
    floor_size: f32,
    columns: u32,
    rows: u32,
}

impl GridTransform {
    /// Derives the transform for `grid` laid out on a square floor of `floor_size` units.
    ///
    /// Cell size is `floor_size / rows`, so non-square grids keep square cells.
    pub fn for_grid(grid: &Grid, floor_size: f32) -> Result<Self, LevelError> {
        if !floor_size.is_finite() || floor_size <= 0.0 {
            return Err(LevelError::InvalidFloorSize(floor_size));
        }

        Ok(Self {
            origin_x: -floor_size / 2.0,
            origin_z: floor_size / 2.0,
            cell_size: floor_size / grid.rows() as f32,
            floor_size,
            columns: grid.columns(),
            rows: grid.rows(),
        })
    }

    /// Side length of a single cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Side length of the floor in world units.
    #[must_use]
    pub const fn floor_size(&self) -> f32 {
        self.floor_size
    }

    /// Maps a cell onto its world-space anchor.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the grid the transform was built for.
    #[must_use]
    pub fn cell_to_world(&self, cell: CellCoord) -> WorldPosition {
        assert!(
            cell.column() < self.columns && cell.row() < self.rows,
            "cell ({}, {}) lies outside the {}x{} grid",
            cell.column(),
            cell.row(),
            self.columns,
            self.rows,
        );

        WorldPosition::new(
            self.origin_x + cell.column() as f32 * self.cell_size,
            self.origin_z - cell.row() as f32 * self.cell_size,
        )
    }

    /// Maps a world-space position back onto the nearest grid cell.
    ///
    /// Returns `None` for non-finite positions and positions whose nearest
    /// anchor lies outside the grid.
    #[must_use]
    pub fn world_to_cell(&self, position: WorldPosition) -> Option<CellCoord> {
        if !position.is_finite() {
            return None;
        }

        let column = ((position.x() - self.origin_x) / self.cell_size).round();
        let row = ((self.origin_z - position.z()) / self.cell_size).round();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        if column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }

        Some(CellCoord::new(column as u32, row as u32))
    }
}
