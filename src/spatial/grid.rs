//! Discrete board coordinates and the world-plane grid index
//!
//! Maps continuous ground-plane positions onto integer cells by rounding to
//! the nearest cell centre. The index owns the board extent so every other
//! component validates bounds through it.

use crate::io::configuration::{DEFAULT_BOARD_ORIGIN, MAX_BOARD_DIMENSION};
use crate::io::error::{BoardError, BoardPosition, Result, cell_out_of_bounds, invalid_parameter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete board position as (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct GridCell {
    /// Column index, growing toward the right side
    pub col: i32,
    /// Row index, growing toward the bottom side
    pub row: i32,
}

impl GridCell {
    /// Create a cell from column and row
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Orthogonal neighbour across the given side
    ///
    /// `None` when the step leaves the `i32` coordinate range.
    #[must_use]
    pub const fn neighbor(self, side: Side) -> Option<Self> {
        let [dc, dr] = side.offset();
        let Some(col) = self.col.checked_add(dc) else {
            return None;
        };
        let Some(row) = self.row.checked_add(dr) else {
            return None;
        };
        Some(Self { col, row })
    }

    /// Side of `self` that faces `other`, if the two are orthogonal neighbours
    pub fn side_facing(self, other: Self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.neighbor(side) == Some(other))
    }
}

impl From<[i32; 2]> for GridCell {
    fn from([col, row]: [i32; 2]) -> Self {
        Self { col, row }
    }
}

impl From<GridCell> for [i32; 2] {
    fn from(cell: GridCell) -> Self {
        [cell.col, cell.row]
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One of the four sides of a tile, in search order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Toward row - 1
    Top,
    /// Toward col + 1
    Right,
    /// Toward row + 1
    Bottom,
    /// Toward col - 1
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this side in [`Side::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Side at the given clockwise index, wrapping modulo four
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// Side facing this one on the neighbouring tile
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Side reached after `quarter_turns` clockwise turns
    #[must_use]
    pub const fn turned_clockwise(self, quarter_turns: usize) -> Self {
        Self::from_index(self.index() + quarter_turns % 4)
    }

    /// (column, row) step toward the neighbour across this side
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::Top => [0, -1],
            Self::Right => [1, 0],
            Self::Bottom => [0, 1],
            Self::Left => [-1, 0],
        }
    }
}

/// Bounded mapping between world-plane positions and grid cells
///
/// Cell (0, 0) is centred on `origin`; columns advance along world x and rows
/// along world z, each by `cell_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridIndex {
    cols: usize,
    rows: usize,
    cell_size: f64,
    origin: [f64; 2],
}

impl GridIndex {
    /// Create a grid index with the default origin
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or exceeds
    /// `MAX_BOARD_DIMENSION`, or if `cell_size` is not a positive finite number
    pub fn new(cols: usize, rows: usize, cell_size: f64) -> Result<Self> {
        for (parameter, value) in [("cols", cols), ("rows", rows)] {
            if value == 0 || value > MAX_BOARD_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_BOARD_DIMENSION}"),
                ));
            }
        }

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be a positive finite number",
            ));
        }

        Ok(Self {
            cols,
            rows,
            cell_size,
            origin: DEFAULT_BOARD_ORIGIN,
        })
    }

    /// Replace the world position of the centre of cell (0, 0)
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either coordinate is not finite
    pub fn with_origin(mut self, origin: [f64; 2]) -> Result<Self> {
        if origin.iter().any(|value| !value.is_finite()) {
            return Err(invalid_parameter(
                "origin",
                &format!("{origin:?}"),
                &"coordinates must be finite",
            ));
        }
        self.origin = origin;
        Ok(self)
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// World-space edge length of one cell
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World (x, z) position of the centre of cell (0, 0)
    pub const fn origin(&self) -> [f64; 2] {
        self.origin
    }

    /// Total number of cells on the board
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Check whether a cell lies inside the extent
    pub const fn contains(&self, cell: GridCell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && (cell.col as usize) < self.cols
            && (cell.row as usize) < self.rows
    }

    /// Row-major dense index of a cell, `None` when out of bounds
    pub const fn index_of(&self, cell: GridCell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.cols + cell.col as usize)
        } else {
            None
        }
    }

    /// Cell at a row-major dense index, `None` past the last cell
    pub const fn cell_at(&self, index: usize) -> Option<GridCell> {
        if index < self.cell_count() {
            Some(GridCell::new(
                (index % self.cols) as i32,
                (index / self.cols) as i32,
            ))
        } else {
            None
        }
    }

    /// Snap a world-plane position to the nearest cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either coordinate is not finite or the nearest
    /// cell lies outside the extent
    pub fn to_cell(&self, world_x: f64, world_z: f64) -> Result<GridCell> {
        let out_of_bounds = || BoardError::OutOfBounds {
            position: BoardPosition::World([world_x, world_z]),
        };

        let col = ((world_x - self.origin[0]) / self.cell_size).round();
        let row = ((world_z - self.origin[1]) / self.cell_size).round();

        // Range check before casting so huge inputs never saturate into range
        if !col.is_finite()
            || !row.is_finite()
            || col < 0.0
            || row < 0.0
            || col >= self.cols as f64
            || row >= self.rows as f64
        {
            return Err(out_of_bounds());
        }

        Ok(GridCell::new(col as i32, row as i32))
    }

    /// World-plane position (x, z) of a cell centre
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the cell lies outside the extent
    pub fn to_world(&self, cell: GridCell) -> Result<[f64; 2]> {
        if !self.contains(cell) {
            return Err(cell_out_of_bounds(cell));
        }
        Ok([
            self.origin[0] + f64::from(cell.col) * self.cell_size,
            self.origin[1] + f64::from(cell.row) * self.cell_size,
        ])
    }

    /// Iterate every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.cell_count()).filter_map(|index| self.cell_at(index))
    }
}
