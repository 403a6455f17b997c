//! Mutable board of placed tiles keyed by grid cell
//!
//! The board owns the catalog and grid index it validates against. All
//! mutation goes through `place` and `rotate`; each successful mutation bumps
//! the revision so stale connectivity answers can be recognised.

use crate::io::error::{BoardError, Result, cell_out_of_bounds};
use crate::spatial::grid::{GridCell, GridIndex};
use crate::spatial::tiles::{Rotation, TileCatalog, TileTypeId};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Opaque handle the rendering layer uses to find a tile's mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileHandle(u64);

impl TileHandle {
    /// Raw handle value
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A tile type placed on a cell with a rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Tile template
    #[serde(rename = "tile")]
    pub tile_type: TileTypeId,
    /// Cell the tile occupies
    pub cell: GridCell,
    /// Clockwise rotation
    #[serde(default)]
    pub rotation: Rotation,
}

impl PlacedTile {
    /// Create a placement
    pub fn new(tile_type: impl Into<TileTypeId>, cell: GridCell, rotation: Rotation) -> Self {
        Self {
            tile_type: tile_type.into(),
            cell,
            rotation,
        }
    }
}

#[derive(Debug, Clone)]
struct Occupant {
    tile: PlacedTile,
    handle: TileHandle,
}

/// Placed tiles with fixed start and goal
#[derive(Debug, Clone)]
pub struct BoardState {
    grid: GridIndex,
    catalog: TileCatalog,
    /// Occupants indexed by (`row`, `col`)
    cells: Array2<Option<Occupant>>,
    start: GridCell,
    goal: GridCell,
    next_handle: u64,
    revision: u64,
    tile_count: usize,
}

impl BoardState {
    /// Create a board with the start and goal tiles already placed
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`BoardState::place`] for either fixed tile,
    /// including `CellOccupied` when start and goal share a cell
    pub fn new(
        grid: GridIndex,
        catalog: TileCatalog,
        start: PlacedTile,
        goal: PlacedTile,
    ) -> Result<Self> {
        let cells = Array2::from_elem((grid.rows(), grid.cols()), None);
        let mut board = Self {
            start: start.cell,
            goal: goal.cell,
            grid,
            catalog,
            cells,
            next_handle: 0,
            revision: 0,
            tile_count: 0,
        };

        board.place(start)?;
        board.place(goal)?;
        board.revision = 0;

        Ok(board)
    }

    /// Place a tile on an empty cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` for cells outside the grid, `UnknownTileType` if
    /// the catalog lacks the tile type, or `CellOccupied` if the cell holds a tile
    pub fn place(&mut self, tile: PlacedTile) -> Result<TileHandle> {
        let index = self.slot(tile.cell)?;

        if !self.catalog.contains(&tile.tile_type) {
            return Err(BoardError::UnknownTileType {
                id: tile.tile_type.to_string(),
            });
        }

        let handle = TileHandle(self.next_handle);
        let cell = tile.cell;
        let slot = self
            .cells
            .get_mut(index)
            .ok_or_else(|| cell_out_of_bounds(cell))?;

        if slot.is_some() {
            return Err(BoardError::CellOccupied { cell });
        }

        debug!(
            tile = %tile.tile_type,
            %cell,
            rotation = tile.rotation.degrees(),
            handle = handle.get(),
            "placed tile"
        );

        *slot = Some(Occupant { tile, handle });
        self.next_handle += 1;
        self.tile_count += 1;
        self.revision += 1;

        Ok(handle)
    }

    /// Rotate the tile at a cell by a further clockwise delta
    ///
    /// # Errors
    ///
    /// Returns `NoTileAtCell` if the cell is empty or outside the grid
    pub fn rotate(&mut self, cell: GridCell, delta: Rotation) -> Result<Rotation> {
        let occupant = self
            .slot(cell)
            .ok()
            .and_then(|index| self.cells.get_mut(index))
            .and_then(Option::as_mut)
            .ok_or(BoardError::NoTileAtCell { cell })?;

        let rotation = occupant.tile.rotation.then(delta);
        occupant.tile.rotation = rotation;
        self.revision += 1;

        debug!(%cell, rotation = rotation.degrees(), "rotated tile");

        Ok(rotation)
    }

    /// Tile occupying a cell, `None` when empty or out of bounds
    pub fn at(&self, cell: GridCell) -> Option<&PlacedTile> {
        self.occupant(cell).map(|occupant| &occupant.tile)
    }

    /// Rendering handle of the tile occupying a cell
    pub fn handle_at(&self, cell: GridCell) -> Option<TileHandle> {
        self.occupant(cell).map(|occupant| occupant.handle)
    }

    /// Fixed start position
    pub const fn start_cell(&self) -> GridCell {
        self.start
    }

    /// Fixed goal position
    pub const fn goal_cell(&self) -> GridCell {
        self.goal
    }

    /// Check whether a cell holds the start or goal tile
    pub fn is_fixed(&self, cell: GridCell) -> bool {
        cell == self.start || cell == self.goal
    }

    /// Mutation counter, bumped by every successful place or rotate
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of placed tiles, start and goal included
    pub const fn len(&self) -> usize {
        self.tile_count
    }

    /// Test if no tiles are placed (never true for a constructed board)
    pub const fn is_empty(&self) -> bool {
        self.tile_count == 0
    }

    /// Iterate placed tiles in row-major cell order
    pub fn tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.cells
            .iter()
            .filter_map(|slot| slot.as_ref().map(|occupant| &occupant.tile))
    }

    /// Iterate empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.grid.cells().filter(|&cell| self.at(cell).is_none())
    }

    /// Grid index the board validates against
    pub const fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Catalog the board validates against
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    fn occupant(&self, cell: GridCell) -> Option<&Occupant> {
        self.slot(cell)
            .ok()
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    fn slot(&self, cell: GridCell) -> Result<[usize; 2]> {
        if self.grid.contains(cell) {
            Ok([cell.row as usize, cell.col as usize])
        } else {
            Err(cell_out_of_bounds(cell))
        }
    }
}
