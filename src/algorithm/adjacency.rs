//! Rotation-aware edge resolution for placed tiles
//!
//! The catalog keeps every signature at rotation 0; rotation is applied here
//! so the same permutation law holds for every tile type.

use crate::io::error::Result;
use crate::spatial::board::PlacedTile;
use crate::spatial::grid::Side;
use crate::spatial::tiles::{CellState, TileCatalog};

/// Whether a canal can leave a tile across one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeState {
    /// Canal continues across the side
    Open,
    /// Nothing passes
    Blocked,
}

/// Effective open/blocked state of a placed tile's four sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectiveEdges {
    top: EdgeState,
    right: EdgeState,
    bottom: EdgeState,
    left: EdgeState,
}

impl EffectiveEdges {
    /// Build from states in `Side::ALL` order
    pub const fn new([top, right, bottom, left]: [EdgeState; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// State on one side
    pub const fn side(&self, side: Side) -> EdgeState {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Check whether one side is open
    pub const fn is_open(&self, side: Side) -> bool {
        matches!(self.side(side), EdgeState::Open)
    }

    /// Open sides in `Side::ALL` order
    pub fn open_sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(|&side| self.is_open(side))
    }

    /// States in `Side::ALL` order
    pub const fn as_array(&self) -> [EdgeState; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// Resolves effective edges against a catalog
#[derive(Debug, Clone, Copy)]
pub struct AdjacencyResolver<'a> {
    catalog: &'a TileCatalog,
}

impl<'a> AdjacencyResolver<'a> {
    /// Create a resolver over a catalog
    pub const fn new(catalog: &'a TileCatalog) -> Self {
        Self { catalog }
    }

    /// Effective edges of a placed tile after its rotation
    ///
    /// A side is open only when both its mid-edge cell and the centre cell are
    /// open. Walls count as blocked.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTileType` if the catalog has no signature for the tile
    pub fn effective_edges(&self, tile: &PlacedTile) -> Result<EffectiveEdges> {
        let signature = self.catalog.lookup(&tile.tile_type)?.rotated(tile.rotation);
        let center_open = signature.center() == CellState::Open;

        let mut sides = [EdgeState::Blocked; 4];
        for (state, side) in sides.iter_mut().zip(Side::ALL) {
            if center_open && signature.edge(side) == CellState::Open {
                *state = EdgeState::Open;
            }
        }

        Ok(EffectiveEdges::new(sides))
    }

    /// Check whether two placed tiles share an open canal edge
    ///
    /// True only for orthogonal neighbours whose facing sides are both open.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTileType` if either tile is missing from the catalog
    pub fn connects(&self, from: &PlacedTile, to: &PlacedTile) -> Result<bool> {
        let Some(side) = from.cell.side_facing(to.cell) else {
            return Ok(false);
        };

        Ok(self.effective_edges(from)?.is_open(side)
            && self.effective_edges(to)?.is_open(side.opposite()))
    }
}
