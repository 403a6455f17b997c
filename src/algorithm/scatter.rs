//! Seeded random placement for play-testing and benchmarks

use crate::io::error::Result;
use crate::spatial::board::{BoardState, PlacedTile, TileHandle};
use crate::spatial::grid::GridCell;
use crate::spatial::tiles::{Rotation, TileTypeId};
use rand::Rng;
use tracing::debug;

/// Place up to `count` random tiles on random empty cells
///
/// Candidate tile types are every catalog entry except the types of the fixed
/// start and goal tiles. Each placement picks a uniformly random empty cell,
/// tile type and rotation. Stops early when the board or roster runs out.
///
/// # Errors
///
/// Returns an error if a placement on a cell reported empty is rejected
pub fn scatter_tiles<R: Rng + ?Sized>(
    board: &mut BoardState,
    count: usize,
    rng: &mut R,
) -> Result<Vec<TileHandle>> {
    let fixed_types: Vec<TileTypeId> = [board.start_cell(), board.goal_cell()]
        .into_iter()
        .filter_map(|cell| board.at(cell).map(|tile| tile.tile_type.clone()))
        .collect();

    let roster: Vec<TileTypeId> = board
        .catalog()
        .ids()
        .filter(|id| !fixed_types.contains(id))
        .cloned()
        .collect();

    let mut empty: Vec<GridCell> = board.empty_cells().collect();
    let mut handles = Vec::with_capacity(count.min(empty.len()));

    if roster.is_empty() {
        return Ok(handles);
    }

    while handles.len() < count && !empty.is_empty() {
        let cell = empty.swap_remove(rng.random_range(0..empty.len()));
        let Some(tile_type) = roster.get(rng.random_range(0..roster.len())) else {
            break;
        };
        let rotation = Rotation::from_quarter_turns(rng.random_range(0..4));

        handles.push(board.place(PlacedTile::new(tile_type.clone(), cell, rotation))?);
    }

    debug!(requested = count, placed = handles.len(), "scattered tiles");

    Ok(handles)
}
