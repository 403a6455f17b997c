//! Single owner of the board that funnels every input event into it
//!
//! The controller keeps the current selection (the tile most recently
//! dropped) and the last connectivity report. A stored report is only handed
//! out while the board revision still matches it.

use crate::algorithm::connectivity::{ConnectivityEngine, ConnectivityReport};
use crate::io::error::{BoardError, Result};
use crate::session::events::{BoardEvent, DropEvent, RotateEvent};
use crate::spatial::board::{BoardState, PlacedTile, TileHandle};
use crate::spatial::grid::GridCell;
use crate::spatial::tiles::Rotation;
use tracing::debug;

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A tile was placed and selected
    Placed {
        /// Cell the tile landed on
        cell: GridCell,
        /// Rendering handle of the new tile
        handle: TileHandle,
    },
    /// A tile was rotated
    Rotated {
        /// Cell of the rotated tile
        cell: GridCell,
        /// Rotation after the update
        rotation: Rotation,
    },
    /// Connectivity was evaluated
    Evaluated(ConnectivityReport),
}

/// Event-driven owner of one board
#[derive(Debug, Clone)]
pub struct BoardController {
    board: BoardState,
    engine: ConnectivityEngine,
    selected: Option<GridCell>,
    last_report: Option<ConnectivityReport>,
}

impl BoardController {
    /// Take ownership of a board
    pub fn new(board: BoardState) -> Self {
        Self {
            board,
            engine: ConnectivityEngine::new(),
            selected: None,
            last_report: None,
        }
    }

    /// Read-only view of the board
    pub const fn board(&self) -> &BoardState {
        &self.board
    }

    /// Mutable access for bulk setup such as scatter placement
    pub fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    /// Give the board back
    pub fn into_board(self) -> BoardState {
        self.board
    }

    /// Cell of the current selection
    pub const fn selected(&self) -> Option<GridCell> {
        self.selected
    }

    /// Snap a drop to the grid, place the tile and select it
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the drop point is off the board, or any
    /// placement error from [`BoardState::place`]
    pub fn handle_drop(&mut self, event: DropEvent) -> Result<TileHandle> {
        self.drop_tile(event).map(|(_, handle)| handle)
    }

    fn drop_tile(&mut self, event: DropEvent) -> Result<(GridCell, TileHandle)> {
        let cell = self.board.grid().to_cell(event.world_x, event.world_z)?;
        let handle = self
            .board
            .place(PlacedTile::new(event.tile_type, cell, event.rotation))?;
        self.selected = Some(cell);
        Ok((cell, handle))
    }

    /// Rotate the tile at the event's cell
    ///
    /// # Errors
    ///
    /// Returns `NoTileAtCell` if the cell is empty
    pub fn handle_rotate(&mut self, event: RotateEvent) -> Result<Rotation> {
        self.board.rotate(event.cell, event.delta)
    }

    /// Rotate the current selection
    ///
    /// # Errors
    ///
    /// Returns `NothingSelected` if no tile has been dropped yet
    pub fn rotate_selected(&mut self, delta: Rotation) -> Result<Rotation> {
        let cell = self.selected.ok_or(BoardError::NothingSelected)?;
        self.board.rotate(cell, delta)
    }

    /// Evaluate connectivity after a tile is released
    pub fn handle_release(&mut self) -> &ConnectivityReport {
        let report = self.engine.is_connected(&self.board);
        debug!(
            connected = report.connected,
            revision = report.revision,
            "release evaluated"
        );
        self.last_report.insert(report)
    }

    /// Last report, only while the board is unchanged since it was computed
    pub fn last_report(&self) -> Option<&ConnectivityReport> {
        self.last_report
            .as_ref()
            .filter(|report| report.is_current(&self.board))
    }

    /// Cells currently reachable from the start
    pub fn reachable(&mut self) -> Vec<GridCell> {
        self.engine.reachable(&self.board)
    }

    /// Dispatch one event
    ///
    /// Failed events leave the board unchanged.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying drop or rotate handler
    pub fn apply(&mut self, event: BoardEvent) -> Result<EventOutcome> {
        match event {
            BoardEvent::Drop(event) => {
                let (cell, handle) = self.drop_tile(event)?;
                Ok(EventOutcome::Placed { cell, handle })
            }
            BoardEvent::Rotate(event) => {
                let rotation = self.handle_rotate(event)?;
                Ok(EventOutcome::Rotated {
                    cell: event.cell,
                    rotation,
                })
            }
            BoardEvent::Release => Ok(EventOutcome::Evaluated(self.handle_release().clone())),
        }
    }
}
