//! JSON level files: board geometry, optional tile roster, fixed tiles and a
//! recorded stream of interaction events
//!
//! Replaying a level feeds every event through a [`BoardController`] the way
//! the interaction layer would. Rejected events are recorded and skipped, and
//! a final release is always evaluated so every replay ends with a report.

use crate::algorithm::connectivity::ConnectivityReport;
use crate::io::configuration::{
    DEFAULT_BOARD_COLS, DEFAULT_BOARD_ORIGIN, DEFAULT_BOARD_ROWS, DEFAULT_CELL_SIZE,
    DEFAULT_GOAL_CELL, DEFAULT_START_CELL, GOAL_TILE_ID, START_TILE_ID,
};
use crate::io::error::{BoardError, Result, file_system_error};
use crate::session::controller::BoardController;
use crate::session::events::BoardEvent;
use crate::spatial::board::{BoardState, PlacedTile};
use crate::spatial::grid::{GridCell, GridIndex};
use crate::spatial::tiles::{EdgeSignature, Rotation, TileCatalog, TileTypeId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Board geometry section of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSpec {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// World-space edge length of one cell
    pub cell_size: f64,
    /// World (x, z) of the centre of cell (0, 0)
    pub origin: [f64; 2],
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            cols: DEFAULT_BOARD_COLS,
            rows: DEFAULT_BOARD_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            origin: DEFAULT_BOARD_ORIGIN,
        }
    }
}

/// One tile type entry of a custom roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    /// Tile type identifier
    pub id: TileTypeId,
    /// Row-major 3x3 cell codes (1 = open, 2 = blocked, 0 = wall)
    pub cells: [u8; 9],
}

/// A level as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    /// Board geometry
    #[serde(default)]
    pub board: BoardSpec,
    /// Custom tile roster, the standard roster when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<TileSpec>>,
    /// Fixed start tile
    #[serde(default = "default_start")]
    pub start: PlacedTile,
    /// Fixed goal tile
    #[serde(default = "default_goal")]
    pub goal: PlacedTile,
    /// Recorded interaction events in order
    #[serde(default)]
    pub events: Vec<BoardEvent>,
}

fn default_start() -> PlacedTile {
    PlacedTile::new(
        START_TILE_ID,
        GridCell::from(DEFAULT_START_CELL),
        Rotation::R0,
    )
}

fn default_goal() -> PlacedTile {
    PlacedTile::new(GOAL_TILE_ID, GridCell::from(DEFAULT_GOAL_CELL), Rotation::R0)
}

impl Default for LevelFile {
    fn default() -> Self {
        Self {
            board: BoardSpec::default(),
            catalog: None,
            start: default_start(),
            goal: default_goal(),
            events: Vec::new(),
        }
    }
}

/// An event the board refused during replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEvent {
    /// Position of the event in the level's event list
    pub index: usize,
    /// Why the board refused it
    pub reason: String,
}

/// Summary of a level replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelOutcome {
    /// Connectivity after the final release
    pub report: ConnectivityReport,
    /// Number of events applied successfully
    pub applied: usize,
    /// Events the board refused
    pub rejected: Vec<RejectedEvent>,
    /// Cells reachable from the start on the final board
    pub reachable: Vec<GridCell>,
}

impl LevelFile {
    /// Parse a level from JSON text
    ///
    /// # Errors
    ///
    /// Returns `LevelParse` if the text is not a valid level document
    pub fn from_json(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Load a level from a file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read or `LevelParse` if it
    /// is not a valid level document
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| file_system_error(path, "read level", source))?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| BoardError::LevelParse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Serialize the level as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the level cannot be encoded
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| BoardError::Serialization {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Grid index described by the board section
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for invalid geometry
    pub fn grid(&self) -> Result<GridIndex> {
        GridIndex::new(self.board.cols, self.board.rows, self.board.cell_size)?
            .with_origin(self.board.origin)
    }

    /// Catalog described by the level, or the standard roster
    ///
    /// # Errors
    ///
    /// Returns `InvalidSignature` or `DuplicateTileType` for a bad roster
    pub fn catalog(&self) -> Result<TileCatalog> {
        let Some(specs) = &self.catalog else {
            return TileCatalog::standard();
        };

        let mut catalog = TileCatalog::new();
        for spec in specs {
            let signature = EdgeSignature::from_codes(spec.id.as_str(), spec.cells)?;
            catalog.register(spec.id.clone(), signature)?;
        }
        Ok(catalog)
    }

    /// Board with the fixed start and goal placed
    ///
    /// # Errors
    ///
    /// Returns any geometry, roster or placement error of the fixed tiles
    pub fn build_board(&self) -> Result<BoardState> {
        BoardState::new(
            self.grid()?,
            self.catalog()?,
            self.start.clone(),
            self.goal.clone(),
        )
    }

    /// Controller owning a freshly built board
    ///
    /// # Errors
    ///
    /// Returns any error of [`LevelFile::build_board`]
    pub fn build_controller(&self) -> Result<BoardController> {
        self.build_board().map(BoardController::new)
    }

    /// Build a board and replay every event on it
    ///
    /// # Errors
    ///
    /// Returns any error of [`LevelFile::build_board`]; event rejections are
    /// reported in the outcome instead
    pub fn replay(&self) -> Result<LevelOutcome> {
        let mut controller = self.build_controller()?;
        Ok(self.replay_into(&mut controller, |_| {}))
    }

    /// Replay every event on an existing controller
    ///
    /// `on_event` is called with the number of events processed so far.
    pub fn replay_into<F>(&self, controller: &mut BoardController, mut on_event: F) -> LevelOutcome
    where
        F: FnMut(usize),
    {
        let mut applied = 0;
        let mut rejected = Vec::new();

        for (index, event) in self.events.iter().enumerate() {
            match controller.apply(event.clone()) {
                Ok(_) => applied += 1,
                Err(error) => {
                    debug!(index, %error, "event rejected");
                    rejected.push(RejectedEvent {
                        index,
                        reason: error.to_string(),
                    });
                }
            }
            on_event(index + 1);
        }

        let report = controller.handle_release().clone();
        let reachable = controller.reachable();

        LevelOutcome {
            report,
            applied,
            rejected,
            reachable,
        }
    }
}
