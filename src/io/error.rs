//! Error types for board, catalog and level operations

use crate::spatial::grid::GridCell;
use std::fmt;
use std::path::{Path, PathBuf};

/// Location that fell outside the configured board extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardPosition {
    /// A discrete grid cell
    Cell(GridCell),
    /// A continuous world-plane position (x, z)
    World([f64; 2]),
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(cell) => write!(f, "cell {cell}"),
            Self::World([x, z]) => write!(f, "world position ({x}, {z})"),
        }
    }
}

/// Main error type for all board operations
///
/// Every variant is a local, recoverable condition. The interaction layer
/// decides what the player sees (a rejected drop, a no-op rotate).
#[derive(Debug)]
pub enum BoardError {
    /// A tile type was registered twice in the same catalog
    DuplicateTileType {
        /// Identifier that already exists
        id: String,
    },

    /// A tile type is not present in the catalog
    UnknownTileType {
        /// Identifier that failed the lookup
        id: String,
    },

    /// A position lies outside the board extent
    OutOfBounds {
        /// Offending position
        position: BoardPosition,
    },

    /// The target cell already holds a tile
    CellOccupied {
        /// Occupied cell
        cell: GridCell,
    },

    /// A rotate targeted an empty cell
    NoTileAtCell {
        /// Empty cell
        cell: GridCell,
    },

    /// A selection-relative action arrived before any tile was selected
    NothingSelected,

    /// Rotation angle is not a whole number of quarter turns
    InvalidRotation {
        /// Requested angle in degrees
        degrees: i32,
    },

    /// Edge signature data could not be decoded
    InvalidSignature {
        /// Tile type the signature belongs to
        id: String,
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Level file is not valid JSON or does not match the level schema
    LevelParse {
        /// Path of the level file
        path: PathBuf,
        /// Underlying parser error
        source: serde_json::Error,
    },

    /// Level or result document could not be encoded as JSON
    Serialization {
        /// Destination the document was meant for
        path: PathBuf,
        /// Underlying encoder error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTileType { id } => {
                write!(f, "Tile type '{id}' is already registered")
            }
            Self::UnknownTileType { id } => write!(f, "Unknown tile type '{id}'"),
            Self::OutOfBounds { position } => write!(f, "{position} is outside the board"),
            Self::CellOccupied { cell } => write!(f, "Cell {cell} is already occupied"),
            Self::NoTileAtCell { cell } => write!(f, "No tile at cell {cell}"),
            Self::NothingSelected => write!(f, "No tile is selected"),
            Self::InvalidRotation { degrees } => {
                write!(f, "Rotation of {degrees} degrees is not a multiple of 90")
            }
            Self::InvalidSignature { id, reason } => {
                write!(f, "Invalid edge signature for '{id}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::LevelParse { path, source } => {
                write!(f, "Failed to parse level '{}': {source}", path.display())
            }
            Self::Serialization { path, source } => {
                write!(f, "Failed to serialize '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LevelParse { source, .. } | Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: &Path,
    operation: &'static str,
    source: std::io::Error,
) -> BoardError {
    BoardError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}

/// Create an out-of-bounds error for a grid cell
pub const fn cell_out_of_bounds(cell: GridCell) -> BoardError {
    BoardError::OutOfBounds {
        position: BoardPosition::Cell(cell),
    }
}
