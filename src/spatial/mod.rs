//! Spatial data structures for the tile board
//!
//! This module contains spatial-related functionality including:
//! - Grid cells, sides and world-position snapping
//! - Tile edge signatures, rotations and the tile catalog
//! - Board state of placed tiles

/// Placed tiles keyed by grid cell
pub mod board;
/// Grid cells and world-plane indexing
pub mod grid;
/// Edge signatures and the tile catalog
pub mod tiles;

pub use board::BoardState;
