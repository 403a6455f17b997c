//! Tile adjacency and canal connectivity for a tile-placement puzzle
//!
//! Tile types declare a fixed 3x3 edge signature. Tiles placed on a bounded
//! grid with a rotation expose effective open/blocked sides, and a
//! breadth-first search decides whether an unbroken canal links the start
//! tile to the goal tile.

#![forbid(unsafe_code)]

/// Adjacency resolution and connectivity search
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Event-driven board ownership for the interaction layer
pub mod session;
/// Grid indexing, tile signatures and board state
pub mod spatial;

pub use io::error::{BoardError, Result};
