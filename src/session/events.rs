//! Input events delivered by the interaction layer

use crate::spatial::grid::GridCell;
use crate::spatial::tiles::{Rotation, TileTypeId};
use serde::{Deserialize, Serialize};

/// A tile prototype released over the ground plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Tile template being dropped
    #[serde(rename = "tile")]
    pub tile_type: TileTypeId,
    /// World x of the drop point
    #[serde(rename = "x")]
    pub world_x: f64,
    /// World z of the drop point
    #[serde(rename = "z")]
    pub world_z: f64,
    /// Rotation the prototype carried when dropped
    #[serde(default)]
    pub rotation: Rotation,
}

/// An explicit rotate action on a placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateEvent {
    /// Cell holding the tile to rotate
    pub cell: GridCell,
    /// Clockwise rotation to add
    pub delta: Rotation,
}

/// Any event the board controller accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// Place a tile at a world position
    Drop(DropEvent),
    /// Rotate a placed tile
    Rotate(RotateEvent),
    /// Tile released, connectivity must be reported
    Release,
}
