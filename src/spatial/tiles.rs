//! Tile edge signatures, rotations and the tile catalog
//!
//! Each tile type carries a fixed 3x3 signature describing the canal pattern
//! across the tile at rotation 0. Only the four mid-edge cells and the centre
//! take part in connectivity; the corners are decorative.

use crate::io::configuration::STANDARD_ROSTER;
use crate::io::error::{BoardError, Result};
use crate::spatial::grid::Side;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// State of one cell inside a tile signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Canal water passes through
    Open,
    /// Solid ground, no canal
    Blocked,
    /// Raised wall, no canal
    Wall,
}

impl CellState {
    /// Decode a signature cell code (1 = open, 2 = blocked, 0 = wall)
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Wall),
            1 => Some(Self::Open),
            2 => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Encode back to a signature cell code
    pub const fn code(self) -> u8 {
        match self {
            Self::Wall => 0,
            Self::Open => 1,
            Self::Blocked => 2,
        }
    }
}

/// A 3x3 grid of cell states, row-major, top row first
pub type SignatureCells = [[CellState; 3]; 3];

/// Canal pattern of a tile type at rotation 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSignature {
    cells: SignatureCells,
}

impl EdgeSignature {
    /// Build a signature from explicit cell states
    pub const fn new(cells: SignatureCells) -> Self {
        Self { cells }
    }

    /// Decode nine row-major cell codes
    ///
    /// # Errors
    ///
    /// Returns `InvalidSignature` if any code is not 0, 1 or 2
    pub fn from_codes(id: &str, codes: [u8; 9]) -> Result<Self> {
        let mut cells = [[CellState::Blocked; 3]; 3];
        for (index, code) in codes.into_iter().enumerate() {
            let state = CellState::from_code(code).ok_or_else(|| BoardError::InvalidSignature {
                id: id.to_string(),
                reason: format!("cell {index} has unknown code {code}"),
            })?;
            if let Some(cell) = cells.get_mut(index / 3).and_then(|row| row.get_mut(index % 3)) {
                *cell = state;
            }
        }
        Ok(Self { cells })
    }

    /// Encode as nine row-major cell codes
    pub fn codes(&self) -> [u8; 9] {
        let mut codes = [0; 9];
        for (slot, state) in codes
            .iter_mut()
            .zip(self.cells.iter().flat_map(|row| row.iter()))
        {
            *slot = state.code();
        }
        codes
    }

    /// Raw cell grid
    pub const fn cells(&self) -> &SignatureCells {
        &self.cells
    }

    /// State of the centre cell
    pub const fn center(&self) -> CellState {
        self.cells[1][1]
    }

    /// State of the mid-edge cell on the given side
    pub const fn edge(&self, side: Side) -> CellState {
        match side {
            Side::Top => self.cells[0][1],
            Side::Right => self.cells[1][2],
            Side::Bottom => self.cells[2][1],
            Side::Left => self.cells[1][0],
        }
    }

    /// Signature after a clockwise rotation
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let mut result = *self;
        for _ in 0..rotation.quarter_turns() {
            result = result.rotate_90();
        }
        result
    }

    fn rotate_90(&self) -> Self {
        let n = 3;
        let mut rotated = self.cells;
        for (i, row) in rotated.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                if let Some(&val) = self.cells.get(n - 1 - j).and_then(|source| source.get(i)) {
                    *cell = val;
                }
            }
        }
        Self { cells: rotated }
    }
}

/// Clockwise rotation about the vertical axis in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    /// 0 degrees
    #[default]
    R0,
    /// 90 degrees
    R90,
    /// 180 degrees
    R180,
    /// 270 degrees
    R270,
}

impl Rotation {
    /// All rotations in increasing angle
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Rotation from a signed number of quarter turns, wrapping modulo four
    pub const fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }

    /// Rotation from signed degrees, wrapping modulo 360
    ///
    /// # Errors
    ///
    /// Returns `InvalidRotation` if `degrees` is not a multiple of 90
    pub const fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 == 0 {
            Ok(Self::from_quarter_turns(degrees / 90))
        } else {
            Err(BoardError::InvalidRotation { degrees })
        }
    }

    /// Number of clockwise quarter turns in `0..4`
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    /// Angle in degrees in `0..360`
    pub const fn degrees(self) -> i32 {
        self.quarter_turns() as i32 * 90
    }

    /// Apply a further rotation, wrapping modulo 360 degrees
    #[must_use]
    pub const fn then(self, delta: Self) -> Self {
        Self::from_quarter_turns((self.quarter_turns() + delta.quarter_turns()) as i32)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = BoardError;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Identifier of a tile template
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileTypeId(String);

impl TileTypeId {
    /// Create an identifier from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Identifier name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileTypeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TileTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of tile types and their edge signatures
///
/// Populated once at startup; lookups hand out copies so the registered
/// signatures can never be mutated through the catalog.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    signatures: HashMap<TileTypeId, EdgeSignature>,
    order: Vec<TileTypeId>,
}

impl TileCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the standard canal roster
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in roster table is malformed
    pub fn standard() -> Result<Self> {
        let mut catalog = Self::new();
        for (id, codes) in STANDARD_ROSTER {
            catalog.register(TileTypeId::new(id), EdgeSignature::from_codes(id, codes)?)?;
        }
        Ok(catalog)
    }

    /// Register a new tile type
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTileType` if the id is already registered
    pub fn register(&mut self, id: TileTypeId, signature: EdgeSignature) -> Result<()> {
        use std::collections::hash_map::Entry;

        match self.signatures.entry(id) {
            Entry::Occupied(entry) => Err(BoardError::DuplicateTileType {
                id: entry.key().to_string(),
            }),
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(signature);
                Ok(())
            }
        }
    }

    /// Look up the signature of a tile type
    ///
    /// # Errors
    ///
    /// Returns `UnknownTileType` if the id is not registered
    pub fn lookup(&self, id: &TileTypeId) -> Result<EdgeSignature> {
        self.signatures
            .get(id)
            .copied()
            .ok_or_else(|| BoardError::UnknownTileType { id: id.to_string() })
    }

    /// Check whether a tile type is registered
    pub fn contains(&self, id: &TileTypeId) -> bool {
        self.signatures.contains_key(id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &TileTypeId> {
        self.order.iter()
    }

    /// Number of registered tile types
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Test if no tile types are registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
