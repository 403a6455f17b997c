//! Board constants, the standard tile roster and runtime defaults

// Board geometry matching the 20x20 ground plane
/// Default number of board columns
pub const DEFAULT_BOARD_COLS: usize = 20;
/// Default number of board rows
pub const DEFAULT_BOARD_ROWS: usize = 20;
/// Default world-space edge length of one cell
pub const DEFAULT_CELL_SIZE: f64 = 1.0;
/// World (x, z) position of the centre of cell (0, 0)
pub const DEFAULT_BOARD_ORIGIN: [f64; 2] = [-9.0, -9.0];

// Safety limit to keep searches small
/// Maximum allowed board dimension along either axis
pub const MAX_BOARD_DIMENSION: usize = 256;

/// Default (col, row) of the start tile
pub const DEFAULT_START_CELL: [i32; 2] = [0, 0];
/// Default (col, row) of the goal tile
pub const DEFAULT_GOAL_CELL: [i32; 2] = [19, 19];

/// Tile type id of the fixed start tile
pub const START_TILE_ID: &str = "Start";
/// Tile type id of the fixed goal tile
pub const GOAL_TILE_ID: &str = "Goal";

/// Standard tile roster as row-major 3x3 cell codes (1 = open, 2 = blocked, 0 = wall)
pub const STANDARD_ROSTER: [(&str, [u8; 9]); 5] = [
    (START_TILE_ID, [2, 2, 2, 2, 1, 2, 2, 1, 2]),
    (GOAL_TILE_ID, [2, 1, 2, 2, 1, 2, 2, 2, 2]),
    // T-junction: top, right, bottom
    ("Tile_A", [2, 1, 2, 2, 1, 1, 2, 1, 2]),
    // Straight: top, bottom
    ("Tile_B", [2, 1, 2, 2, 1, 2, 2, 1, 2]),
    // Corner: top, right
    ("Tile_C", [2, 1, 2, 2, 1, 1, 2, 2, 2]),
];

// Default values for configurable parameters
/// Fixed seed for reproducible scatter placement
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Extension of level files picked up from a directory
pub const LEVEL_EXTENSION: &str = "json";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
