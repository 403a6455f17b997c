/// Rotation-aware effective edges of placed tiles
pub mod adjacency;
/// Dense visited set for board searches
pub mod bitset;
/// Start-to-goal canal search
pub mod connectivity;
/// Seeded random tile placement
pub mod scatter;
