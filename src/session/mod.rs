//! Event-driven board ownership for the interaction layer

/// Board controller funnelling events into one board
pub mod controller;
/// Drop, rotate and release events
pub mod events;

pub use controller::BoardController;
