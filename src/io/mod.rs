//! Input/output surfaces around the board core
//!
//! Error types, configuration constants, level files, logging setup and the
//! command-line batch runner.

/// Command-line interface and batch level processing
pub mod cli;
/// Board constants and the standard tile roster
pub mod configuration;
/// Error types shared by every module
pub mod error;
/// JSON level files and event replay
pub mod level;
/// Tracing subscriber setup
pub mod logging;
/// Multi-level progress display
pub mod progress;
