//! Core data model: tile identity, coordinates, tiles, grid, levels,
//! configuration and runtime state.
//!
//! Nothing in here knows about swipes or connectivity; those subsystems
//! drive the lifecycle through crate-private mutators.

pub mod entity;
pub mod direction;
pub mod config;
pub mod tile;
pub mod grid;
pub mod level;
pub mod state;

pub use entity::TileId;
pub use direction::{Direction, Position};
pub use config::EngineConfig;
pub use tile::{GoalKind, MotionChange, MotionState, PipeShape, Ports, Tile, TileKind, TileSpec};
pub use grid::{Grid, GridError};
pub use level::{CameraSetup, Level, LevelDataError};
pub use state::LevelRuntimeState;
