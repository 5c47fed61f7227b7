//! # pipe-swipe
//!
//! A grid-based pipe-connection puzzle engine.
//!
//! A level is a rectangular grid of cells, some holding tiles with
//! directional pipe ports. The player swipes movable tiles into adjacent
//! empty cells; once a swipe settles, the engine looks for a chain of
//! matching ports linking a Start tile to an unclaimed Goal tile and
//! applies that goal's effect.
//!
//! ## Design Principles
//!
//! 1. **Presentation-free**: The engine never renders, plays sounds, or
//!    reads pointers. It consumes resolved cells and returns [`Event`]s.
//!
//! 2. **Tick-driven**: One `step(dt)` call per host frame advances every
//!    animation. Nothing blocks and nothing runs in the background.
//!
//! 3. **Positions are authoritative**: A swipe moves the tile on the grid
//!    immediately; animation timing only decides when the resolver runs.
//!
//! ## Modules
//!
//! - `core`: Tile ids, coordinates, tiles, grid, levels, configuration
//! - `events`: Events for rendering/audio/UI and swipe rejection reasons
//! - `swipe`: Swipe validation and commit
//! - `connectivity`: Start-to-Goal depth-first search
//! - `effects`: Goal effects and level completion
//! - `engine`: `Puzzle` runtime and `Campaign` level ordering

pub mod core;
pub mod events;
pub mod swipe;
pub mod connectivity;
pub mod effects;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    TileId, Direction, Position,
    EngineConfig,
    Tile, TileKind, TileSpec, GoalKind, PipeShape, MotionState, Ports,
    Grid, GridError,
    Level, CameraSetup, LevelDataError,
    LevelRuntimeState,
};

pub use crate::events::{Event, SwipeRejection};

pub use crate::swipe::{SwipeController, SwipeResult};

pub use crate::connectivity::{Claim, ConnectivityResolver};

pub use crate::effects::EffectApplier;

pub use crate::engine::{Campaign, CampaignError, LevelEntry, Puzzle};
