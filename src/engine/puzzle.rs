//! The runtime for one loaded level.
//!
//! `Puzzle` owns a grid and its runtime state and exposes the engine
//! surface:
//! - `load_level`: build a runtime from a level record
//! - `submit_swipe`: validate and commit a move
//! - `step`: advance animations by one tick and return events
//!
//! ## Tick order
//!
//! 1. Every tile advances its animation (scan order).
//! 2. Tiles whose jubilation ended while removable leave the grid.
//! 3. If any swipe settled during this tick, the resolver runs once and
//!    a match, if found, is applied.
//!
//! Events produced by `submit_swipe` are queued and returned by the next
//! `step`, ahead of that tick's own events.
//!
//! The runtime is single-threaded; hosts sharing one across callers must
//! serialize access to `step` and `submit_swipe` themselves.

use log::info;

use crate::connectivity::ConnectivityResolver;
use crate::core::{
    CameraSetup, EngineConfig, Grid, Level, LevelDataError, LevelRuntimeState, MotionChange, Position, TileId,
};
use crate::effects::EffectApplier;
use crate::events::Event;
use crate::swipe::{SwipeController, SwipeResult};

/// A playable level.
///
/// ## Usage
///
/// ```
/// use pipe_swipe::core::{EngineConfig, Level, Position};
/// use pipe_swipe::engine::Puzzle;
/// use pipe_swipe::events::Event;
///
/// // Start, empty cell, Goal on the top row; a straight pipe below the gap.
/// let level = Level::parse("5;0;0;-10;3\n2;0;3\n0;4;0\n").unwrap();
/// let mut puzzle = Puzzle::load_level(&level, EngineConfig::default()).unwrap();
///
/// assert!(puzzle.submit_swipe(Position::new(1, 0), Position::new(1, 1)).is_accepted());
/// let events = puzzle.step(1.0);
/// assert!(events.contains(&Event::LevelComplete));
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    config: EngineConfig,
    grid: Grid,
    state: LevelRuntimeState,
    camera: CameraSetup,
    pending: Vec<Event>,
}

impl Puzzle {
    /// Load a level as a standalone puzzle (level index 0).
    pub fn load_level(level: &Level, config: EngineConfig) -> Result<Self, LevelDataError> {
        Self::load_indexed(level, 0, config)
    }

    /// Load a level that sits at `level_index` in a campaign.
    pub fn load_indexed(level: &Level, level_index: usize, config: EngineConfig) -> Result<Self, LevelDataError> {
        let grid = Grid::from_level(level, &config)?;
        info!(
            "loaded level {level_index}: {}x{}, {} tiles, budget {}",
            grid.width(),
            grid.height(),
            grid.len(),
            level.budget()
        );
        Ok(Self {
            config,
            grid,
            state: LevelRuntimeState::new(level.budget(), level_index),
            camera: level.camera(),
            pending: Vec::new(),
        })
    }

    /// Wrap a hand-built grid.
    #[must_use]
    pub fn from_grid(grid: Grid, budget: u32, config: EngineConfig) -> Self {
        Self {
            config,
            grid,
            state: LevelRuntimeState::new(budget, 0),
            camera: CameraSetup::default(),
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn state(&self) -> &LevelRuntimeState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Camera metadata from the level header.
    #[must_use]
    pub fn camera(&self) -> CameraSetup {
        self.camera
    }

    #[must_use]
    pub fn budget(&self) -> u32 {
        self.state.budget
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    /// Whether any tile is still animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.grid.tiles().any(|t| !t.is_idle())
    }

    /// Try to move the tile at `origin` into `destination`.
    pub fn submit_swipe(&mut self, origin: Position, destination: Position) -> SwipeResult {
        SwipeController::submit(
            &mut self.grid,
            &mut self.state,
            origin,
            destination,
            &mut self.pending,
        )
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Vec<Event> {
        let mut events = std::mem::take(&mut self.pending);

        let mut settled = false;
        let mut finished: Vec<TileId> = Vec::new();
        for id in self.grid.tile_ids() {
            let Some(tile) = self.grid.tile_mut(id) else {
                continue;
            };
            match tile.advance(dt, &self.config) {
                Some(MotionChange::Settled) => settled = true,
                Some(MotionChange::JubilationFinished { removed: true }) => finished.push(id),
                Some(MotionChange::JubilationFinished { removed: false }) | None => {}
            }
        }

        for id in finished {
            if let Some(tile) = self.grid.remove(id) {
                events.push(Event::TileRemoved {
                    tile: id,
                    position: tile.position(),
                });
            }
        }

        if settled {
            if let Some(claim) = ConnectivityResolver::resolve(&self.grid) {
                events.extend(EffectApplier::apply(&mut self.grid, &mut self.state, &claim));
            }
        }

        events
    }

    /// Step with `dt` until no tile is animating, collecting every event.
    ///
    /// Gives up after `max_ticks` ticks.
    pub fn settle(&mut self, dt: f32, max_ticks: usize) -> Vec<Event> {
        let mut events = self.step(dt);
        for _ in 1..max_ticks {
            if !self.is_animating() {
                break;
            }
            events.extend(self.step(dt));
        }
        events
    }
}
