//! The occupancy grid.
//!
//! `Grid` owns every tile of a level and the `width × height` array of
//! cells referencing them. It enforces:
//! - at most one tile per cell,
//! - no tile referenced by two cells,
//! - `tile.position()` always equal to the cell that references it.
//!
//! Cells live in an `im::Vector` and tiles in an `im::HashMap`, so cloning
//! a grid (for snapshots or restarts) is O(1). A grid serializes with
//! serde; a deserialized grid is not re-validated, so check
//! [`Grid::is_consistent`] when the source is untrusted.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::EngineConfig;
use super::direction::Position;
use super::entity::TileId;
use super::level::{check_rectangular, Level, LevelDataError};
use super::tile::{Tile, TileSpec};

/// Errors from direct grid edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("cell {0} is already occupied")]
    Occupied(Position),

    #[error("cell {0} does not hold the expected tile")]
    NotAtPosition(Position),

    #[error("no tile with id {0}")]
    UnknownTile(TileId),

    #[error("a {width}x{height} grid has too many cells")]
    TooLarge { width: usize, height: usize },
}

/// Grid of optional tile references.
///
/// ## Usage
///
/// ```
/// use pipe_swipe::core::{Direction, GoalKind, Grid, PipeShape, Position, TileSpec};
///
/// let mut grid = Grid::new(3, 1);
/// let start = grid.place(Position::new(0, 0), TileSpec::start([Direction::Right])).unwrap();
/// grid.place(Position::new(1, 0), TileSpec::pipe(PipeShape::Horizontal)).unwrap();
/// grid.place(Position::new(2, 0), TileSpec::goal(GoalKind::Score, [Direction::Left])).unwrap();
///
/// assert_eq!(grid.len(), 3);
/// assert_eq!(grid.tile_id_at(Position::new(0, 0)), Some(start));
/// assert!(!grid.is_within_bounds(Position::new(3, 0)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,

    /// Row-major cells: index = y * width + x.
    cells: Vector<Option<TileId>>,

    tiles: ImHashMap<TileId, Tile>,

    next_id: TileId,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`. Use [`Grid::try_new`]
    /// for dimensions that come from outside the program.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create an empty grid, failing with [`GridError::TooLarge`] when the
    /// cell count overflows.
    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        let cells = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: std::iter::repeat(None).take(cells).collect(),
            tiles: ImHashMap::new(),
            next_id: TileId(0),
        })
    }

    /// Build a grid from rows of tile codes (top row first).
    ///
    /// Every code is validated before the grid is returned; on error
    /// nothing is retained.
    pub fn load(rows: &[Vec<i32>], config: &EngineConfig) -> Result<Self, LevelDataError> {
        check_rectangular(rows)?;

        let height = rows.len();
        let width = rows[0].len();

        // Validate everything first, then build in scan order.
        let mut specs = Vec::with_capacity(width * height);
        for (row, cells) in rows.iter().enumerate() {
            let y = (height - 1 - row) as i32;
            for (column, &code) in cells.iter().enumerate() {
                let spec = TileSpec::from_code(code, config)
                    .map_err(|code| LevelDataError::UnknownTileCode { code, row, column })?;
                if let Some(spec) = spec {
                    specs.push((Position::new(column as i32, y), spec));
                }
            }
        }
        specs.sort_by_key(|(pos, _)| (pos.y, pos.x));

        let mut grid = Self::new(width, height);
        for (pos, spec) in specs {
            grid.insert(pos, spec);
        }
        Ok(grid)
    }

    /// Build a grid from a level record.
    pub fn from_level(level: &Level, config: &EngineConfig) -> Result<Self, LevelDataError> {
        Self::load(level.rows(), config)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn is_within_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// The tile occupying `pos`, if any. Out-of-bounds positions are empty.
    #[must_use]
    pub fn tile_id_at(&self, pos: Position) -> Option<TileId> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.tile_id_at(pos).and_then(|id| self.tiles.get(&id))
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    /// Whether `pos` is inside the grid and unoccupied.
    #[must_use]
    pub fn is_free(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i].is_none())
    }

    /// Place a new tile on an empty cell.
    pub fn place(&mut self, pos: Position, spec: TileSpec) -> Result<TileId, GridError> {
        let index = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        if self.cells[index].is_some() {
            return Err(GridError::Occupied(pos));
        }
        Ok(self.insert(pos, spec))
    }

    fn insert(&mut self, pos: Position, spec: TileSpec) -> TileId {
        let id = self.next_id;
        self.next_id = id.next();
        if let Some(index) = self.index(pos) {
            self.cells.set(index, Some(id));
        }
        self.tiles.insert(id, Tile::from_spec(id, pos, spec));
        id
    }

    /// Move a tile between cells, clearing `from` and filling `to` together.
    ///
    /// The tile's position is updated here; motion state is untouched.
    pub fn move_tile(&mut self, id: TileId, from: Position, to: Position) -> Result<(), GridError> {
        let from_index = self.index(from).ok_or(GridError::OutOfBounds(from))?;
        let to_index = self.index(to).ok_or(GridError::OutOfBounds(to))?;
        if self.cells[from_index] != Some(id) {
            return Err(GridError::NotAtPosition(from));
        }
        if self.cells[to_index].is_some() {
            return Err(GridError::Occupied(to));
        }
        let tile = self.tiles.get_mut(&id).ok_or(GridError::UnknownTile(id))?;
        tile.set_position(to);
        self.cells.set(from_index, None);
        self.cells.set(to_index, Some(id));
        Ok(())
    }

    /// Remove a tile, clearing its cell.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.tiles.remove(&id)?;
        if let Some(index) = self.index(tile.position()) {
            if self.cells[index] == Some(id) {
                self.cells.set(index, None);
            }
        }
        Some(tile)
    }

    /// All tiles in scan order (row-major over `(y, x)`).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells
            .iter()
            .filter_map(move |cell| cell.and_then(|id| self.tiles.get(&id)))
    }

    /// Tile ids in scan order.
    #[must_use]
    pub fn tile_ids(&self) -> Vec<TileId> {
        self.tiles().map(Tile::id).collect()
    }

    /// Start tiles in scan order.
    pub fn start_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles().filter(|t| t.is_start())
    }

    /// Check the occupancy invariant.
    ///
    /// Every tile is referenced by exactly one cell, and that cell is the
    /// tile's position.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut referenced = 0;
        for (index, cell) in self.cells.iter().enumerate() {
            let Some(id) = cell else { continue };
            let Some(tile) = self.tiles.get(id) else {
                return false;
            };
            if self.index(tile.position()) != Some(index) {
                return false;
            }
            referenced += 1;
        }
        referenced == self.tiles.len()
    }
}
