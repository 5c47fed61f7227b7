//! Connectivity resolution: find a Start linked to an open Goal.
//!
//! ## Algorithm
//!
//! Start tiles are tried in grid scan order, skipping used-up ones. From
//! each, a depth-first search follows ports:
//!
//! 1. A tile is *linked* if it is the Start being tracked, or it has a port
//!    facing the direction the search arrived from. Unlinked tiles end the
//!    branch and are not added to the path.
//! 2. Reaching any Start tile (including a used-up one mid-path) makes it
//!    the tracked Start and resets the path, so a claim path only holds
//!    tiles since the most recent Start.
//! 3. A linked, unclaimed Goal ends the search successfully; the search
//!    never continues through it.
//! 4. Otherwise every port except the arrival side is followed into the
//!    occupied neighbour, which must in turn pass the linkage test from
//!    the opposite side.
//!
//! Each search keeps a visited set keyed by `TileId`. A tile is marked
//! once it is linked, so pipe rings and multi-port junctions terminate.
//! The search runs on an explicit stack, and the route is kept in a single
//! buffer, so arbitrarily long pipes need neither deep recursion nor
//! per-step copies of the path.
//!
//! The first Start whose search reaches a Goal wins.

use log::debug;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{Direction, Grid, Tile, TileId};

/// A successful match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    /// The Start tile the search began from.
    pub source: TileId,

    /// The Goal that was reached.
    pub goal: TileId,

    /// Linked tiles from the most recent Start to the Goal, inclusive.
    pub path: Vec<TileId>,
}

impl Claim {
    /// First tile of the path: the most recent Start on it.
    #[must_use]
    pub fn path_start(&self) -> Option<TileId> {
        self.path.first().copied()
    }
}

/// Depth-first search from Start tiles to open Goal tiles.
pub struct ConnectivityResolver;

impl ConnectivityResolver {
    /// Try every unused Start tile in scan order and return the first match.
    #[must_use]
    pub fn resolve(grid: &Grid) -> Option<Claim> {
        let starts: SmallVec<[TileId; 8]> = grid
            .start_tiles()
            .filter(|t| !t.used_up())
            .map(Tile::id)
            .collect();

        for start in starts {
            if let Some(claim) = Self::resolve_from(grid, start) {
                debug!(
                    "start {} reaches goal {} via {} tiles",
                    claim.source,
                    claim.goal,
                    claim.path.len()
                );
                return Some(claim);
            }
        }
        None
    }

    /// Search from one specific Start tile.
    ///
    /// Returns `None` if `start` is missing, is not a Start tile, or
    /// reaches no open Goal. Used-up Starts are searched like any other.
    #[must_use]
    pub fn resolve_from(grid: &Grid, start: TileId) -> Option<Claim> {
        let tile = grid.tile(start)?;
        if !tile.is_start() {
            return None;
        }

        let mut search = Search {
            grid,
            visited: FxHashSet::default(),
            stack: Vec::new(),
            path: Vec::new(),
        };
        let (goal, path) = search.run(start)?;
        Some(Claim {
            source: start,
            goal,
            path,
        })
    }
}

/// One tile on the current search route.
struct Frame {
    tile: TileId,
    /// Side the search entered through; `None` for the searching Start.
    incoming: Option<Direction>,
    /// Most recent Start on the route.
    tracked_start: TileId,
    /// Index in `Search::path` where the claim path begins.
    base: usize,
    /// Next entry of the tile's ports to try.
    next_port: usize,
}

/// Depth-first search with an explicit stack.
///
/// `path` always mirrors `stack`: entry `i` is the tile of frame `i`.
struct Search<'g> {
    grid: &'g Grid,
    visited: FxHashSet<TileId>,
    stack: Vec<Frame>,
    path: Vec<TileId>,
}

impl Search<'_> {
    fn run(&mut self, start: TileId) -> Option<(TileId, Vec<TileId>)> {
        if let Some(found) = self.enter(start, None, start, 0) {
            return Some(found);
        }

        let grid = self.grid;
        while let Some(frame) = self.stack.last_mut() {
            let port = grid
                .tile(frame.tile)
                .and_then(|tile| tile.ports().get(frame.next_port).map(|&dir| (tile, dir)));
            let Some((tile, dir)) = port else {
                // Ports exhausted: backtrack.
                self.stack.pop();
                self.path.pop();
                continue;
            };
            frame.next_port += 1;
            if Some(dir) == frame.incoming {
                continue;
            }

            let (tracked_start, base) = (frame.tracked_start, frame.base);
            let Some(next) = grid.tile_id_at(tile.position().step(dir)) else {
                continue;
            };
            if let Some(found) = self.enter(next, Some(dir.opposite()), tracked_start, base) {
                return Some(found);
            }
        }
        None
    }

    /// Try to step onto `id`, having arrived through its `incoming` side.
    ///
    /// Returns the goal and claim path if `id` is a linked open Goal.
    /// Otherwise a linked tile is pushed for later expansion.
    fn enter(
        &mut self,
        id: TileId,
        incoming: Option<Direction>,
        tracked_start: TileId,
        base: usize,
    ) -> Option<(TileId, Vec<TileId>)> {
        let grid = self.grid;
        let tile = grid.tile(id)?;

        let linked = id == tracked_start || incoming.is_some_and(|dir| tile.has_port(dir));
        if !linked || !self.visited.insert(id) {
            return None;
        }

        let (tracked_start, base) = if tile.is_start() {
            (id, self.path.len())
        } else {
            (tracked_start, base)
        };
        self.path.push(id);

        if tile.is_open_goal() {
            return Some((id, self.path[base..].to_vec()));
        }

        self.stack.push(Frame {
            tile: id,
            incoming,
            tracked_start,
            base,
            next_port: 0,
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GoalKind, PipeShape, Position, TileSpec};

    #[test]
    fn test_straight_line() {
        let mut grid = Grid::new(3, 1);
        let start = grid
            .place(Position::new(0, 0), TileSpec::start([Direction::Right]))
            .unwrap();
        let pipe = grid
            .place(Position::new(1, 0), TileSpec::pipe(PipeShape::Horizontal))
            .unwrap();
        let goal = grid
            .place(Position::new(2, 0), TileSpec::goal(GoalKind::Score, [Direction::Left]))
            .unwrap();

        let claim = ConnectivityResolver::resolve(&grid).unwrap();
        assert_eq!(claim.source, start);
        assert_eq!(claim.goal, goal);
        assert_eq!(claim.path, vec![start, pipe, goal]);
        assert_eq!(claim.path_start(), Some(start));
    }

    #[test]
    fn test_start_adjacent_to_goal() {
        let mut grid = Grid::new(2, 1);
        let start = grid
            .place(Position::new(0, 0), TileSpec::start([Direction::Right]))
            .unwrap();
        let goal = grid
            .place(Position::new(1, 0), TileSpec::goal(GoalKind::Bomb, [Direction::Left]))
            .unwrap();

        let claim = ConnectivityResolver::resolve(&grid).unwrap();
        assert_eq!(claim.path, vec![start, goal]);
    }

    #[test]
    fn test_goal_without_matching_port() {
        let mut grid = Grid::new(2, 1);
        grid.place(Position::new(0, 0), TileSpec::start([Direction::Right]))
            .unwrap();
        grid.place(Position::new(1, 0), TileSpec::goal(GoalKind::Score, [Direction::Up]))
            .unwrap();

        assert_eq!(ConnectivityResolver::resolve(&grid), None);
    }

    #[test]
    fn test_resolve_from_non_start() {
        let mut grid = Grid::new(1, 1);
        let plain = grid.place(Position::new(0, 0), TileSpec::plain()).unwrap();
        assert_eq!(ConnectivityResolver::resolve_from(&grid, plain), None);
        assert_eq!(ConnectivityResolver::resolve_from(&grid, TileId(99)), None);
    }

    #[test]
    fn test_four_way_junction_terminates() {
        // A 3x3 block of four-way pipes around a Start with no goal.
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                let pos = Position::new(x, y);
                let spec = if (x, y) == (1, 1) {
                    TileSpec::start(Direction::ALL)
                } else {
                    TileSpec::custom_pipe(PipeShape::Horizontal, Direction::ALL)
                };
                grid.place(pos, spec).unwrap();
            }
        }
        assert_eq!(ConnectivityResolver::resolve(&grid), None);
    }
}
