//! Swipe validation and commit.
//!
//! A swipe moves one movable, idle tile into an edge-adjacent empty cell.
//! The input layer has already turned pointer coordinates into cells, so
//! the controller only needs adjacency, not a direction.
//!
//! On acceptance the grid changes immediately, the tile enters
//! `Swiping`, and one move is spent. A refused swipe changes nothing.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::core::{Grid, GridError, LevelRuntimeState, Position, TileId};
use crate::events::{Event, SwipeRejection};

/// Outcome of a submitted swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeResult {
    Accepted,
    Rejected(SwipeRejection),
}

impl SwipeResult {
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, SwipeResult::Accepted)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn rejection(self) -> Option<SwipeRejection> {
        match self {
            SwipeResult::Accepted => None,
            SwipeResult::Rejected(reason) => Some(reason),
        }
    }
}

/// Validates and commits swipes.
pub struct SwipeController;

impl SwipeController {
    /// Check every precondition without touching state.
    ///
    /// Returns the tile that would move.
    pub fn check(
        grid: &Grid,
        state: &LevelRuntimeState,
        origin: Position,
        destination: Position,
    ) -> Result<TileId, SwipeRejection> {
        if !state.has_budget() {
            return Err(SwipeRejection::BudgetExhausted);
        }
        if origin == destination {
            return Err(SwipeRejection::SameCell);
        }
        if !grid.is_within_bounds(origin) || !grid.is_within_bounds(destination) {
            return Err(SwipeRejection::OutOfBounds);
        }

        let tile = grid.tile_at(origin).ok_or(SwipeRejection::NoTile)?;
        if !tile.movable() {
            return Err(SwipeRejection::NotMovable);
        }
        if !tile.is_idle() {
            return Err(SwipeRejection::TileBusy);
        }

        if !grid.is_free(destination) {
            return Err(SwipeRejection::DestinationOccupied);
        }
        if !origin.is_adjacent(destination) {
            return Err(SwipeRejection::NotAdjacent);
        }

        Ok(tile.id())
    }

    /// Validate and, if every precondition holds, commit the swipe.
    ///
    /// Events for the collaborator layer are appended to `events`.
    pub fn submit(
        grid: &mut Grid,
        state: &mut LevelRuntimeState,
        origin: Position,
        destination: Position,
        events: &mut Vec<Event>,
    ) -> SwipeResult {
        let id = match Self::check(grid, state, origin, destination) {
            Ok(id) => id,
            Err(reason) => {
                debug!("swipe {origin} -> {destination} rejected: {reason}");
                events.push(Event::SwipeRejected(reason));
                return SwipeResult::Rejected(reason);
            }
        };

        if let Err(err) = grid.move_tile(id, origin, destination) {
            // Only reachable if `check` and `move_tile` disagree.
            error!("swipe {origin} -> {destination} passed checks but failed to commit: {err}");
            let reason = commit_rejection(err);
            events.push(Event::SwipeRejected(reason));
            return SwipeResult::Rejected(reason);
        }
        if let Some(tile) = grid.tile_mut(id) {
            tile.begin_swipe(origin, destination);
        }
        state.spend();

        debug!("swipe {origin} -> {destination} accepted for {id}, budget {}", state.budget);
        events.push(Event::TileMoved {
            tile: id,
            from: origin,
            to: destination,
        });
        events.push(Event::BudgetChanged(state.budget));
        if !state.has_budget() {
            events.push(Event::BudgetExhausted);
        }

        SwipeResult::Accepted
    }
}

/// The precondition a failed grid move contradicts.
fn commit_rejection(err: GridError) -> SwipeRejection {
    match err {
        GridError::OutOfBounds(_) | GridError::TooLarge { .. } => SwipeRejection::OutOfBounds,
        GridError::Occupied(_) => SwipeRejection::DestinationOccupied,
        GridError::NotAtPosition(_) | GridError::UnknownTile(_) => SwipeRejection::NoTile,
    }
}
