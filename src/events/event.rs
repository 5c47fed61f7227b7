//! Engine events.
//!
//! Events are the entire contract between the engine and its presentation
//! collaborators (renderer, audio, UI). The engine never calls into those
//! layers; it returns events from `Puzzle::step` and they react.

use serde::{Deserialize, Serialize};

use crate::core::{GoalKind, Position, TileId};

/// Why a swipe was refused.
///
/// Checked in this order; the first failing precondition is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeRejection {
    /// No moves left. Reported ahead of any geometry problem.
    BudgetExhausted,
    /// Origin and destination are the same cell.
    SameCell,
    /// Origin or destination lies outside the grid.
    OutOfBounds,
    /// Nothing to pick up at the origin.
    NoTile,
    /// The origin tile is fixed (Start, Goal, or already claimed).
    NotMovable,
    /// The origin tile is still animating.
    TileBusy,
    /// Something already sits on the destination.
    DestinationOccupied,
    /// The cells do not share an edge.
    NotAdjacent,
}

impl SwipeRejection {
    /// Whether the UI should present this as "out of moves" rather than
    /// an invalid gesture.
    #[must_use]
    pub const fn is_budget(self) -> bool {
        matches!(self, SwipeRejection::BudgetExhausted)
    }
}

impl std::fmt::Display for SwipeRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            SwipeRejection::BudgetExhausted => "no moves left",
            SwipeRejection::SameCell => "origin and destination are the same cell",
            SwipeRejection::OutOfBounds => "cell outside the grid",
            SwipeRejection::NoTile => "no tile at origin",
            SwipeRejection::NotMovable => "tile cannot be moved",
            SwipeRejection::TileBusy => "tile is still animating",
            SwipeRejection::DestinationOccupied => "destination is occupied",
            SwipeRejection::NotAdjacent => "cells are not adjacent",
        };
        f.write_str(msg)
    }
}

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A swipe was accepted; the tile now logically sits on `to`.
    TileMoved {
        tile: TileId,
        from: Position,
        to: Position,
    },

    /// A swipe was refused. Game state is unchanged.
    SwipeRejected(SwipeRejection),

    /// A tile started its claim animation.
    TileJubilant(TileId),

    /// A removable tile finished celebrating and left the grid.
    TileRemoved { tile: TileId, position: Position },

    /// A goal was reached by a connected path.
    GoalClaimed { tile: TileId, goal: GoalKind },

    /// The move budget changed to this value.
    BudgetChanged(u32),

    /// The move budget hit zero.
    BudgetExhausted,

    /// Every Start tile is used up.
    LevelComplete,
}

impl Event {
    /// The tile this event is about, if any.
    #[must_use]
    pub fn tile(&self) -> Option<TileId> {
        match self {
            Event::TileMoved { tile, .. }
            | Event::TileRemoved { tile, .. }
            | Event::GoalClaimed { tile, .. } => Some(*tile),
            Event::TileJubilant(tile) => Some(*tile),
            Event::SwipeRejected(_)
            | Event::BudgetChanged(_)
            | Event::BudgetExhausted
            | Event::LevelComplete => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tile() {
        let moved = Event::TileMoved {
            tile: TileId(3),
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        };
        assert_eq!(moved.tile(), Some(TileId(3)));
        assert_eq!(Event::TileJubilant(TileId(4)).tile(), Some(TileId(4)));
        assert_eq!(Event::BudgetChanged(2).tile(), None);
        assert_eq!(Event::LevelComplete.tile(), None);
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(SwipeRejection::BudgetExhausted.to_string(), "no moves left");
        assert!(SwipeRejection::BudgetExhausted.is_budget());
        assert!(!SwipeRejection::NotAdjacent.is_budget());
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::GoalClaimed {
            tile: TileId(9),
            goal: GoalKind::Bomb,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
