//! Grid coordinates and the four port directions.
//!
//! Positions use world orientation: `x` grows to the right and `y` grows
//! upward, so `Direction::Up` is `(0, +1)`. Level rows arrive top row first
//! and are flipped by the grid at load time.

use serde::{Deserialize, Serialize};

/// A unit direction along one grid axis.
///
/// Used both for tile ports (which edges have an open pipe) and for the
/// step taken between neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The unit vector `(dx, dy)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Snap a drag delta to the dominant axis.
    ///
    /// This is the conversion the input layer performs before it resolves
    /// origin and destination cells. Returns `None` for a zero delta; ties
    /// between axes go to the horizontal axis.
    ///
    /// ```
    /// use pipe_swipe::core::Direction;
    ///
    /// assert_eq!(Direction::from_delta(3.0, -1.0), Some(Direction::Right));
    /// assert_eq!(Direction::from_delta(0.2, 0.9), Some(Direction::Up));
    /// assert_eq!(Direction::from_delta(0.0, 0.0), None);
    /// ```
    #[must_use]
    pub fn from_delta(dx: f32, dy: f32) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0.0 { Direction::Up } else { Direction::Down })
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// An integer grid coordinate.
///
/// Positions may lie outside any grid; bounds are the grid's concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `dir`.
    #[must_use]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether `other` shares an edge with this position.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The direction from this position to an adjacent one.
    #[must_use]
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self.step(d) == other)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_up_is_positive_y() {
        assert_eq!(Position::new(2, 2).step(Direction::Up), Position::new(2, 3));
        assert_eq!(Position::new(2, 2).step(Direction::Left), Position::new(1, 2));
    }

    #[test]
    fn test_adjacency() {
        let p = Position::new(0, 0);
        assert!(p.is_adjacent(Position::new(1, 0)));
        assert!(p.is_adjacent(Position::new(0, -1)));
        assert!(!p.is_adjacent(Position::new(1, 1)));
        assert!(!p.is_adjacent(p));
        assert_eq!(p.manhattan(Position::new(-2, 3)), 5);
    }

    #[test]
    fn test_direction_to() {
        let p = Position::new(4, 4);
        assert_eq!(p.direction_to(Position::new(4, 5)), Some(Direction::Up));
        assert_eq!(p.direction_to(Position::new(3, 4)), Some(Direction::Left));
        assert_eq!(p.direction_to(Position::new(6, 4)), None);
    }

    #[test]
    fn test_from_delta_ties_go_horizontal() {
        assert_eq!(Direction::from_delta(-1.0, 1.0), Some(Direction::Left));
        assert_eq!(Direction::from_delta(0.0, -0.5), Some(Direction::Down));
    }
}
