//! Tile identification.
//!
//! Every tile placed on a grid gets a `TileId` that stays fixed for the
//! tile's whole life, even as swipes move it between cells. Events and the
//! resolver's visited set refer to tiles by this identity, never by
//! position.
//!
//! ## Usage
//!
//! ```
//! use pipe_swipe::core::TileId;
//!
//! let id = TileId(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.next(), TileId(8));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a tile within one loaded grid.
///
/// IDs are allocated sequentially by the grid in scan order at load time,
/// then in placement order for tiles added afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(TileId(0).next(), TileId(1));
        assert_eq!(TileId(41).next().raw(), 42);
    }

    #[test]
    fn test_ordering() {
        assert!(TileId(1) < TileId(2));
        assert_eq!(TileId::from(3), TileId(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TileId(42)), "Tile(42)");
    }

    #[test]
    fn test_serialization() {
        let id = TileId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TileId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
