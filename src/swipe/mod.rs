//! Swipe handling: precondition checks and committing a tile move.

mod controller;

pub use controller::{SwipeController, SwipeResult};
