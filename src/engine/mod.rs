//! The engine surface hosts drive.
//!
//! - [`Puzzle`]: One loaded level: `submit_swipe`, `step`, events
//! - [`Campaign`]: Name-ordered levels with load, restart and advance

mod puzzle;
mod campaign;

pub use puzzle::Puzzle;
pub use campaign::{Campaign, CampaignError, LevelEntry};
