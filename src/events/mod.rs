//! Events emitted toward rendering, audio and UI collaborators.
//!
//! - [`Event`]: Everything the presentation layer can observe
//! - [`SwipeRejection`]: Reason attached to a refused swipe

mod event;

pub use event::{Event, SwipeRejection};
