//! Goal effects.
//!
//! - [`EffectApplier`]: Turns a [`Claim`](crate::connectivity::Claim) into
//!   Jubilant tiles, removals, budget changes and level completion

mod applier;

pub use applier::EffectApplier;
