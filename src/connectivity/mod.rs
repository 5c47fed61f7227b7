//! Connectivity resolution between Start and Goal tiles.
//!
//! - [`ConnectivityResolver`]: Depth-first search over pipe ports
//! - [`Claim`]: The matched Goal and the path that reached it

mod resolver;

pub use resolver::{Claim, ConnectivityResolver};
