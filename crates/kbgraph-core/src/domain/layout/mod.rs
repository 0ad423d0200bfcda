//! Layout domain module
//!
//! Places graph nodes on a bounded canvas with a one-shot force simulation.

mod canvas;
mod force;

pub use canvas::Canvas;
pub use force::ForceLayout;
