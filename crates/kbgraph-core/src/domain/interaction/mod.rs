//! Interaction domain module
//!
//! Pure, rendering-agnostic view state: node dragging, pan/zoom, the
//! relationship-type edge filter, selection and hover.

mod state;
mod viewport;

pub use state::{DragState, InteractionState};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};
