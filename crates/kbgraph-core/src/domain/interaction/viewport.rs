//! Pan and zoom transform between screen and world coordinates

use serde::{Deserialize, Serialize};

use crate::domain::graph::Position;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;

/// `world = (screen - pan) / zoom`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan_x: f32,
    pub pan_y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen_to_world(&self, screen: Position) -> Position {
        Position::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Position) -> Position {
        Position::new(
            world.x * self.zoom + self.pan_x,
            world.y * self.zoom + self.pan_y,
        )
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Set the zoom level, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Multiply the zoom by `factor`, keeping the world point under `anchor` fixed
    pub fn zoom_at(&mut self, anchor: Position, factor: f32) {
        let world_before = self.screen_to_world(anchor);
        self.zoom = clamp_zoom(self.zoom * factor);
        self.pan_x = anchor.x - world_before.x * self.zoom;
        self.pan_y = anchor.y - world_before.y * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        1.0
    }
}
