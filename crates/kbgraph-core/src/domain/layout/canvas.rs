//! Layout canvas

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::domain::graph::Position;

/// Drawing area the layout must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    /// Minimum distance between an unpinned node and the canvas edge
    pub margin: f32,
}

impl Canvas {
    /// Negative or non-finite dimensions are treated as zero
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
            margin: sanitize(margin),
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.width, config.height, config.margin)
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Allowed x range for unpinned nodes
    pub fn x_bounds(&self) -> (f32, f32) {
        bounds(self.width, self.margin)
    }

    /// Allowed y range for unpinned nodes
    pub fn y_bounds(&self) -> (f32, f32) {
        bounds(self.height, self.margin)
    }

    /// Clamp a point into the margin-inset area
    ///
    /// NaN coordinates land on the lower bound.
    pub fn clamp(&self, position: Position) -> Position {
        let (x_lo, x_hi) = self.x_bounds();
        let (y_lo, y_hi) = self.y_bounds();
        Position::new(
            position.x.max(x_lo).min(x_hi),
            position.y.max(y_lo).min(y_hi),
        )
    }

    /// Whether a point lies inside the margin-inset area
    pub fn contains(&self, position: Position) -> bool {
        let (x_lo, x_hi) = self.x_bounds();
        let (y_lo, y_hi) = self.y_bounds();
        (x_lo..=x_hi).contains(&position.x) && (y_lo..=y_hi).contains(&position.y)
    }

    /// Uniformly random point anywhere on the canvas
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(0.0..=self.width),
            rng.gen_range(0.0..=self.height),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// `[margin, dim - margin]`, collapsing onto the centre when the canvas is too small
fn bounds(dimension: f32, margin: f32) -> (f32, f32) {
    let lo = margin.min(dimension / 2.0);
    let hi = (dimension - margin).max(lo);
    (lo, hi)
}
