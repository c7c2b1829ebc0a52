//! Axis-aligned boxes in viewport coordinates.

use serde::{Deserialize, Serialize};

/// Post-layout bounding box of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    /// Left edge relative to the viewport.
    pub x: f32,
    /// Top edge relative to the viewport.
    pub y: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same origin, different size.
    #[inline]
    #[must_use]
    pub const fn with_size(self, width: f32, height: f32) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width,
            height,
        }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Width over height. Infinite or NaN for degenerate boxes.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// True when either dimension is zero, negative or NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
