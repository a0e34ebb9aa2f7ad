//! Motion core: auto-repeat timing, modifier buttons and the clamped cursor.
//!
//! ```text
//! EdgeSet ───────────┐
//! RepeatTimer ───────┼──► MotionController ──► DisplaySurface
//! modifier::resolve ─┘      (position, bounds)
//! ```
//!
//! All parameters are fixed for the session. Nothing in here can fail: out-of-range
//! positions are prevented by clamping, never rejected.

pub mod modifier;
pub mod motion_controller;
pub mod repeat_timer;

pub use modifier::Modifiers;
pub use motion_controller::{MotionController, MotionEvent, MoveTrigger};
pub use repeat_timer::RepeatTimer;

use std::fmt;

use crate::display::SurfaceGeometry;

/// Cycles a direction must be held before auto-repeat starts
pub const REPEAT_DELAY: u32 = 10;

/// Cycles between auto-repeat moves once the delay has elapsed
pub const REPEAT_PERIOD: u32 = 3;

/// Per-move magnitude on each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSize {
    pub dx: i32,
    pub dy: i32,
}

impl StepSize {
    pub const DEFAULT: StepSize = StepSize { dx: 2, dy: 2 };
    pub const COARSE: StepSize = StepSize { dx: 4, dy: 4 };
}

/// Top-left anchor of the glyph on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
}

impl CursorPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive range of valid anchors for the glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: CursorPosition,
    pub max: CursorPosition,
}

impl Bounds {
    pub fn for_surface(geometry: SurfaceGeometry) -> Self {
        // A glyph wider than the surface pins the anchor to the origin
        let max_x = (geometry.width - geometry.glyph_width).max(0);
        let max_y = (geometry.height - geometry.glyph_height).max(0);
        Self {
            min: CursorPosition::new(0, 0),
            max: CursorPosition::new(max_x, max_y),
        }
    }

    pub fn center(&self) -> CursorPosition {
        CursorPosition::new(self.max.x / 2, self.max.y / 2)
    }

    /// Saturating clamp of each axis independently
    pub fn clamp(&self, x: i32, y: i32) -> CursorPosition {
        CursorPosition::new(
            x.clamp(self.min.x, self.max.x),
            y.clamp(self.min.y, self.max.y),
        )
    }

    pub fn contains(&self, position: CursorPosition) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_for_default_surface() {
        let bounds = Bounds::for_surface(SurfaceGeometry::DEFAULT);
        assert_eq!(bounds.min, CursorPosition::new(0, 0));
        assert_eq!(bounds.max, CursorPosition::new(304, 216));
        assert_eq!(bounds.center(), CursorPosition::new(152, 108));
    }

    #[test]
    fn clamp_pins_to_nearest_bound() {
        let bounds = Bounds::for_surface(SurfaceGeometry::DEFAULT);
        assert_eq!(bounds.clamp(-3, 500), CursorPosition::new(0, 216));
        assert_eq!(bounds.clamp(400, -1), CursorPosition::new(304, 0));
        assert_eq!(bounds.clamp(10, 20), CursorPosition::new(10, 20));
    }

    #[test]
    fn oversized_glyph_collapses_bounds() {
        let geometry = SurfaceGeometry {
            width: 8,
            height: 8,
            glyph_width: 16,
            glyph_height: 24,
        };
        let bounds = Bounds::for_surface(geometry);
        assert_eq!(bounds.max, CursorPosition::new(0, 0));
        assert_eq!(bounds.center(), CursorPosition::new(0, 0));
    }
}
