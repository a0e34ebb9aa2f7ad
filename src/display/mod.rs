//! Display surface abstraction
//!
//! The motion core only ever erases and renders a single glyph cell. Startup
//! (initialize, clear, backlight) runs once before the first cycle and is the only
//! part of the surface that can fail.
//!
//! Backends:
//!
//! - [`trace_surface::TraceSurface`] - headless, every draw call becomes a tracing event
//! - [`framebuffer::FrameSurface`] - in-memory RGB frame shared with the simulator window
//! - [`window::SimulatorWindow`] - egui window showing the frame, also the keyboard source

pub mod framebuffer;
pub mod trace_surface;
pub mod window;

pub use framebuffer::{Frame, FrameSurface};
pub use trace_surface::TraceSurface;
pub use window::SimulatorWindow;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(0xFF, 0, 0);
    pub const YELLOW: Rgb = Rgb(0xFF, 0xFF, 0);
}

/// Surface size and glyph cell size, both in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGeometry {
    pub width: i32,
    pub height: i32,
    pub glyph_width: i32,
    pub glyph_height: i32,
}

impl SurfaceGeometry {
    pub const DEFAULT: SurfaceGeometry = SurfaceGeometry {
        width: 320,
        height: 240,
        glyph_width: 16,
        glyph_height: 24,
    };
}

/// The glyph moved around the screen and its colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            symbol: 'X',
            foreground: Rgb::YELLOW,
            background: Rgb::RED,
        }
    }
}

/// Screen background, also used to erase the glyph
pub const SCREEN_COLOR: Rgb = Rgb::BLACK;

// Display errors
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to initialize display: {0}")]
    InitializationError(String),
}

/// Drawing target for the glyph.
///
/// Draw primitives are synchronous and idempotent; coordinates are always inside
/// the bounds derived from [`DisplaySurface::geometry`].
pub trait DisplaySurface: Send {
    fn geometry(&self) -> SurfaceGeometry;

    fn initialize(&mut self) -> Result<(), DisplayError>;

    /// Fills the whole surface with [`SCREEN_COLOR`]
    fn clear(&mut self);

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    fn erase_glyph_at(&mut self, x: i32, y: i32);

    fn render_glyph_at(&mut self, x: i32, y: i32, glyph: char, foreground: Rgb, background: Rgb);
}
