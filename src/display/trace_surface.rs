use tracing::{debug, info};

use super::{DisplayError, DisplaySurface, Rgb, SurfaceGeometry, SCREEN_COLOR};

/// Headless surface that only reports what would be drawn
#[derive(Debug)]
pub struct TraceSurface {
    geometry: SurfaceGeometry,
    draw_calls: u64,
}

impl TraceSurface {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            geometry,
            draw_calls: 0,
        }
    }

    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }
}

impl DisplaySurface for TraceSurface {
    fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    fn initialize(&mut self) -> Result<(), DisplayError> {
        info!(
            "Headless surface ready: {}x{} px, glyph cell {}x{} px",
            self.geometry.width,
            self.geometry.height,
            self.geometry.glyph_width,
            self.geometry.glyph_height
        );
        Ok(())
    }

    fn clear(&mut self) {
        debug!("Clear screen to {:?}", SCREEN_COLOR);
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        info!("Backlight {}", if on { "on" } else { "off" });
        Ok(())
    }

    fn erase_glyph_at(&mut self, x: i32, y: i32) {
        self.draw_calls += 1;
        debug!("Erase glyph at ({}, {})", x, y);
    }

    fn render_glyph_at(&mut self, x: i32, y: i32, glyph: char, foreground: Rgb, background: Rgb) {
        self.draw_calls += 1;
        debug!(
            "Render '{}' at ({}, {}) fg={:?} bg={:?}",
            glyph, x, y, foreground, background
        );
    }
}
