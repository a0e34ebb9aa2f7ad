use tokio::sync::watch;
use tracing::{debug, info};

use super::{DisplayError, DisplaySurface, Rgb, SurfaceGeometry, SCREEN_COLOR};

/// Packed RGB pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
    pub backlight: bool,
}

impl Frame {
    pub fn blank(geometry: SurfaceGeometry) -> Self {
        let width = geometry.width.max(0) as usize;
        let height = geometry.height.max(0) as usize;
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
            backlight: false,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 3;
        Some(Rgb(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let offset = (y as usize * self.width + x as usize) * 3;
        self.pixels[offset] = color.0;
        self.pixels[offset + 1] = color.1;
        self.pixels[offset + 2] = color.2;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        for row in y..y + height {
            for col in x..x + width {
                self.set_pixel(col, row, color);
            }
        }
    }
}

/// Software surface that draws into a [`Frame`] and publishes it after every change
pub struct FrameSurface {
    geometry: SurfaceGeometry,
    frame: Frame,
    sender: watch::Sender<Frame>,
}

impl FrameSurface {
    pub fn new(geometry: SurfaceGeometry, sender: watch::Sender<Frame>) -> Self {
        Self {
            geometry,
            frame: Frame::blank(geometry),
            sender,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn publish(&self) {
        // Nobody watching is fine; the window may not be open yet
        self.sender.send_replace(self.frame.clone());
    }

    // Glyphs are drawn as a two-pixel-wide cross over the cell background
    fn draw_symbol(&mut self, x: i32, y: i32, foreground: Rgb) {
        let width = self.geometry.glyph_width;
        let height = self.geometry.glyph_height;
        for row in 0..height {
            let col = row * width / height.max(1);
            for offset in 0..2 {
                self.frame.set_pixel(x + col + offset, y + row, foreground);
                self.frame
                    .set_pixel(x + width - 1 - col - offset, y + row, foreground);
            }
        }
    }
}

impl DisplaySurface for FrameSurface {
    fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    fn initialize(&mut self) -> Result<(), DisplayError> {
        if self.frame.pixels.is_empty() {
            return Err(DisplayError::InitializationError(format!(
                "surface {}x{} has no pixels",
                self.geometry.width, self.geometry.height
            )));
        }
        info!(
            "Framebuffer surface ready: {}x{}",
            self.frame.width, self.frame.height
        );
        Ok(())
    }

    fn clear(&mut self) {
        let (width, height) = (self.geometry.width, self.geometry.height);
        self.frame.fill_rect(0, 0, width, height, SCREEN_COLOR);
        self.publish();
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.frame.backlight = on;
        self.publish();
        Ok(())
    }

    fn erase_glyph_at(&mut self, x: i32, y: i32) {
        let (width, height) = (self.geometry.glyph_width, self.geometry.glyph_height);
        self.frame.fill_rect(x, y, width, height, SCREEN_COLOR);
        self.publish();
    }

    fn render_glyph_at(&mut self, x: i32, y: i32, glyph: char, foreground: Rgb, background: Rgb) {
        let (width, height) = (self.geometry.glyph_width, self.geometry.glyph_height);
        self.frame.fill_rect(x, y, width, height, background);
        if !glyph.is_whitespace() {
            self.draw_symbol(x, y, foreground);
        }
        debug!("Rendered '{}' at ({}, {})", glyph, x, y);
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> (FrameSurface, watch::Receiver<Frame>) {
        let geometry = SurfaceGeometry::DEFAULT;
        let (sender, receiver) = watch::channel(Frame::blank(geometry));
        (FrameSurface::new(geometry, sender), receiver)
    }

    #[test]
    fn render_fills_cell_and_draws_cross() {
        let (mut surface, _receiver) = surface();
        surface.clear();
        surface.render_glyph_at(16, 24, 'X', Rgb::YELLOW, Rgb::RED);

        let frame = surface.frame();
        assert_eq!(frame.pixel(16, 24), Some(Rgb::YELLOW));
        assert_eq!(frame.pixel(31, 24), Some(Rgb::YELLOW));
        assert_eq!(frame.pixel(23, 24), Some(Rgb::RED));
        assert_eq!(frame.pixel(32, 24), Some(Rgb::BLACK));
        assert_eq!(frame.pixel(16, 48), Some(Rgb::BLACK));
    }

    #[test]
    fn erase_restores_screen_color() {
        let (mut surface, _receiver) = surface();
        surface.render_glyph_at(0, 0, 'X', Rgb::YELLOW, Rgb::RED);
        surface.erase_glyph_at(0, 0);

        let frame = surface.frame();
        for (x, y) in [(0, 0), (8, 12), (15, 23)] {
            assert_eq!(frame.pixel(x, y), Some(SCREEN_COLOR));
        }
    }

    #[test]
    fn changes_are_published() {
        let (mut surface, mut receiver) = surface();
        surface.set_backlight(true).unwrap();
        surface.render_glyph_at(304, 216, 'X', Rgb::YELLOW, Rgb::RED);

        assert!(receiver.has_changed().unwrap());
        let frame = receiver.borrow_and_update().clone();
        assert!(frame.backlight);
        assert_eq!(frame.pixel(319, 216), Some(Rgb::YELLOW));
    }

    #[test]
    fn pixel_outside_frame_is_none() {
        let (surface, _receiver) = surface();
        assert_eq!(surface.frame().pixel(320, 0), None);
    }
}
