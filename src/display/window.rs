//! Desktop simulator for the device screen.
//!
//! Shows the [`Frame`] published by [`FrameSurface`](super::FrameSurface), scaled up
//! with nearest-neighbour filtering, and turns the keyboard into joystick and button
//! lines: arrow keys for directions, `1`/`Q` for the primary and `2`/`W` for the
//! secondary button.

use std::time::Duration;

use egui::{CentralPanel, Color32, ColorImage, Context, Key, TextureHandle, TextureOptions};
use tokio::sync::watch;
use tracing::{debug, info};

use super::Frame;
use crate::input::{Button, ButtonSet, Direction, DirectionSet, InputSnapshot};

const WINDOW_SCALE: f32 = 2.0;

pub struct SimulatorWindow {
    frames: watch::Receiver<Frame>,
    input: watch::Sender<InputSnapshot>,
    texture: Option<TextureHandle>,
}

impl SimulatorWindow {
    pub fn new(frames: watch::Receiver<Frame>, input: watch::Sender<InputSnapshot>) -> Self {
        info!("Creating simulator window");
        Self {
            frames,
            input,
            texture: None,
        }
    }

    /// Initial inner size of the window for a frame of the given size
    pub fn inner_size(width: usize, height: usize) -> [f32; 2] {
        [width as f32 * WINDOW_SCALE, height as f32 * WINDOW_SCALE]
    }

    fn publish_keys(&self, ctx: &Context) {
        let snapshot = ctx.input(|i| keyboard_snapshot(|key| i.key_down(key)));
        self.input.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            debug!("Keyboard state: {:?}", snapshot);
            *current = snapshot;
            true
        });
    }

    fn refresh_texture(&mut self, ctx: &Context) {
        let changed = self.frames.has_changed().unwrap_or(false);
        if self.texture.is_some() && !changed {
            return;
        }

        let frame = self.frames.borrow_and_update().clone();
        let image = if frame.backlight {
            ColorImage::from_rgb([frame.width, frame.height], &frame.pixels)
        } else {
            ColorImage::new([frame.width, frame.height], Color32::BLACK)
        };

        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, TextureOptions::NEAREST);
            return;
        }
        self.texture = Some(ctx.load_texture("surface", image, TextureOptions::NEAREST));
    }
}

impl eframe::App for SimulatorWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.publish_keys(ctx);
        self.refresh_texture(ctx);

        CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    let size = ui.available_size();
                    let image = egui::load::SizedTexture::from_handle(texture);
                    ui.add(egui::Image::new(image).fit_to_exact_size(size));
                }
            });

        // Keys are polled by the control loop every 100 ms; 30 fps keeps up easily
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}

/// Maps pressed keys to joystick directions and buttons
pub fn keyboard_snapshot(is_down: impl Fn(Key) -> bool) -> InputSnapshot {
    let mut directions = DirectionSet::EMPTY;
    for (key, direction) in [
        (Key::ArrowUp, Direction::Up),
        (Key::ArrowDown, Direction::Down),
        (Key::ArrowLeft, Direction::Left),
        (Key::ArrowRight, Direction::Right),
    ] {
        if is_down(key) {
            directions.insert(direction);
        }
    }

    let mut buttons = ButtonSet::EMPTY;
    if is_down(Key::Num1) || is_down(Key::Q) {
        buttons.insert(Button::Primary);
    }
    if is_down(Key::Num2) || is_down(Key::W) {
        buttons.insert(Button::Secondary);
    }

    InputSnapshot {
        directions,
        buttons,
    }
}
