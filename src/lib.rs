//! Joystick-driven glyph cursor for small fixed-size displays.
//!
//! A single control loop samples a 4-direction joystick and two push-buttons every
//! 100 ms, turns presses and holds into clamped cursor moves and redraws one glyph:
//!
//! ```text
//! InputSampler ──► EdgeDetector ──┬──► MotionController ──► DisplaySurface
//!                  RepeatTimer ───┤
//!            modifier::resolve ───┘
//! ```
//!
//! - [`input`] - snapshots, edge detection and the GPIO, gamepad and keyboard samplers
//! - [`motion`] - auto-repeat timing, button modifiers and the clamped cursor
//! - [`display`] - drawing surfaces and the desktop simulator window
//! - [`control`] - the fixed-cadence loop tying them together
//! - [`config`] - wiring and backend selection

pub mod config;
pub mod control;
pub mod display;
pub mod input;
pub mod motion;
