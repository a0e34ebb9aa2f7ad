//! Input subsystem for joystick and push-button sampling
//!
//! Raw line states are captured once per cycle into an [`InputSnapshot`]. Everything
//! downstream (edge detection, auto-repeat, modifiers) works on snapshots only, so the
//! hardware backends stay behind the [`InputSampler`] trait:
//!
//! ```text
//! GPIO / Gamepad / Keyboard ──► InputSampler ──► InputSnapshot ──► EdgeDetector
//! ```

pub mod edge_detector;
pub mod gamepad;
pub mod gpio;
pub mod keyboard;

pub use edge_detector::EdgeDetector;
pub use gamepad::GamepadSampler;
pub use gpio::GpioSampler;
pub use keyboard::KeyboardSampler;

use std::fmt;

use tokio::sync::watch;
use tracing::info;

use crate::config::InputConfig;
use crate::motion::StepSize;

/// Joystick directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Tie-break order when several directions are active in the same cycle
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn mask(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }

    /// Signed screen delta for one step in this direction (y grows downwards)
    pub fn delta(self, step: StepSize) -> (i32, i32) {
        match self {
            Direction::Up => (0, -step.dy),
            Direction::Down => (0, step.dy),
            Direction::Left => (-step.dx, 0),
            Direction::Right => (step.dx, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Set of active joystick directions, one bit per direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub fn of(directions: &[Direction]) -> Self {
        let mut set = Self::EMPTY;
        for direction in directions {
            set.insert(*direction);
        }
        set
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.mask();
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Directions active now that were inactive in `previous`
    pub fn rising_from(self, previous: DirectionSet) -> DirectionSet {
        DirectionSet(self.0 & !previous.0)
    }

    /// Highest-priority active direction
    pub fn first(self) -> Option<Direction> {
        Direction::PRIORITY
            .iter()
            .copied()
            .find(|direction| self.contains(*direction))
    }
}

/// The two push-buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// SW1, selects the coarse step while held alone
    Primary,
    /// SW2, requests a recenter while held alone
    Secondary,
}

impl Button {
    fn mask(self) -> u8 {
        match self {
            Button::Primary => 0b01,
            Button::Secondary => 0b10,
        }
    }
}

/// Set of pressed buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn of(buttons: &[Button]) -> Self {
        let mut set = Self::EMPTY;
        for button in buttons {
            set.insert(*button);
        }
        set
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.mask();
    }

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }
}

/// Input state captured once per cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub directions: DirectionSet,
    pub buttons: ButtonSet,
}

/// Polled source of raw, deglitched line states (active = pressed)
pub trait InputSampler: Send {
    fn sample_directions(&mut self) -> DirectionSet;

    fn sample_buttons(&mut self) -> ButtonSet;

    fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            directions: self.sample_directions(),
            buttons: self.sample_buttons(),
        }
    }
}

// Input errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("GPIO error: {0}")]
    GpioError(#[from] rppal::gpio::Error),

    #[error("Gamepad error: {0}")]
    GamepadError(String),

    #[error("Keyboard input requires the simulator window")]
    KeyboardUnavailable,
}

/// Builds the sampler selected in the configuration.
///
/// `keyboard` is the snapshot channel fed by the simulator window; it is only
/// present when the window backend is running.
pub fn open_sampler(
    config: &InputConfig,
    keyboard: Option<watch::Receiver<InputSnapshot>>,
) -> Result<Box<dyn InputSampler>, InputError> {
    match config {
        InputConfig::Gpio(pins) => {
            info!("Opening GPIO joystick sampler with pins {:?}", pins);
            Ok(Box::new(GpioSampler::open(pins)?))
        }
        InputConfig::Gamepad { stick_threshold } => {
            info!(
                "Opening gamepad sampler with stick threshold {:.2}",
                stick_threshold
            );
            Ok(Box::new(GamepadSampler::open(*stick_threshold)?))
        }
        InputConfig::Keyboard => {
            let receiver = keyboard.ok_or(InputError::KeyboardUnavailable)?;
            info!("Using simulator window keyboard as input");
            Ok(Box::new(KeyboardSampler::new(receiver)))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_follows_priority_order() {
        let set = DirectionSet::of(&[Direction::Right, Direction::Left, Direction::Down]);
        assert_eq!(set.first(), Some(Direction::Down));

        let set = DirectionSet::of(&[Direction::Left, Direction::Up]);
        assert_eq!(set.first(), Some(Direction::Up));

        assert_eq!(DirectionSet::EMPTY.first(), None);
    }

    #[test]
    fn rising_from_keeps_only_new_directions() {
        let previous = DirectionSet::of(&[Direction::Up, Direction::Left]);
        let current = DirectionSet::of(&[Direction::Up, Direction::Right]);

        let rising = current.rising_from(previous);
        assert!(rising.contains(Direction::Right));
        assert!(!rising.contains(Direction::Up));
        assert!(!rising.contains(Direction::Left));
    }

    #[test]
    fn deltas_point_the_right_way() {
        let step = StepSize::DEFAULT;
        assert_eq!(Direction::Up.delta(step), (0, -2));
        assert_eq!(Direction::Down.delta(step), (0, 2));
        assert_eq!(Direction::Left.delta(step), (-2, 0));
        assert_eq!(Direction::Right.delta(StepSize::COARSE), (4, 0));
    }

    #[test]
    fn keyboard_requires_window_channel() {
        let result = open_sampler(&InputConfig::Keyboard, None);
        assert!(matches!(result, Err(InputError::KeyboardUnavailable)));
    }
}
