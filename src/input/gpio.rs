use rppal::gpio::{Gpio, InputPin};
use tracing::{debug, info};

use super::{Button, ButtonSet, Direction, DirectionSet, InputError, InputSampler};
use crate::config::GpioPins;

// Joystick and buttons wired to ground, pins pulled up
struct Line {
    pin: InputPin,
}

impl Line {
    fn open(gpio: &Gpio, bcm: u8) -> Result<Self, InputError> {
        let pin = gpio.get(bcm)?.into_input_pullup();
        debug!("Configured BCM {} as pull-up input", bcm);
        Ok(Self { pin })
    }

    // Lines are active-low: pressed pulls the pin to ground
    fn is_active(&self) -> bool {
        majority([self.pin.is_low(), self.pin.is_low(), self.pin.is_low()])
    }
}

/// Majority of three back-to-back reads, filtering single-read glitches
pub fn majority(reads: [bool; 3]) -> bool {
    reads.iter().filter(|&&active| active).count() >= 2
}

/// Raspberry Pi joystick and push-buttons on GPIO lines
pub struct GpioSampler {
    directions: [(Direction, Line); 4],
    buttons: [(Button, Line); 2],
}

impl GpioSampler {
    pub fn open(pins: &GpioPins) -> Result<Self, InputError> {
        let gpio = Gpio::new()?;
        info!("GPIO controller opened");

        Ok(Self {
            directions: [
                (Direction::Up, Line::open(&gpio, pins.up)?),
                (Direction::Down, Line::open(&gpio, pins.down)?),
                (Direction::Left, Line::open(&gpio, pins.left)?),
                (Direction::Right, Line::open(&gpio, pins.right)?),
            ],
            buttons: [
                (Button::Primary, Line::open(&gpio, pins.primary)?),
                (Button::Secondary, Line::open(&gpio, pins.secondary)?),
            ],
        })
    }
}

impl InputSampler for GpioSampler {
    fn sample_directions(&mut self) -> DirectionSet {
        let mut set = DirectionSet::EMPTY;
        for (direction, line) in &self.directions {
            if line.is_active() {
                set.insert(*direction);
            }
        }
        set
    }

    fn sample_buttons(&mut self) -> ButtonSet {
        let mut set = ButtonSet::EMPTY;
        for (button, line) in &self.buttons {
            if line.is_active() {
                set.insert(*button);
            }
        }
        set
    }
}
