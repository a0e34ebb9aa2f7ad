//! Push-button modifiers.
//!
//! Each button only counts when held alone: primary alone selects the coarse step,
//! secondary alone requests a recenter. Both or neither leave the defaults.

use super::StepSize;
use crate::input::{Button, ButtonSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub step: StepSize,
    pub recenter: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            step: StepSize::DEFAULT,
            recenter: false,
        }
    }
}

pub fn resolve(buttons: ButtonSet) -> Modifiers {
    let primary = buttons.contains(Button::Primary);
    let secondary = buttons.contains(Button::Secondary);

    Modifiers {
        step: if primary && !secondary {
            StepSize::COARSE
        } else {
            StepSize::DEFAULT
        },
        recenter: secondary && !primary,
    }
}
