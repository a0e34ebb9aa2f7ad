use tokio::sync::watch;
use tracing::debug;

use super::{ButtonSet, DirectionSet, InputSampler, InputSnapshot};

/// Reads the latest key state published by the simulator window
pub struct KeyboardSampler {
    receiver: watch::Receiver<InputSnapshot>,
    current: InputSnapshot,
}

impl KeyboardSampler {
    pub fn new(receiver: watch::Receiver<InputSnapshot>) -> Self {
        Self {
            receiver,
            current: InputSnapshot::default(),
        }
    }
}

impl InputSampler for KeyboardSampler {
    fn sample_directions(&mut self) -> DirectionSet {
        // A closed channel keeps the last value, which is what a released window reports
        if self.receiver.has_changed().unwrap_or(false) {
            debug!("Keyboard snapshot changed");
        }
        self.current = *self.receiver.borrow_and_update();
        self.current.directions
    }

    fn sample_buttons(&mut self) -> ButtonSet {
        self.current.buttons
    }
}
