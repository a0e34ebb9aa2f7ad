use tracing::debug;

use super::{REPEAT_DELAY, REPEAT_PERIOD};
use crate::input::{Direction, DirectionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepeatState {
    Idle,
    Holding { held_ticks: u32, repeat_ticks: u32 },
}

/// Turns a held direction into periodic repeat-move events.
///
/// The cycle in which a hold starts is tick 0. With the default constants the first
/// repeat fires in the 13th held cycle and then every third cycle.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    state: RepeatState,
    delay: u32,
    period: u32,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new(REPEAT_DELAY, REPEAT_PERIOD)
    }
}

impl RepeatTimer {
    pub fn new(delay: u32, period: u32) -> Self {
        Self {
            state: RepeatState::Idle,
            delay,
            period,
        }
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, RepeatState::Holding { .. })
    }

    /// `(held_ticks, repeat_ticks)`, both zero while idle
    pub fn counters(&self) -> (u32, u32) {
        match self.state {
            RepeatState::Idle => (0, 0),
            RepeatState::Holding {
                held_ticks,
                repeat_ticks,
            } => (held_ticks, repeat_ticks),
        }
    }

    /// Advances one cycle; returns the direction to repeat, if one fires
    pub fn tick(&mut self, held: DirectionSet) -> Option<Direction> {
        let (held_ticks, repeat_ticks) = self.track(held)?;

        let held_ticks = held_ticks.saturating_add(1);
        let mut repeat_ticks = repeat_ticks;
        let mut fired = None;
        if held_ticks >= self.delay {
            repeat_ticks += 1;
            if repeat_ticks >= self.period {
                repeat_ticks = 0;
                fired = held.first();
                debug!("Repeat fired for {:?} at held tick {}", fired, held_ticks);
            }
        }

        self.state = RepeatState::Holding {
            held_ticks,
            repeat_ticks,
        };
        fired
    }

    /// Follows hold start and release without advancing the counters.
    ///
    /// Used in cycles where an edge move already happened, so no repeat is due then.
    pub fn skip(&mut self, held: DirectionSet) {
        self.track(held);
    }

    // Counters of a hold that continues from the previous cycle, None otherwise
    fn track(&mut self, held: DirectionSet) -> Option<(u32, u32)> {
        if held.is_empty() {
            if self.is_holding() {
                debug!("Hold released after {} ticks", self.counters().0);
            }
            self.state = RepeatState::Idle;
            return None;
        }

        let RepeatState::Holding {
            held_ticks,
            repeat_ticks,
        } = self.state
        else {
            debug!("Hold started: {:?}", held);
            self.state = RepeatState::Holding {
                held_ticks: 0,
                repeat_ticks: 0,
            };
            return None;
        };
        Some((held_ticks, repeat_ticks))
    }
}
