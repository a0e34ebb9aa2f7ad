use gilrs::{Axis, Button as PadButton, Event, EventType, Gamepad, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

use super::{Button, ButtonSet, Direction, DirectionSet, InputError, InputSampler};

/// Any gilrs-supported gamepad standing in for the joystick and buttons.
///
/// D-pad or left stick give directions, South is the primary button and East the
/// secondary one. Pressed state is read from gilrs' cached gamepad state after all
/// pending events are drained, in both sample methods, so each read is current.
pub struct GamepadSampler {
    gilrs: Gilrs,
    active_gamepad: Option<GamepadId>,
    stick_threshold: f32,
}

impl GamepadSampler {
    pub fn open(stick_threshold: f32) -> Result<Self, InputError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(InputError::GamepadError(e.to_string()));
            }
        };

        let active_gamepad = gilrs.gamepads().next().map(|(id, gamepad)| {
            info!("Selected gamepad: {} ({})", gamepad.name(), id);
            id
        });
        if active_gamepad.is_none() {
            warn!("No gamepad connected, waiting for one to appear");
        }

        Ok(Self {
            gilrs,
            active_gamepad,
            stick_threshold,
        })
    }

    fn drain_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    if self.active_gamepad.is_none() {
                        info!("Gamepad {} connected, selecting it", id);
                        self.active_gamepad = Some(id);
                    } else {
                        debug!("Additional gamepad {} connected, ignoring", id);
                    }
                }
                EventType::Disconnected if self.active_gamepad == Some(id) => {
                    warn!("Active gamepad {} disconnected", id);
                    self.active_gamepad = None;
                }
                _ => {}
            }
        }
    }

    fn gamepad(&self) -> Option<Gamepad<'_>> {
        self.active_gamepad
            .and_then(|id| self.gilrs.connected_gamepad(id))
    }
}

impl InputSampler for GamepadSampler {
    fn sample_directions(&mut self) -> DirectionSet {
        self.drain_events();
        let Some(gamepad) = self.gamepad() else {
            return DirectionSet::EMPTY;
        };

        let dpad = [
            gamepad.is_pressed(PadButton::DPadUp),
            gamepad.is_pressed(PadButton::DPadDown),
            gamepad.is_pressed(PadButton::DPadLeft),
            gamepad.is_pressed(PadButton::DPadRight),
        ];
        directions_from(
            dpad,
            gamepad.value(Axis::LeftStickX),
            gamepad.value(Axis::LeftStickY),
            self.stick_threshold,
        )
    }

    fn sample_buttons(&mut self) -> ButtonSet {
        self.drain_events();
        let Some(gamepad) = self.gamepad() else {
            return ButtonSet::EMPTY;
        };

        buttons_from(
            gamepad.is_pressed(PadButton::South),
            gamepad.is_pressed(PadButton::East),
        )
    }
}

/// D-pad state (up, down, left, right) or a stick past `threshold` on either axis.
///
/// gilrs reports stick Y positive when pushed up. A value exactly at the threshold
/// does not count.
pub fn directions_from(
    dpad: [bool; 4],
    stick_x: f32,
    stick_y: f32,
    threshold: f32,
) -> DirectionSet {
    let [up, down, left, right] = dpad;
    let mut set = DirectionSet::EMPTY;
    if up || stick_y > threshold {
        set.insert(Direction::Up);
    }
    if down || stick_y < -threshold {
        set.insert(Direction::Down);
    }
    if left || stick_x < -threshold {
        set.insert(Direction::Left);
    }
    if right || stick_x > threshold {
        set.insert(Direction::Right);
    }
    set
}

/// South face button is primary, East is secondary
pub fn buttons_from(south: bool, east: bool) -> ButtonSet {
    let mut set = ButtonSet::EMPTY;
    if south {
        set.insert(Button::Primary);
    }
    if east {
        set.insert(Button::Secondary);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 0.5;
    const NO_DPAD: [bool; 4] = [false; 4];

    #[test]
    fn stick_exactly_at_threshold_is_ignored() {
        assert!(directions_from(NO_DPAD, 0.5, 0.0, THRESHOLD).is_empty());
        assert!(directions_from(NO_DPAD, 0.0, -0.5, THRESHOLD).is_empty());
        assert_eq!(
            directions_from(NO_DPAD, 0.51, 0.0, THRESHOLD),
            DirectionSet::of(&[Direction::Right])
        );
    }

    #[test]
    fn negative_stick_y_is_down() {
        assert_eq!(
            directions_from(NO_DPAD, 0.0, -0.9, THRESHOLD),
            DirectionSet::of(&[Direction::Down])
        );
        assert_eq!(
            directions_from(NO_DPAD, 0.0, 0.9, THRESHOLD),
            DirectionSet::of(&[Direction::Up])
        );
    }

    #[test]
    fn diagonal_stick_sets_two_directions() {
        assert_eq!(
            directions_from(NO_DPAD, -0.7, 0.7, THRESHOLD),
            DirectionSet::of(&[Direction::Up, Direction::Left])
        );
    }

    #[test]
    fn dpad_works_with_stick_centered() {
        assert_eq!(
            directions_from([false, true, false, true], 0.0, 0.0, THRESHOLD),
            DirectionSet::of(&[Direction::Down, Direction::Right])
        );
    }

    #[test]
    fn face_buttons_map_to_primary_and_secondary() {
        assert_eq!(buttons_from(false, false), ButtonSet::EMPTY);
        assert_eq!(buttons_from(true, false), ButtonSet::of(&[Button::Primary]));
        assert_eq!(buttons_from(false, true), ButtonSet::of(&[Button::Secondary]));
        assert_eq!(
            buttons_from(true, true),
            ButtonSet::of(&[Button::Primary, Button::Secondary])
        );
    }
}
