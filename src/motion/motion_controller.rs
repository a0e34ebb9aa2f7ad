//! Cursor ownership and the per-cycle move decision.
//!
//! Precedence within one cycle:
//!
//! 1. a rising edge moves in its highest-priority direction
//! 2. otherwise a recenter request returns the glyph to the center
//! 3. otherwise a repeat event moves in the repeated direction
//! 4. otherwise nothing changes
//!
//! [`MotionController::move_by`] is the only mutator of the position besides
//! [`MotionController::recenter`]; both erase before and render after, even when
//! clamping leaves the position where it was.

use tracing::debug;

use super::{Bounds, CursorPosition, StepSize};
use crate::display::{DisplaySurface, Glyph, SurfaceGeometry};
use crate::input::{Direction, DirectionSet};

/// What caused a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTrigger {
    Edge,
    Repeat,
}

/// Side effect of one [`MotionController::advance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    Moved {
        direction: Direction,
        trigger: MoveTrigger,
        from: CursorPosition,
        to: CursorPosition,
    },
    Recentered {
        from: CursorPosition,
        to: CursorPosition,
    },
}

#[derive(Debug, Clone)]
pub struct MotionController {
    position: CursorPosition,
    bounds: Bounds,
    glyph: Glyph,
}

impl MotionController {
    /// Starts at the screen center
    pub fn new(geometry: SurfaceGeometry, glyph: Glyph) -> Self {
        let bounds = Bounds::for_surface(geometry);
        Self {
            position: bounds.center(),
            bounds,
            glyph,
        }
    }

    pub fn position(&self) -> CursorPosition {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Draws the glyph at the current position without erasing first
    pub fn place(&self, surface: &mut dyn DisplaySurface) {
        self.render(surface);
    }

    pub fn advance(
        &mut self,
        edges: DirectionSet,
        repeat: Option<Direction>,
        step: StepSize,
        recenter: bool,
        surface: &mut dyn DisplaySurface,
    ) -> Option<MotionEvent> {
        let (direction, trigger) = if let Some(direction) = edges.first() {
            if repeat.is_some() {
                debug!("Edge move {} supersedes repeat this cycle", direction);
            }
            (direction, MoveTrigger::Edge)
        } else if recenter {
            let from = self.position;
            let to = self.recenter(surface);
            return Some(MotionEvent::Recentered { from, to });
        } else if let Some(direction) = repeat {
            (direction, MoveTrigger::Repeat)
        } else {
            return None;
        };

        let from = self.position;
        let (dx, dy) = direction.delta(step);
        let to = self.move_by(dx, dy, surface);
        Some(MotionEvent::Moved {
            direction,
            trigger,
            from,
            to,
        })
    }

    /// Erase, clamp-move, render. Returns the committed position.
    pub fn move_by(
        &mut self,
        dx: i32,
        dy: i32,
        surface: &mut dyn DisplaySurface,
    ) -> CursorPosition {
        surface.erase_glyph_at(self.position.x, self.position.y);

        let next = self.bounds.clamp(
            self.position.x.saturating_add(dx),
            self.position.y.saturating_add(dy),
        );
        debug!("Move by ({}, {}): {} -> {}", dx, dy, self.position, next);
        self.position = next;

        self.render(surface);
        self.position
    }

    pub fn recenter(&mut self, surface: &mut dyn DisplaySurface) -> CursorPosition {
        surface.erase_glyph_at(self.position.x, self.position.y);
        self.position = self.bounds.center();
        debug!("Recentered to {}", self.position);
        self.render(surface);
        self.position
    }

    fn render(&self, surface: &mut dyn DisplaySurface) {
        surface.render_glyph_at(
            self.position.x,
            self.position.y,
            self.glyph.symbol,
            self.glyph.foreground,
            self.glyph.background,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::testing::{DrawCall, RecordingSurface};

    fn controller() -> MotionController {
        MotionController::new(SurfaceGeometry::DEFAULT, Glyph::default())
    }

    fn edge(direction: Direction) -> DirectionSet {
        DirectionSet::of(&[direction])
    }

    #[test]
    fn starts_at_center() {
        assert_eq!(controller().position(), CursorPosition::new(152, 108));
    }

    #[test]
    fn edge_right_moves_by_default_step() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();

        let event = motion.advance(
            edge(Direction::Right),
            None,
            StepSize::DEFAULT,
            false,
            &mut surface,
        );

        assert_eq!(
            event,
            Some(MotionEvent::Moved {
                direction: Direction::Right,
                trigger: MoveTrigger::Edge,
                from: CursorPosition::new(152, 108),
                to: CursorPosition::new(154, 108),
            })
        );
        assert_eq!(
            surface.calls(),
            vec![DrawCall::Erase(152, 108), DrawCall::Render(154, 108, 'X')]
        );
    }

    #[test]
    fn simultaneous_up_and_left_resolves_to_up() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();
        let edges = DirectionSet::of(&[Direction::Left, Direction::Up]);

        motion.advance(edges, None, StepSize::DEFAULT, false, &mut surface);
        assert_eq!(motion.position(), CursorPosition::new(152, 106));
    }

    #[test]
    fn coarse_step_applies_to_edge_moves() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();

        let edges = edge(Direction::Down);
        motion.advance(edges, None, StepSize::COARSE, false, &mut surface);
        assert_eq!(motion.position(), CursorPosition::new(152, 112));
    }

    #[test]
    fn edge_beats_recenter_and_repeat() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();

        let event = motion.advance(
            edge(Direction::Left),
            Some(Direction::Right),
            StepSize::DEFAULT,
            true,
            &mut surface,
        );
        assert!(matches!(
            event,
            Some(MotionEvent::Moved {
                direction: Direction::Left,
                trigger: MoveTrigger::Edge,
                ..
            })
        ));
        assert_eq!(motion.position(), CursorPosition::new(150, 108));
    }

    #[test]
    fn recenter_overrides_repeat() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();
        motion.move_by(20, 20, &mut surface);

        let event = motion.advance(
            DirectionSet::EMPTY,
            Some(Direction::Up),
            StepSize::DEFAULT,
            true,
            &mut surface,
        );
        assert_eq!(
            event,
            Some(MotionEvent::Recentered {
                from: CursorPosition::new(172, 128),
                to: CursorPosition::new(152, 108),
            })
        );
    }

    #[test]
    fn repeat_moves_when_nothing_else_happens() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();

        let event = motion.advance(
            DirectionSet::EMPTY,
            Some(Direction::Right),
            StepSize::DEFAULT,
            false,
            &mut surface,
        );
        assert!(matches!(
            event,
            Some(MotionEvent::Moved {
                trigger: MoveTrigger::Repeat,
                ..
            })
        ));
        assert_eq!(motion.position(), CursorPosition::new(154, 108));
    }

    #[test]
    fn quiet_cycle_draws_nothing() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();

        let edges = DirectionSet::EMPTY;
        let event = motion.advance(edges, None, StepSize::DEFAULT, false, &mut surface);
        assert_eq!(event, None);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn move_at_boundary_still_redraws_in_place() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();
        motion.move_by(-1000, -1000, &mut surface);
        assert_eq!(motion.position(), CursorPosition::new(0, 0));

        surface.clear_calls();
        motion.move_by(-2, 0, &mut surface);
        assert_eq!(motion.position(), CursorPosition::new(0, 0));
        assert_eq!(
            surface.calls(),
            vec![DrawCall::Erase(0, 0), DrawCall::Render(0, 0, 'X')]
        );
    }

    #[test]
    fn extreme_deltas_saturate_then_clamp() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();

        motion.move_by(i32::MAX, i32::MAX, &mut surface);
        assert_eq!(motion.position(), CursorPosition::new(304, 216));
        motion.move_by(i32::MIN, i32::MIN, &mut surface);
        assert_eq!(motion.position(), CursorPosition::new(0, 0));
    }

    #[test]
    fn recenter_twice_is_stable() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();
        motion.move_by(-40, 30, &mut surface);

        let first = motion.recenter(&mut surface);
        let second = motion.recenter(&mut surface);
        assert_eq!(first, second);
        assert_eq!(second, CursorPosition::new(152, 108));
    }

    #[test]
    fn position_stays_in_bounds_for_long_move_sequences() {
        let mut motion = controller();
        let mut surface = RecordingSurface::new();
        let bounds = motion.bounds();

        // Deterministic LCG so failures are reproducible
        let mut seed: u32 = 0x2545_F491;
        for _ in 0..5_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let direction = Direction::PRIORITY[(seed >> 28) as usize % 4];
            let step = if seed & 0x100 == 0 {
                StepSize::DEFAULT
            } else {
                StepSize::COARSE
            };
            let edges = if seed & 0x200 == 0 {
                DirectionSet::of(&[direction])
            } else {
                DirectionSet::EMPTY
            };
            let recenter = seed & 0xF000 == 0;

            motion.advance(edges, Some(direction), step, recenter, &mut surface);
            assert!(bounds.contains(motion.position()), "{}", motion.position());
        }
    }

    #[test]
    fn place_renders_without_erase() {
        let motion = controller();
        let mut surface = RecordingSurface::new();
        motion.place(&mut surface);
        assert_eq!(surface.calls(), vec![DrawCall::Render(152, 108, 'X')]);
    }
}
