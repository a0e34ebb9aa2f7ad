use tracing::debug;

use super::DirectionSet;

/// Derives rising edges from consecutive direction samples.
///
/// The previous sample starts out as "no input active" rather than uninitialised
/// state, so no spurious edge can appear. A line already held at power-up is
/// reported once, as a single press, in the first cycle.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: DirectionSet,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call exactly once per cycle; the stored sample is overwritten
    pub fn detect(&mut self, current: DirectionSet) -> DirectionSet {
        let edges = current.rising_from(self.previous);
        if !edges.is_empty() {
            debug!("Rising edges: {:?} (previous {:?})", edges, self.previous);
        }
        self.previous = current;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    #[test]
    fn press_registers_once_while_held() {
        let mut detector = EdgeDetector::new();
        let up = DirectionSet::of(&[Direction::Up]);

        assert_eq!(detector.detect(up), up);
        assert!(detector.detect(up).is_empty());
        assert!(detector.detect(up).is_empty());
    }

    #[test]
    fn release_and_press_again_fires_again() {
        let mut detector = EdgeDetector::new();
        let left = DirectionSet::of(&[Direction::Left]);

        detector.detect(left);
        assert!(detector.detect(DirectionSet::EMPTY).is_empty());
        assert_eq!(detector.detect(left), left);
    }

    #[test]
    fn adding_a_direction_only_reports_the_new_one() {
        let mut detector = EdgeDetector::new();
        detector.detect(DirectionSet::of(&[Direction::Right]));

        let edges = detector.detect(DirectionSet::of(&[Direction::Right, Direction::Down]));
        assert_eq!(edges, DirectionSet::of(&[Direction::Down]));
    }

    #[test]
    fn idle_start_reports_nothing() {
        let mut detector = EdgeDetector::new();
        assert!(detector.detect(DirectionSet::EMPTY).is_empty());
    }
}
