use log::trace;

/// Direction the snake can move on the ground plane
///
/// Forward points away from the viewer (negative z), Backward towards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Forward,
    Backward,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Returns the unit delta (dx, dz) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Forward => (0, -1),
            Direction::Backward => (0, 1),
        }
    }
}

/// Holds the committed heading and filters out reversals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionController {
    current: Direction,
}

impl DirectionController {
    pub const DEFAULT: Direction = Direction::Right;

    pub fn new() -> Self {
        Self {
            current: Self::DEFAULT,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    /// Apply a direction request immediately.
    ///
    /// Returns false and leaves the heading untouched when the request is the
    /// exact opposite of the committed direction.
    pub fn request_change(&mut self, new_direction: Direction) -> bool {
        if self.current.is_opposite(new_direction) {
            trace!(
                "Ignoring reversal from {:?} to {:?}",
                self.current, new_direction
            );
            return false;
        }

        self.current = new_direction;
        true
    }

    pub fn reset(&mut self) {
        self.current = Self::DEFAULT;
    }
}

impl Default for DirectionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Backward,
    ];

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));
        assert!(Direction::Forward.is_opposite(Direction::Backward));
        assert!(Direction::Backward.is_opposite(Direction::Forward));

        assert!(!Direction::Left.is_opposite(Direction::Forward));
        assert!(!Direction::Left.is_opposite(Direction::Left));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Forward.delta(), (0, -1));
        assert_eq!(Direction::Backward.delta(), (0, 1));

        for direction in ALL {
            let (dx, dz) = direction.delta();
            assert_eq!(dx.abs() + dz.abs(), 1);
        }
    }

    #[test]
    fn test_controller_starts_rightward() {
        let controller = DirectionController::new();
        assert_eq!(controller.current(), Direction::Right);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut controller = DirectionController::new();
        assert!(!controller.request_change(Direction::Left));
        assert_eq!(controller.current(), Direction::Right);
    }

    #[test]
    fn test_perpendicular_then_reverse_of_start_heading_accepted() {
        // Two presses inside a single tick are both legal changes
        let mut controller = DirectionController::new();
        assert!(controller.request_change(Direction::Forward));
        assert!(controller.request_change(Direction::Left));
        assert_eq!(controller.current(), Direction::Left);
    }

    #[test]
    fn test_never_commits_reversal() {
        // Walk a long deterministic sequence and check each committed change
        let mut controller = DirectionController::new();
        let mut previous = controller.current();

        for i in 0..200usize {
            let request = ALL[(i * 7 + i / 3) % 4];
            let accepted = controller.request_change(request);
            let current = controller.current();

            assert_eq!(accepted, !previous.is_opposite(request));
            assert!(!previous.is_opposite(current));
            previous = current;
        }
    }

    #[test]
    fn test_reset() {
        let mut controller = DirectionController::new();
        controller.request_change(Direction::Backward);
        controller.reset();
        assert_eq!(controller.current(), Direction::Right);
    }
}
