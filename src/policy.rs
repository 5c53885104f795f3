//! Wall-following decision policy.
//!
//! Every time the mouse stops it probes one relative direction: left first, then straight ahead,
//! then right, then behind. Each probe is a quarter turn; only the first probe after a move turns
//! left, the other three keep turning right, so a full cycle leaves the mouse facing back the way
//! it came.

use crate::mouse::Mouse;

/// Which relative direction the mouse probes on its next stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookPhase {
    /// Probe to the left of the heading the mouse arrived with.
    Left,
    /// Probe straight ahead.
    Forward,
    /// Probe to the right.
    Right,
    /// Probe behind.
    Back,
}

/// Direction of a quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise, towards lower angles.
    Left,
    /// Clockwise, towards higher angles.
    Right,
}

impl Turn {
    /// Sign of the angular velocity of this turn.
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.,
            Self::Right => 1.,
        }
    }
}

impl LookPhase {
    /// Returns the turn this phase performs and the phase that follows it.
    pub const fn probe(self) -> (Turn, Self) {
        match self {
            Self::Left => (Turn::Left, Self::Forward),
            Self::Forward => (Turn::Right, Self::Right),
            Self::Right => (Turn::Right, Self::Back),
            Self::Back => (Turn::Right, Self::Left),
        }
    }
}

/// Turns the mouse towards the next direction to probe and advances its look phase.
///
/// Only called while the mouse is stopped and has not left the maze. The mouse starts turning at
/// `turning_speed` degrees per second.
pub fn look_next(mouse: &mut Mouse, turning_speed: f32) {
    let (turn, next) = mouse.look().probe();

    mouse.start_turning(turn, turning_speed);
    mouse.set_look(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimConfig, direction::Direction, mouse::Mode};

    #[test]
    fn test_phases_cycle_with_period_four() {
        let mut phase = LookPhase::Left;
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(phase);
            phase = phase.probe().1;
        }

        assert_eq!(
            seen,
            vec![
                LookPhase::Left,
                LookPhase::Forward,
                LookPhase::Right,
                LookPhase::Back,
                LookPhase::Left,
                LookPhase::Forward,
                LookPhase::Right,
                LookPhase::Back,
            ]
        );
    }

    #[test]
    fn test_only_left_phase_turns_left() {
        assert_eq!(LookPhase::Left.probe().0, Turn::Left);
        assert_eq!(LookPhase::Forward.probe().0, Turn::Right);
        assert_eq!(LookPhase::Right.probe().0, Turn::Right);
        assert_eq!(LookPhase::Back.probe().0, Turn::Right);
    }

    #[test]
    fn test_look_next_sequence_of_headings() {
        let config = SimConfig::default();
        let mut mouse = Mouse::new(&config);
        let original = mouse.facing();

        let mut headings = Vec::new();
        for _ in 0..4 {
            look_next(&mut mouse, config.turning_speed);
            headings.push(mouse.facing());
        }

        assert_eq!(original, Direction::East);
        assert_eq!(
            headings,
            vec![
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West
            ]
        );
        assert_eq!(mouse.facing(), original.opposite());
        assert_eq!(mouse.look(), LookPhase::Left);
    }

    #[test]
    fn test_look_next_from_back_returns_to_left() {
        let config = SimConfig::default();
        let mut mouse = Mouse::new(&config);
        mouse.set_look(LookPhase::Back);
        let before = mouse.facing();

        look_next(&mut mouse, config.turning_speed);

        assert_eq!(mouse.look(), LookPhase::Left);
        assert_eq!(mouse.facing(), before.turn_right());
    }

    #[test]
    fn test_look_next_starts_turning() {
        let config = SimConfig::default();
        let mut mouse = Mouse::new(&config);

        look_next(&mut mouse, config.turning_speed);
        assert_eq!(mouse.mode(), Mode::Turning);
        assert!(mouse.angular_velocity() < 0., "left probe should turn left");

        let mut mouse = Mouse::new(&config);
        mouse.set_look(LookPhase::Forward);
        look_next(&mut mouse, config.turning_speed);
        assert!(mouse.angular_velocity() > 0., "forward probe should turn right");
    }
}
