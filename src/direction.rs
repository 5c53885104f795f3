//! Cardinal directions and the per-cell wall set built from them.

use std::fmt;

/// Number of degrees in a full rotation.
pub const FULL_TURN: f32 = 360.;

/// One of the four cardinal directions of the maze.
///
/// The declaration order is the clockwise order used for turning, so turning right is the
/// successor and turning left the predecessor of a direction, both modulo four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero (up on screen).
    North,
    /// Towards the last column (right on screen).
    East,
    /// Towards the last row (down on screen).
    South,
    /// Towards column zero (left on screen).
    West,
}

impl Direction {
    /// All directions in clockwise order, starting at north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of the direction in [`Direction::ALL`].
    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction at `index` modulo four in [`Direction::ALL`].
    const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Returns the direction a quarter turn counter-clockwise from this one.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Returns the direction a quarter turn clockwise from this one.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Returns the direction facing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Wall bit used for this direction in maze descriptions.
    ///
    /// North is 1, east 2, south 4 and west 8.
    pub const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }

    /// Absolute rotation in degrees, clockwise from north.
    pub const fn degrees(self) -> f32 {
        match self {
            Self::North => 0.,
            Self::East => 90.,
            Self::South => 180.,
            Self::West => 270.,
        }
    }

    /// Change in `(row, column)` of a one cell step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Returns the coordinates one cell away in this direction, or [`None`] when the step would
    /// go below row or column zero.
    pub fn step(self, row: usize, column: usize) -> Option<(usize, usize)> {
        let (row_delta, column_delta) = self.delta();

        Some((
            row.checked_add_signed(isize::from(row_delta))?,
            column.checked_add_signed(isize::from(column_delta))?,
        ))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };

        formatter.write_str(name)
    }
}

/// Set of walls present on the sides of one cell.
///
/// Stored as the same bitmask used by maze descriptions. Only the low four bits are ever set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Walls(u8);

impl Walls {
    /// A cell with no walls.
    pub const NONE: Self = Self(0);
    /// A cell closed on every side.
    pub const ALL: Self = Self(0b1111);

    /// Builds a wall set from a description bitmask, rejecting bits outside the four directions.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Returns the description bitmask of this set.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the wall on the `direction` side is present.
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Returns this set with the wall on the `direction` side added.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Iterates over the present walls in clockwise order from north.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_right_cycles_clockwise() {
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::East.turn_right(), Direction::South);
        assert_eq!(Direction::South.turn_right(), Direction::West);
        assert_eq!(Direction::West.turn_right(), Direction::North);
    }

    #[test]
    fn test_turn_left_cycles_counter_clockwise() {
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::West.turn_left(), Direction::South);
        assert_eq!(Direction::South.turn_left(), Direction::East);
        assert_eq!(Direction::East.turn_left(), Direction::North);
    }

    #[test]
    fn test_turns_are_inverse() {
        for direction in Direction::ALL {
            assert_eq!(direction.turn_left().turn_right(), direction);
            assert_eq!(direction.turn_right().turn_left(), direction);
            assert_eq!(direction.turn_right().turn_right(), direction.opposite());
        }
    }

    #[test]
    fn test_turns_change_rotation_by_quarter() {
        for direction in Direction::ALL {
            let right = (direction.turn_right().degrees() - direction.degrees()).rem_euclid(FULL_TURN);
            let left = (direction.degrees() - direction.turn_left().degrees()).rem_euclid(FULL_TURN);

            assert!((right - 90.).abs() < f32::EPSILON, "right turn from {direction}");
            assert!((left - 90.).abs() < f32::EPSILON, "left turn from {direction}");
        }
    }

    #[test]
    fn test_bits_match_description_format() {
        assert_eq!(Direction::North.bit(), 1);
        assert_eq!(Direction::East.bit(), 2);
        assert_eq!(Direction::South.bit(), 4);
        assert_eq!(Direction::West.bit(), 8);
    }

    #[test]
    fn test_step_stops_at_origin() {
        assert_eq!(Direction::North.step(0, 3), None);
        assert_eq!(Direction::West.step(2, 0), None);
        assert_eq!(Direction::North.step(1, 3), Some((0, 3)));
        assert_eq!(Direction::East.step(1, 3), Some((1, 4)));
        assert_eq!(Direction::South.step(1, 3), Some((2, 3)));
        assert_eq!(Direction::West.step(1, 3), Some((1, 2)));
    }

    #[test]
    fn test_walls_from_bits() {
        let walls = Walls::from_bits(0b0101).expect("mask within range should be accepted");

        assert!(walls.contains(Direction::North));
        assert!(!walls.contains(Direction::East));
        assert!(walls.contains(Direction::South));
        assert!(!walls.contains(Direction::West));
        assert_eq!(walls.bits(), 5);
        assert_eq!(
            walls.iter().collect::<Vec<_>>(),
            vec![Direction::North, Direction::South]
        );
    }

    #[test]
    fn test_walls_reject_unknown_bits() {
        assert_eq!(Walls::from_bits(16), None);
        assert_eq!(Walls::from_bits(0xff), None);
        assert_eq!(Walls::from_bits(15), Some(Walls::ALL));
    }

    #[test]
    fn test_walls_with() {
        let walls = Walls::NONE.with(Direction::East).with(Direction::West);

        assert_eq!(walls.bits(), 0b1010);
    }
}
