use std::str::FromStr;

use strum::{Display, VariantArray};
use thiserror::Error;

/// A value that does not name one of the four [`Direction`]s.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("`{0}` is not a direction")]
pub struct InvalidDirection(pub String);

/// The four sides of a square cell.
///
/// Variants are declared in clockwise order, so [`Direction::VARIANTS`] walks the cycle `UP -> RIGHT -> DOWN -> LEFT`.
#[derive(Copy, Clone, Debug, Display, VariantArray, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// Position of `self` in the clockwise cycle, starting at [`Up`](Direction::Up).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_cycle(index: usize) -> Self {
        Self::VARIANTS[index % Self::VARIANTS.len()]
    }

    /// Advance `times` quarter turns clockwise.
    pub fn rotate_clockwise(self, times: usize) -> Self {
        Self::from_cycle(self.index() + times % 4)
    }

    /// Advance `times` quarter turns counterclockwise.
    pub fn rotate_counterclockwise(self, times: usize) -> Self {
        self.rotate_clockwise(4 - times % 4)
    }

    /// The half turn of `self`.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Number of clockwise quarter turns (0 to 3) taking `self` to `target`.
    pub fn rotations_from_clockwise(self, target: Self) -> usize {
        (target.index() + 4 - self.index()) % 4
    }

    /// Number of counterclockwise quarter turns (0 to 3) taking `self` to `target`.
    pub fn rotations_from_counterclockwise(self, target: Self) -> usize {
        (4 - self.rotations_from_clockwise(target)) % 4
    }

    /// Whether `self` and `other` lie on the same axis.
    #[inline]
    pub fn is_parallel_to(self, other: Self) -> bool {
        self == other || self == other.opposite()
    }

    /// The `(x, y)` offset of one step in this direction; `y` grows downward.
    pub(crate) fn step(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VARIANTS.iter()
            .find(|direction| direction.to_string().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| InvalidDirection(s.to_owned()))
    }
}

impl TryFrom<usize> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::VARIANTS.get(value)
            .copied()
            .ok_or_else(|| InvalidDirection(value.to_string()))
    }
}
