use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// One coordinate of a [`Location`].
pub type Coord = usize;
/// Width or height of a grid.
pub type Dimension = NonZero<Coord>;

/// A cell position on a [`Board`](crate::Board), in `(x, y)` order with the origin at the top left.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(
    /// Column.
    pub Coord,
    /// Row.
    pub Coord,
);

impl Location {
    /// Row-major index into the backing array.
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
