use strum::{Display, VariantArray};

use crate::direction::Direction;

/// The closed set of pipe pieces.
///
/// Every piece other than [`Wall`](Shape::Wall) has a default look in which it faces [`Down`](Direction::Down);
/// its outlets in any other facing are that default set rotated clockwise.
#[derive(Copy, Clone, Debug, Display, VariantArray, Eq, PartialEq, Hash)]
pub enum Shape {
    /// One outlet, pointing the way the cell faces.
    Endpoint,
    /// Two opposite outlets along the facing axis.
    Line,
    /// Two adjacent outlets. Facing down, it looks like `┗`.
    Elbow,
    /// Three outlets; the side opposite the facing is closed. Facing down, it looks like `┳`.
    ThreeWay,
    /// Off-grid sentinel with no outlets.
    Wall,
}

impl Shape {
    /// Whether a piece of this shape facing `facing` has an outlet on side `side`.
    pub fn has_outlet(self, facing: Direction, side: Direction) -> bool {
        match self {
            Self::Endpoint => side == facing,
            Self::Line => side.is_parallel_to(facing),
            Self::Elbow => side == facing.opposite() || side == facing.rotate_counterclockwise(1),
            Self::ThreeWay => side != facing.opposite(),
            Self::Wall => false,
        }
    }

    /// Distinct facings of this shape; a line looks the same after half a turn.
    pub(crate) fn period(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Wall => 1,
            _ => 4,
        }
    }

    /// Clockwise quarter turns needed to take a piece facing `from` to the look of one facing `to`.
    pub fn rotations_needed(self, from: Direction, to: Direction) -> usize {
        from.rotations_from_clockwise(to) % self.period()
    }

    /// The box-drawing character for a piece facing `facing`. Walls render as a blank.
    pub fn glyph(self, facing: Direction) -> char {
        match self {
            Self::Endpoint => match facing {
                Direction::Up => '╹',
                Direction::Down => '╻',
                Direction::Left => '╸',
                Direction::Right => '╺',
            },
            Self::Line => match facing {
                Direction::Up | Direction::Down => '┃',
                Direction::Left | Direction::Right => '━',
            },
            Self::Elbow => match facing {
                Direction::Up => '┓',
                Direction::Down => '┗',
                Direction::Left => '┏',
                Direction::Right => '┛',
            },
            Self::ThreeWay => match facing {
                Direction::Up => '┻',
                Direction::Down => '┳',
                Direction::Left => '┫',
                Direction::Right => '┣',
            },
            Self::Wall => ' ',
        }
    }

    /// Inverse of [`Shape::glyph`] for grid pieces.
    ///
    /// Line glyphs come back facing [`Down`](Direction::Down) or [`Right`](Direction::Right).
    pub fn from_glyph(glyph: char) -> Option<(Self, Direction)> {
        Some(match glyph {
            '╹' => (Self::Endpoint, Direction::Up),
            '╻' => (Self::Endpoint, Direction::Down),
            '╸' => (Self::Endpoint, Direction::Left),
            '╺' => (Self::Endpoint, Direction::Right),
            '┃' => (Self::Line, Direction::Down),
            '━' => (Self::Line, Direction::Right),
            '┓' => (Self::Elbow, Direction::Up),
            '┗' => (Self::Elbow, Direction::Down),
            '┏' => (Self::Elbow, Direction::Left),
            '┛' => (Self::Elbow, Direction::Right),
            '┻' => (Self::ThreeWay, Direction::Up),
            '┳' => (Self::ThreeWay, Direction::Down),
            '┫' => (Self::ThreeWay, Direction::Left),
            '┣' => (Self::ThreeWay, Direction::Right),
            _ => return None,
        })
    }

    /// Shapes with outlets on both axes, whatever their facing.
    #[inline]
    pub(crate) fn turns_corners(self) -> bool {
        matches!(self, Self::Elbow | Self::ThreeWay)
    }
}
