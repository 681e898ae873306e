use std::fmt::{Display, Formatter};

use crate::direction::Direction;
use crate::logic::Connection;
use crate::shape::Shape;

/// One pipe piece on the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Cell {
    pub(crate) shape: Shape,
    pub(crate) facing: Direction,
    pub(crate) pinned: bool,
}

/// Stands in for every off-board neighbor of a bounded grid.
pub(crate) const WALL: Cell = Cell {
    shape: Shape::Wall,
    facing: Direction::Down,
    pinned: true,
};

impl Cell {
    /// A cell of `shape` currently facing `facing`.
    pub fn new(shape: Shape, facing: Direction, pinned: bool) -> Self {
        Self { shape, facing, pinned }
    }

    /// The piece this cell holds.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The side this cell currently faces.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether the facing is final.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// What this cell alone says about `side`, without looking at any neighbor.
    ///
    /// Only pinned cells (walls included) know their outlets.
    pub(crate) fn own_connection(&self, side: Direction) -> Connection {
        match self.pinned {
            true => Connection::from_outlet(self.shape.has_outlet(self.facing, side)),
            false => Connection::Unknown,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.shape.glyph(self.facing))
    }
}
