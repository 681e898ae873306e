use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::cell::{Cell, WALL};
use crate::direction::Direction;
use crate::location::{Dimension, Location};
use crate::logic::Connection;
use crate::shape::Shape;

/// Reasons a query or notification against a [`Board`] may be refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum BoardError {
    /// The named cell lies outside the grid.
    #[error("{location} is outside the grid")]
    OutOfBounds {
        /// The offending location.
        location: Location,
    },
}

/// One puzzle instance: a rectangular, optionally toroidal, grid of [`Cell`]s.
///
/// Cells live in a row-major arena and never hold references to each other.
/// Neighbors are resolved from coordinates on demand, with anything past the edge of a bounded grid reading as a wall.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder).
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    // width, height
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) wrap: bool,
}

impl Board {
    /// `(width, height)` of the grid.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Whether opposite edges are adjacent.
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Number of cells on the grid.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a built board; present to pair with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every location, in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.cells.indexed_iter().map(|(index, _)| Location::from(index))
    }

    /// The cell at `location`, if it lies on the grid.
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        self.cells.get(location.as_index())
    }

    #[inline]
    pub(crate) fn cell_or_wall(&self, location: Option<Location>) -> &Cell {
        location.and_then(|location| self.cell(location)).unwrap_or(&WALL)
    }

    /// The cell one step from `location` towards `direction`, or [`None`] if that step leaves a bounded grid.
    pub fn neighbor(&self, location: Location, direction: Direction) -> Option<Location> {
        let (width, height) = (self.dims.0.get(), self.dims.1.get());
        if self.wrap {
            let (dx, dy) = direction.step();
            Some(Location(
                (location.0 % width + width).wrapping_add_signed(dx) % width,
                (location.1 % height + height).wrapping_add_signed(dy) % height,
            ))
        } else {
            let next = location.offset_by(direction.step());
            (next.0 < width && next.1 < height).then_some(next)
        }
    }

    /// What the cell at `location` says about its own `side`.
    ///
    /// Pinned cells answer from their shape and facing.
    /// An unpinned elbow has exactly one outlet on each axis, so it can read its answer off the pinned neighbor across from `side`.
    /// Anything else unpinned answers [`Unknown`](Connection::Unknown).
    pub fn has_connection(&self, location: Location, side: Direction) -> Connection {
        let cell = self.cell_or_wall(Some(location));
        match (cell.pinned, cell.shape) {
            (false, Shape::Elbow) => {
                let across = self.cell_or_wall(self.neighbor(location, side.opposite()));
                match across.own_connection(side) {
                    Connection::Connected => Connection::Blocked,
                    Connection::Blocked => Connection::Connected,
                    Connection::Unknown => Connection::Unknown,
                }
            }
            _ => cell.own_connection(side),
        }
    }

    /// What the neighbor on `side` of `location` says about the side facing back.
    pub(crate) fn report(&self, location: Location, side: Direction) -> Connection {
        match self.neighbor(location, side) {
            Some(neighbor) => self.has_connection(neighbor, side.opposite()),
            None => Connection::Blocked,
        }
    }

    /// Everything known about the edge on `side` of `location`, from either end.
    pub(crate) fn link(&self, location: Location, side: Direction) -> Connection {
        self.has_connection(location, side).combine(self.report(location, side))
    }

    /// Clockwise quarter turns needed for the cell at `location` to look like it faces `target`.
    pub fn rotations_needed_to_face(&self, location: Location, target: Direction) -> Result<usize, BoardError> {
        let cell = self.cell(location).ok_or(BoardError::OutOfBounds { location })?;
        Ok(cell.shape.rotations_needed(cell.facing, target))
    }

    /// Record that the user rotated and/or pinned a cell. Nothing but those two fields changes.
    pub fn notify(&mut self, location: Location, facing: Direction, pinned: bool) -> Result<(), BoardError> {
        let cell = self.cells.get_mut(location.as_index()).ok_or(BoardError::OutOfBounds { location })?;
        cell.facing = facing;
        cell.pinned = pinned;
        Ok(())
    }

    /// Render one glyph per cell, row by row, with `delimiter` after every row.
    pub fn stringify(&self, delimiter: &str) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.cells.nrows() * delimiter.len());

        for row in self.cells.rows() {
            for cell in row {
                out.push(cell.shape.glyph(cell.facing));
            }
            out.push_str(delimiter);
        }

        out
    }

    /// Whether every cell is pinned and the pinned pipes form one loop-free network with no dangling outlets.
    pub fn is_solved(&self) -> bool {
        if self.cells.iter().any(|cell| !cell.pinned) {
            return false;
        }

        let mut links = HashSet::with_capacity(self.len());
        let mut seams = 0;
        for location in self.locations() {
            for side in Direction::VARIANTS.iter().copied() {
                let own = self.has_connection(location, side);
                if own != self.report(location, side) {
                    return false;
                }
                if let (Connection::Connected, Some(other)) = (own, self.neighbor(location, side)) {
                    seams += 1;
                    links.insert(UnorderedPair::from((location, other)));
                }
            }
        }

        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(self.len(), links.len());
        for location in self.locations() {
            graph.add_node(location);
        }
        for UnorderedPair(l1, l2) in links {
            graph.add_edge(l1, l2, ());
        }

        // each seam was counted from both ends; two seams between one pair of cells still make a loop
        seams / 2 + 1 == graph.node_count() && connected_components(&graph) == 1
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stringify("\n"))
    }
}
