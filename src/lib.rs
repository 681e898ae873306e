#![warn(missing_docs)]

//! # `pipefitter`
//!
//! A hint engine for the "pipes" rotation puzzle, as found on puzzle-pipes.com and elsewhere.
//! Every cell of the grid holds a pipe piece of fixed shape; the player turns pieces until all of them join into a single network with no loops and no loose ends.
//!
//! Begin by building a board with a [`BoardBuilder`], from cell records, page class lists, or rendered glyph text.
//! Then ask [`Board::attempt_solve`] about individual cells, or sweep the whole grid with [`Board::solve_all`].
//!
//! # Internals
//! Solving is purely local constraint propagation; there is no search and no backtracking.
//! Each cell only looks at what its four neighbors say about their shared sides ([`Connection`]) and at the neighbors' shapes,
//! and the first deduction in a fixed per-shape order that forces a facing wins.
//!
//! Two kinds of deduction lean on the puzzle's global rule that the finished network is a spanning tree:
//! 1. Island avoidance. Two endpoints facing each other, or an endpoint, a line, and an endpoint in a row, would be a network of their own.
//! 2. Loop avoidance. If this cell and a neighbor are already joined some other way, joining them directly would close a loop.
//! The second uses [`Board::is_connected_to`], a bounded flood fill over known connections that reports contradictory pins rather than trusting them.
//!
//! If local reasoning is not enough, a cell is simply left alone; it may become solvable once more neighbors are pinned.

pub use board::{Board, BoardError};
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use cell::Cell;
pub use connectivity::ConnectivityError;
pub use direction::{Direction, InvalidDirection};
pub use location::Location;
pub use logic::Connection;
pub use shape::Shape;
pub use solver::{SolveStep, SweepOptions, SweepReport};

pub(crate) mod board;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod connectivity;
pub(crate) mod direction;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod shape;
pub(crate) mod solver;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
