//! Assembling a [`Board`] from extracted cell records.

use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;

use crate::board::Board;
use crate::cell::Cell;
use crate::direction::Direction;
use crate::location::{Dimension, Location};
use crate::shape::Shape;

/// Marks the preceding glyph as pinned in glyph text.
pub const PIN_MARK: char = '*';

// pipe class, shape, clockwise turns from the default look
const PIPE_CLASSES: [(&str, Shape, usize); 14] = [
    ("pipe1", Shape::Endpoint, 3),
    ("pipe2", Shape::Endpoint, 2),
    ("pipe3", Shape::Elbow, 0),
    ("pipe4", Shape::Endpoint, 1),
    ("pipe5", Shape::Line, 1),
    ("pipe6", Shape::Elbow, 3),
    ("pipe7", Shape::ThreeWay, 2),
    ("pipe8", Shape::Endpoint, 0),
    ("pipe9", Shape::Elbow, 1),
    ("pipe10", Shape::Line, 0),
    ("pipe11", Shape::ThreeWay, 3),
    ("pipe12", Shape::Elbow, 2),
    ("pipe13", Shape::ThreeWay, 0),
    ("pipe14", Shape::ThreeWay, 1),
];

// the page counts its rotation classes counterclockwise
const ROTATION_CLASSES: [(&str, usize); 4] = [
    ("cell-0", 0),
    ("cell-3", 1),
    ("cell-2", 2),
    ("cell-1", 3),
];

const PINNED_CLASS: &str = "pinned";

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A cell description has no known shape and rotation.
    #[error("unrecognized cell type `{code}`")]
    UnrecognizedCellType {
        /// The glyph or class list as given.
        code: String,
    },
    /// The number of cells supplied does not fill the grid exactly.
    #[error("grid size mismatch: expected {expected} cells, found {found}")]
    GridSizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Cells actually added.
        found: usize,
    },
    /// A row of glyph text is wider or narrower than the first row.
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A cell was placed outside the bounds given by the dimensions.
    #[error("cell placed outside the grid at {location}")]
    CellOutOfBounds {
        /// Where the cell was placed.
        location: Location,
    },
    /// Walls only exist past the edge of the grid.
    #[error("walls cannot be placed on the grid")]
    WallInGrid,
}

/// Collects extracted cell records, row by row, into a [`Board`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once any [`BuilderInvalidReason`] has arisen, further additions do nothing and [`build`](Self::build) fails.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    wrap: bool,
    cells: Vec<Cell>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(width, height)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            wrap: false,
            cells: Vec::with_capacity(dims.0.get() * dims.1.get()),
            invalid_reasons: Default::default(),
        }
    }

    /// Parse glyph text, one row per line, as rendered by [`Board::stringify`].
    ///
    /// A [`PIN_MARK`] right after a glyph pins that cell. Blank lines and trailing whitespace are ignored.
    /// Dimensions come from the number of rows and the length of the first.
    /// Any row of a different length puts the builder in a [`RaggedRow`](BuilderInvalidReason::RaggedRow) invalid state.
    pub fn from_glyphs(text: &str, wrap: bool) -> Self {
        let rows = text.lines()
            .map(str::trim_end)
            .filter(|row| !row.is_empty())
            .collect_vec();
        let row_width = |row: &str| row.chars().filter(|c| *c != PIN_MARK).count();
        let width = rows.first().map_or(0, |row| row_width(*row));

        let mut builder = Self::with_dims((
            NonZero::new(width).unwrap_or(NonZero::<usize>::MIN),
            NonZero::new(rows.len()).unwrap_or(NonZero::<usize>::MIN),
        ));
        builder.wrapping(wrap);

        for (index, row) in rows.into_iter().enumerate() {
            let found = row_width(row);
            if found != width {
                builder.invalidate(BuilderInvalidReason::RaggedRow { row: index, expected: width, found });
                break;
            }

            let mut glyphs = row.chars().peekable();
            while let Some(glyph) = glyphs.next() {
                let pinned = glyphs.next_if_eq(&PIN_MARK).is_some();
                builder.add_glyph(glyph, pinned);
            }
        }

        builder
    }

    /// Make opposite edges of the grid adjacent.
    pub fn wrapping(&mut self, wrap: bool) -> &mut Self {
        self.wrap = wrap;
        self
    }

    /// Append the next cell in row-major order.
    ///
    /// May cause the builder to enter a [`WallInGrid`](BuilderInvalidReason::WallInGrid) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_cell(&mut self, shape: Shape, facing: Direction, pinned: bool) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if shape == Shape::Wall {
            self.invalid_reasons.push(BuilderInvalidReason::WallInGrid);
            return self;
        }

        self.cells.push(Cell::new(shape, facing, pinned));
        self
    }

    /// Append the next cell from its rendered glyph.
    ///
    /// May cause the builder to enter an [`UnrecognizedCellType`](BuilderInvalidReason::UnrecognizedCellType) invalid state.
    pub fn add_glyph(&mut self, glyph: char, pinned: bool) -> &mut Self {
        match Shape::from_glyph(glyph) {
            Some((shape, facing)) => self.add_cell(shape, facing, pinned),
            None => self.invalidate(BuilderInvalidReason::UnrecognizedCellType { code: glyph.to_string() }),
        }
    }

    /// Append the next cell from the class list of its element on the puzzle page, e.g. `"cell pipe7 cell-2 pinned"`.
    ///
    /// The `pipeN` class picks the shape and a base rotation, the `cell-N` class adds further clockwise turns,
    /// and a `pinned` class pins the cell.
    /// A missing or unknown pipe or rotation class causes an [`UnrecognizedCellType`](BuilderInvalidReason::UnrecognizedCellType) invalid state.
    pub fn add_classes(&mut self, classes: &str) -> &mut Self {
        let tokens = classes.split_whitespace().collect_vec();
        let pipe = tokens.iter().find_map(|token| PIPE_CLASSES.iter().find(|(name, ..)| name == token));
        let rotation = tokens.iter().find_map(|token| ROTATION_CLASSES.iter().find(|(name, _)| name == token));

        match (pipe, rotation) {
            (Some((_, shape, base)), Some((_, turns))) => {
                let facing = Direction::Down.rotate_clockwise(base + turns);
                self.add_cell(*shape, facing, tokens.contains(&PINNED_CLASS))
            }
            _ => self.invalidate(BuilderInvalidReason::UnrecognizedCellType { code: classes.trim().to_owned() }),
        }
    }

    /// Overwrite a cell that was already added.
    ///
    /// May cause the builder to enter a [`CellOutOfBounds`](BuilderInvalidReason::CellOutOfBounds) invalid state if `location`
    /// is outside the dimensions or has not been added yet.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn replace(&mut self, location: Location, shape: Shape, facing: Direction, pinned: bool) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if shape == Shape::Wall {
            return self.invalidate(BuilderInvalidReason::WallInGrid);
        }

        let width = self.dims.0.get();
        let index = location.1 * width + location.0;
        if location.0 >= width || index >= self.cells.len() {
            return self.invalidate(BuilderInvalidReason::CellOutOfBounds { location });
        }

        self.cells[index] = Cell::new(shape, facing, pinned);
        self
    }

    fn invalidate(&mut self, reason: BuilderInvalidReason) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.invalid_reasons.push(reason);
        }
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    ///
    /// Fails with a [`GridSizeMismatch`](BuilderInvalidReason::GridSizeMismatch) unless exactly `width * height` cells were added.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&mut self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let (width, height) = (self.dims.0.get(), self.dims.1.get());
        let found = self.cells.len();
        match Array2::from_shape_vec((height, width), self.cells.clone()) {
            Ok(cells) => Ok(Board {
                cells,
                dims: self.dims,
                wrap: self.wrap,
            }),
            Err(_) => {
                self.invalid_reasons.push(BuilderInvalidReason::GridSizeMismatch { expected: width * height, found });
                Err(&self.invalid_reasons)
            }
        }
    }
}
