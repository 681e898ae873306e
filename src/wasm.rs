//! Bindings for the page-side script that reads the puzzle and shows hints.

use std::num::NonZero;

use itertools::Itertools;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::builder::BoardBuilder;
use crate::direction::Direction;
use crate::location::Location;
use crate::solver::SweepOptions;
use crate::Board;

/// One puzzle instance as seen from the page. Create a fresh one each time the page is rescanned.
#[wasm_bindgen]
pub struct Session {
    board: Board,
}

#[wasm_bindgen]
impl Session {
    /// Build a session from each cell element's class list, in row-major order.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, wrap: bool, classes: Array) -> Result<Session, JsError> {
        let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(height)) else {
            return Err(JsError::new("grid dimensions must be nonzero"));
        };

        let mut builder = BoardBuilder::with_dims((width, height));
        builder.wrapping(wrap);
        for entry in classes.iter() {
            builder.add_classes(&entry.as_string().unwrap_or_default());
        }
        let board = builder.build().map_err(|reasons| JsError::new(&reasons.iter().join("; ")))?;

        Ok(Self { board })
    }

    /// The facing the cell must take, or `undefined` if nothing can be deduced yet.
    #[wasm_bindgen(js_name = "attemptSolve")]
    pub fn attempt_solve(&mut self, x: usize, y: usize) -> Result<Option<String>, JsError> {
        Ok(self.board.attempt_solve(Location(x, y))?.map(|facing| facing.to_string()))
    }

    /// Clockwise quarter turns for the cell to face `direction`, e.g. `"LEFT"`.
    #[wasm_bindgen(js_name = "rotationsNeeded")]
    pub fn rotations_needed(&self, x: usize, y: usize, direction: &str) -> Result<usize, JsError> {
        let target: Direction = direction.parse()?;
        Ok(self.board.rotations_needed_to_face(Location(x, y), target)?)
    }

    /// Tell the session the user turned and/or pinned a cell.
    pub fn notify(&mut self, x: usize, y: usize, direction: &str, pinned: bool) -> Result<(), JsError> {
        let facing: Direction = direction.parse()?;
        Ok(self.board.notify(Location(x, y), facing, pinned)?)
    }

    /// Sweep the whole grid. Returns `[{ x, y, facing, rotations }]` for every cell fixed, in order.
    #[wasm_bindgen(js_name = "solveAll")]
    pub fn solve_all(&mut self) -> Result<Array, JsValue> {
        let report = self.board.solve_all(SweepOptions::default());
        let steps = Array::new();
        for step in report.steps {
            let obj = Object::new();
            Reflect::set(&obj, &"x".into(), &step.location.0.into())?;
            Reflect::set(&obj, &"y".into(), &step.location.1.into())?;
            Reflect::set(&obj, &"facing".into(), &step.facing.to_string().into())?;
            Reflect::set(&obj, &"rotations".into(), &step.rotations.into())?;
            steps.push(&obj);
        }

        Ok(steps)
    }

    /// The grid as glyphs with `delimiter` after every row.
    pub fn stringify(&self, delimiter: &str) -> String {
        self.board.stringify(delimiter)
    }

    /// Whether every cell is pinned into one tree of pipe.
    #[wasm_bindgen(js_name = "isSolved")]
    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }
}
