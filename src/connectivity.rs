//! Reachability over edges already known to carry pipe.

use std::collections::HashSet;

use strum::VariantArray;
use thiserror::Error;

use crate::board::Board;
use crate::direction::Direction;
use crate::location::Location;
use crate::logic::Connection;

/// Reasons a reachability query may fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConnectivityError {
    /// The known connections already close a loop, so some pinned cell must be wrong.
    #[error("known connections close a loop at {at}")]
    LoopDetected {
        /// The cell reached a second time.
        at: Location,
    },
}

impl Board {
    /// Whether `from` and `to` are already joined by a chain of known connections.
    ///
    /// An edge counts as known when either of its ends reports [`Connected`](Connection::Connected).
    /// The flood fill records every seam it crosses, by cell and side, and never enters a cell twice.
    /// Reaching a visited cell over a fresh seam means the known network has a loop, which is reported instead of trusted.
    /// On a wrapping grid two cells may share two seams; each one counts.
    pub fn is_connected_to(&self, from: Location, to: Location) -> Result<bool, ConnectivityError> {
        if from == to {
            return Ok(true);
        }

        let mut reached = HashSet::with_capacity(self.len());
        let mut crossed = HashSet::with_capacity(self.len());
        reached.insert(from);
        let mut frontier = vec![from];

        while let Some(location) = frontier.pop() {
            for side in Direction::VARIANTS.iter().copied() {
                if self.link(location, side) != Connection::Connected {
                    continue;
                }
                let Some(next) = self.neighbor(location, side) else {
                    continue;
                };
                if crossed.contains(&(location, side)) {
                    continue;
                }
                if !reached.insert(next) {
                    return Err(ConnectivityError::LoopDetected { at: next });
                }

                crossed.insert((location, side));
                crossed.insert((next, side.opposite()));
                if next == to {
                    return Ok(true);
                }
                frontier.push(next);
            }
        }

        Ok(false)
    }
}
