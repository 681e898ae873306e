use itertools::Itertools;
use strum::VariantArray;
use tracing::{debug, trace, warn};

use crate::board::{Board, BoardError};
use crate::direction::Direction;
use crate::location::Location;
use crate::logic::Connection;
use crate::shape::Shape;

/// What a strategy gets to look at: the cell's shape and what each immediate neighbor says about the shared side.
#[derive(Clone, Copy)]
pub(crate) struct Neighborhood<'a> {
    board: &'a Board,
    location: Location,
    shape: Shape,
    around: [Connection; 4],
    shapes: [Shape; 4],
}

impl<'a> Neighborhood<'a> {
    pub(crate) fn of(board: &'a Board, location: Location, shape: Shape) -> Self {
        let mut around = [Connection::Unknown; 4];
        let mut shapes = [Shape::Wall; 4];
        for side in Direction::VARIANTS.iter().copied() {
            around[side.index()] = board.report(location, side);
            shapes[side.index()] = board.cell_or_wall(board.neighbor(location, side)).shape;
        }

        Self { board, location, shape, around, shapes }
    }

    #[inline]
    fn around(&self, side: Direction) -> Connection {
        self.around[side.index()]
    }

    #[inline]
    fn shape(&self, side: Direction) -> Shape {
        self.shapes[side.index()]
    }

    fn sides_where(self, connection: Connection) -> impl Iterator<Item = Direction> + 'a {
        Direction::VARIANTS.iter().copied().filter(move |side| self.around(*side) == connection)
    }

    fn with_blocked(&self, side: Direction) -> Self {
        let mut blocked = *self;
        blocked.around[side.index()] = Connection::Blocked;
        blocked
    }
}

/// A single local deduction. Returns the facing it forces, if any.
pub(crate) struct Strategy {
    pub(crate) name: &'static str,
    pub(crate) apply: fn(&Neighborhood) -> Option<Direction>,
}

const CONNECTS_BACK: Strategy = Strategy { name: "neighbor connects back", apply: endpoint_connects_back };
const THREE_EXCLUDED: Strategy = Strategy { name: "three sides excluded", apply: endpoint_three_excluded };
const LINE_CONNECTS_BACK: Strategy = Strategy { name: "neighbor connects back", apply: line_connects_back };
const PERPENDICULAR: Strategy = Strategy { name: "perpendicular to blocked side", apply: line_perpendicular_to_blocked };
const BETWEEN_ENDPOINTS: Strategy = Strategy { name: "between endpoints", apply: line_between_endpoints };
const BOTH_CONNECTED: Strategy = Strategy { name: "two adjacent sides connected", apply: elbow_both_connected };
const BOTH_BLOCKED: Strategy = Strategy { name: "two adjacent sides blocked", apply: elbow_both_blocked };
const BESIDE_BLOCKED: Strategy = Strategy { name: "connected beside blocked", apply: elbow_connected_beside_blocked };
const AWAY_FROM_BLOCKED: Strategy = Strategy { name: "faces away from blocked side", apply: three_way_blocked };
const THREE_CONNECTED: Strategy = Strategy { name: "three sides connected", apply: three_way_three_connected };
pub(crate) const COMMON_BASE: Strategy = Strategy { name: "common base", apply: common_base };
pub(crate) const INDIRECT_LOOP: Strategy = Strategy { name: "indirect loop", apply: indirect_loop };

const ENDPOINT: &[Strategy] = &[CONNECTS_BACK, THREE_EXCLUDED];
const LINE: &[Strategy] = &[LINE_CONNECTS_BACK, PERPENDICULAR, BETWEEN_ENDPOINTS];
const ELBOW_LOCAL: &[Strategy] = &[BOTH_CONNECTED, BOTH_BLOCKED, BESIDE_BLOCKED];
const ELBOW: &[Strategy] = &[BOTH_CONNECTED, BOTH_BLOCKED, BESIDE_BLOCKED, COMMON_BASE, INDIRECT_LOOP];
const THREE_WAY: &[Strategy] = &[AWAY_FROM_BLOCKED, THREE_CONNECTED, COMMON_BASE, INDIRECT_LOOP];

/// Strategies for `shape`, in the order they must be tried.
pub(crate) fn strategies_for(shape: Shape) -> &'static [Strategy] {
    match shape {
        Shape::Endpoint => ENDPOINT,
        Shape::Line => LINE,
        Shape::Elbow => ELBOW,
        Shape::ThreeWay => THREE_WAY,
        Shape::Wall => &[],
    }
}

fn endpoint_connects_back(n: &Neighborhood) -> Option<Direction> {
    n.sides_where(Connection::Connected).exactly_one().ok()
}

fn endpoint_three_excluded(n: &Neighborhood) -> Option<Direction> {
    // two endpoints facing each other are an island, unless they are the whole grid
    let islands_possible = n.board.len() > 2;
    Direction::VARIANTS.iter().copied()
        .filter(|side| !(n.around(*side) == Connection::Blocked || (islands_possible && n.shape(*side) == Shape::Endpoint)))
        .exactly_one()
        .ok()
}

fn line_connects_back(n: &Neighborhood) -> Option<Direction> {
    let connected = n.sides_where(Connection::Connected).collect_vec();
    let first = *connected.first()?;
    connected.iter().all(|side| side.is_parallel_to(first)).then_some(first)
}

fn line_perpendicular_to_blocked(n: &Neighborhood) -> Option<Direction> {
    n.sides_where(Connection::Blocked).next().map(|side| side.rotate_clockwise(1))
}

fn line_between_endpoints(n: &Neighborhood) -> Option<Direction> {
    // endpoint, line, endpoint is an island, unless it is the whole grid
    if n.board.len() <= 3 {
        return None;
    }
    [Direction::Up, Direction::Right].into_iter()
        .find(|side| n.shape(*side) == Shape::Endpoint && n.shape(side.opposite()) == Shape::Endpoint)
        .map(|side| side.rotate_clockwise(1))
}

// An elbow facing `f` opens towards `f.opposite()` and the side clockwise of that.
fn elbow_both_connected(n: &Neighborhood) -> Option<Direction> {
    Direction::VARIANTS.iter().copied()
        .find(|side| n.around(*side) == Connection::Connected && n.around(side.rotate_clockwise(1)) == Connection::Connected)
        .map(Direction::opposite)
}

fn elbow_both_blocked(n: &Neighborhood) -> Option<Direction> {
    Direction::VARIANTS.iter().copied()
        .find(|side| n.around(*side) == Connection::Blocked && n.around(side.rotate_clockwise(1)) == Connection::Blocked)
}

fn elbow_connected_beside_blocked(n: &Neighborhood) -> Option<Direction> {
    n.sides_where(Connection::Connected).find_map(|side| {
        let clockwise = side.rotate_clockwise(1);
        if n.around(clockwise) == Connection::Blocked {
            Some(clockwise)
        } else if n.around(side.rotate_counterclockwise(1)) == Connection::Blocked {
            Some(side.opposite())
        } else {
            None
        }
    })
}

fn three_way_blocked(n: &Neighborhood) -> Option<Direction> {
    n.sides_where(Connection::Blocked).next().map(Direction::opposite)
}

fn three_way_three_connected(n: &Neighborhood) -> Option<Direction> {
    Direction::VARIANTS.iter().copied()
        .filter(|side| n.around(*side) != Connection::Connected)
        .exactly_one()
        .ok()
        .map(Direction::opposite)
}

/// Facing forced once `side` is known to be blocked, if the rest of the neighborhood settles it.
fn face_away_from(n: &Neighborhood, side: Direction) -> Option<Direction> {
    match n.shape {
        Shape::ThreeWay => Some(side.opposite()),
        Shape::Elbow => {
            let n = n.with_blocked(side);
            ELBOW_LOCAL.iter().find_map(|strategy| (strategy.apply)(&n))
        }
        _ => None,
    }
}

/// Neighbors that could still be joined directly, i.e. corner-turning pieces across an edge nobody has settled yet.
fn open_partners<'a>(n: Neighborhood<'a>) -> impl Iterator<Item = (Direction, Location)> + 'a {
    Direction::VARIANTS.iter().copied()
        .filter(move |side| n.shape(*side).turns_corners() && !n.board.link(n.location, *side).is_known())
        .filter_map(move |side| n.board.neighbor(n.location, side).map(|partner| (side, partner)))
}

fn common_base(n: &Neighborhood) -> Option<Direction> {
    let board = n.board;
    open_partners(*n).find_map(|(side, partner)| {
        let closes_square = [side.rotate_clockwise(1), side.rotate_counterclockwise(1)].into_iter().any(|base_side| {
            let (Some(base), Some(partner_base)) = (board.neighbor(n.location, base_side), board.neighbor(partner, base_side)) else {
                return false;
            };
            board.link(n.location, base_side) == Connection::Connected
                && board.link(partner, base_side) == Connection::Connected
                && board.neighbor(base, side) == Some(partner_base)
                && board.link(base, side) == Connection::Connected
        });

        closes_square.then(|| face_away_from(n, side)).flatten()
    })
}

fn indirect_loop(n: &Neighborhood) -> Option<Direction> {
    for (side, partner) in open_partners(*n) {
        match n.board.is_connected_to(n.location, partner) {
            Ok(true) => {
                if let Some(facing) = face_away_from(n, side) {
                    return Some(facing);
                }
            }
            Ok(false) => {}
            Err(error) => {
                warn!(location = %n.location, %error, "skipping loop check on contradictory pins");
                return None;
            }
        }
    }

    None
}

/// Limits on [`Board::solve_all`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepOptions {
    /// Give up after this many passes over the grid. [`None`] sweeps until a pass fixes nothing.
    pub max_passes: Option<usize>,
}

/// One cell fixed during a sweep.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolveStep {
    /// The cell that was fixed.
    pub location: Location,
    /// The facing it was fixed at.
    pub facing: Direction,
    /// Clockwise quarter turns from the facing the cell had just before it was fixed.
    pub rotations: usize,
}

/// Outcome of [`Board::solve_all`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SweepReport {
    /// Every cell fixed, in the order it was fixed.
    pub steps: Vec<SolveStep>,
    /// Passes made over the grid, including the last one that fixed nothing.
    pub passes: usize,
    /// Whether every cell ended up pinned.
    pub complete: bool,
}

impl Board {
    /// Try to deduce the facing of the cell at `location` from its neighborhood alone.
    ///
    /// Strategies for the cell's shape are tried in a fixed order and the first determinate one wins;
    /// the cell is then turned to that facing and pinned.
    /// Pinned cells are never re-examined and always yield `Ok(None)`, as does a cell nothing can be said about yet.
    pub fn attempt_solve(&mut self, location: Location) -> Result<Option<Direction>, BoardError> {
        let cell = *self.cell(location).ok_or(BoardError::OutOfBounds { location })?;
        if cell.pinned {
            return Ok(None);
        }

        let neighborhood = Neighborhood::of(self, location, cell.shape);
        let Some((strategy, facing)) = strategies_for(cell.shape).iter()
            .find_map(|strategy| (strategy.apply)(&neighborhood).map(|facing| (strategy, facing))) else {
            return Ok(None);
        };

        debug!(%location, shape = %cell.shape, %facing, strategy = strategy.name, "fixed cell");
        self.notify(location, facing, true)?;
        Ok(Some(facing))
    }

    /// Sweep the grid in row-major order, calling [`Board::attempt_solve`] on every unpinned cell, until a pass fixes nothing.
    pub fn solve_all(&mut self, options: SweepOptions) -> SweepReport {
        let mut report = SweepReport::default();
        let locations = self.locations().collect_vec();

        while options.max_passes.map_or(true, |max| report.passes < max) {
            report.passes += 1;
            let fixed_before = report.steps.len();

            for location in locations.iter().copied() {
                let Some(cell) = self.cell(location).copied() else {
                    continue;
                };
                if cell.pinned {
                    continue;
                }
                if let Ok(Some(facing)) = self.attempt_solve(location) {
                    report.steps.push(SolveStep {
                        location,
                        facing,
                        rotations: cell.shape.rotations_needed(cell.facing, facing),
                    });
                }
            }

            trace!(pass = report.passes, fixed = report.steps.len() - fixed_before, "sweep pass done");
            if report.steps.len() == fixed_before {
                break;
            }
        }

        report.complete = self.cells.iter().all(|cell| cell.pinned);
        report
    }
}
