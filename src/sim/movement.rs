//! Grid move validator
//!
//! Decides whether a hop in a given direction is legal from where the frog
//! stands. Evaluation is pure: it reads the lanes and reports a [`Verdict`];
//! the tick applies it (occupying exits, starting the hop).
//!
//! Hedge rules:
//! - Up into a hedge resolves against the slot under the frog's new center.
//!   Blocked and taken exits stop the frog, a free exit is reached, and an
//!   open slot lets the frog pass through.
//! - While standing in an open slot the frog may only move vertically.
//! - Down into a hedge is only allowed onto an open slot, unless the frog is
//!   still carrying the pass-through from the previous hop. That memory is
//!   consumed by the first Down it is checked against.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Axis;
use super::geom::{Grid, Hitbox};
use super::hedge::{self, SlotKind};
use super::lane::Lane;

/// Commanded hop direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in playfield space (y-up)
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    pub fn facing(self) -> Facing {
        match self {
            Direction::Up => Facing::North,
            Direction::Down => Facing::South,
            Direction::Left => Facing::West,
            Direction::Right => Facing::East,
        }
    }
}

/// Way the frog sprite points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Sprite rotation in degrees, counter-clockwise from north
    pub fn degrees(self) -> f32 {
        match self {
            Facing::North => 0.0,
            Facing::West => 90.0,
            Facing::South => 180.0,
            Facing::East => 270.0,
        }
    }
}

/// Why a hop was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Would leave the top of the playfield
    Ceiling,
    /// Would leave the bottom of the playfield
    Floor,
    /// Would leave the side of the playfield
    Edge,
    /// Solid hedge in the way
    Hedge,
    /// Exit already has a frog in it
    ExitTaken,
    /// Sideways move while standing in a hedge opening
    PassThrough,
}

/// Hedge slot reached by a hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRef {
    /// Index into the level's lanes
    pub lane: usize,
    /// Column of the slot
    pub slot: usize,
}

/// Outcome of evaluating a hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Illegal(Rejection),
    Legal {
        /// Frog ends the hop inside an open hedge slot
        pass_through: bool,
        /// Free exit the hop lands in
        exit: Option<ExitRef>,
    },
}

impl Verdict {
    const PLAIN: Verdict = Verdict::Legal {
        pass_through: false,
        exit: None,
    };

    pub fn is_legal(&self) -> bool {
        matches!(self, Verdict::Legal { .. })
    }
}

/// Everything the validator needs to know about the frog and the field
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub grid: &'a Grid,
    pub lanes: &'a [Lane],
    /// Frog center
    pub pos: Vec2,
    /// Frog hitbox for its current frame
    pub hitbox: Hitbox,
    /// Previous hop ended in an open hedge slot
    pub pass_through: bool,
}

impl MoveContext<'_> {
    /// Hedge lanes whose tile the frog's hitbox would overlap at `pos`
    fn hedges_under(&self, pos: Vec2) -> impl Iterator<Item = (usize, &Lane)> + '_ {
        let rect = self.hitbox.at(pos);
        let grid = self.grid;
        self.lanes
            .iter()
            .enumerate()
            .filter(move |(_, lane)| lane.is_hedge() && grid.row_tile(lane.row()).overlaps(&rect))
    }

    /// Column under a point, `-1` off the playfield so it classifies as blocked
    fn column(&self, pos: Vec2) -> i32 {
        self.grid.column_at(pos.x).unwrap_or(-1)
    }
}

/// Decide whether the frog may hop in `direction`
pub fn evaluate(ctx: &MoveContext<'_>, direction: Direction) -> Verdict {
    match direction {
        Direction::Up => evaluate_up(ctx),
        Direction::Down => evaluate_down(ctx),
        Direction::Left | Direction::Right => evaluate_sideways(ctx, direction),
    }
}

fn evaluate_up(ctx: &MoveContext<'_>) -> Verdict {
    let tentative = ctx.pos + Vec2::Y * ctx.grid.cell_size;
    if tentative.y >= ctx.grid.height_px() {
        return Verdict::Illegal(Rejection::Ceiling);
    }

    let mut pass_through = false;
    let mut exit = None;
    let col = ctx.column(tentative);
    for (index, lane) in ctx.hedges_under(tentative) {
        match hedge::classify_slot(lane, col) {
            SlotKind::Blocked => return Verdict::Illegal(Rejection::Hedge),
            SlotKind::Open => pass_through = true,
            SlotKind::Exit => {
                let slot = col as usize;
                let taken = lane
                    .slots()
                    .and_then(|slots| slots.get(slot))
                    .is_some_and(|exit| exit.is_occupied());
                if taken {
                    return Verdict::Illegal(Rejection::ExitTaken);
                }
                exit = Some(ExitRef { lane: index, slot });
            }
        }
    }

    Verdict::Legal { pass_through, exit }
}

fn evaluate_down(ctx: &MoveContext<'_>) -> Verdict {
    let tentative = ctx.pos - Vec2::Y * ctx.grid.cell_size;
    if tentative.y <= 0.0 {
        return Verdict::Illegal(Rejection::Floor);
    }

    let mut lands_open = false;
    let mut lands_blocked = false;
    let col = ctx.column(tentative);
    for (_, lane) in ctx.hedges_under(tentative) {
        match hedge::classify_slot(lane, col) {
            SlotKind::Open => lands_open = true,
            SlotKind::Blocked | SlotKind::Exit => lands_blocked = true,
        }
    }

    if lands_blocked && !ctx.pass_through {
        return Verdict::Illegal(Rejection::Hedge);
    }
    Verdict::Legal {
        pass_through: lands_open,
        exit: None,
    }
}

fn evaluate_sideways(ctx: &MoveContext<'_>, direction: Direction) -> Verdict {
    if ctx.pass_through {
        return Verdict::Illegal(Rejection::PassThrough);
    }
    let x = ctx.pos.x + direction.offset().x * ctx.grid.cell_size;
    if x <= 0.0 || x >= ctx.grid.width_px() {
        return Verdict::Illegal(Rejection::Edge);
    }
    Verdict::PLAIN
}
