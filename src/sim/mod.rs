//! Deterministic level simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by the `dt` handed to [`tick`]
//! - Stable iteration order (lanes bottom to top, obstacles in load order)
//! - No rendering, audio or platform dependencies

pub mod animation;
pub mod collision;
pub mod geom;
pub mod hedge;
pub mod lane;
pub mod movement;
pub mod state;
pub mod tick;

pub use animation::{DeathAnimation, MoveAnimation, Step};
pub use geom::{Grid, Hitbox, Rect};
pub use hedge::{ExitSlot, SlotKind, Tally};
pub use lane::{Lane, LaneKind, Obstacle, Terrain};
pub use movement::{Direction, Facing, Rejection, Verdict};
pub use state::{Death, Frog, GameEvent, Level};
pub use tick::{TickInput, tick};
