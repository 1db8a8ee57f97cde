//! Froggit - level simulation core for a grid-based lane-crossing game
//!
//! Core modules:
//! - `sim`: Deterministic level simulation (lanes, validator, animations, collisions)
//! - `config`: Level and hitbox descriptions loaded from JSON
//! - `tuning`: Data-driven timing and life budget
//! - `snapshot`: Read-only view handed to a renderer
//! - `audio`: Playback triggers raised by the simulation
//! - `autopilot`: Seeded input source for headless runs

pub mod audio;
pub mod autopilot;
pub mod config;
pub mod error;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use config::{HitboxTable, LevelConfig};
pub use error::ConfigError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed driver timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Seconds a single hop takes (also the post-move cooldown)
    pub const MOVE_DURATION: f32 = 0.2;
    /// Seconds the death sequence plays before the level pauses
    pub const DEATH_DURATION: f32 = 1.0;
    /// Lives at level load
    pub const STARTING_LIVES: u8 = 3;

    /// Display frames in the hop sprite strip (0 = at rest, 4 = fully stretched)
    pub const MOVE_FRAMES: u32 = 5;
    /// Display frames in the death sprite strip
    pub const DEATH_FRAMES: u32 = 9;

    /// Largest grid side, in cells, a level may declare
    pub const MAX_GRID_CELLS: u32 = 1024;
    /// Largest off-screen buffer, in cells
    pub const MAX_OFFSCREEN_CELLS: u32 = 64;

    /// Columns reserved for life icons, counted from the right edge
    pub const LIFE_ICON_COLUMNS: u32 = 3;
}
