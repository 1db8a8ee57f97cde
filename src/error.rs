//! Level load errors
//!
//! A bad level or hitbox file aborts the load; nothing is simulated from it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cell size must be positive, got {0}")]
    CellSize(f32),

    #[error("grid must be at least 1x1 cells, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error(
        "grid of {width}x{height} cells with {offscreen} off-screen cells exceeds \
         {max_cells} cells per side or {max_offscreen} off-screen cells"
    )]
    GridTooLarge {
        width: u32,
        height: u32,
        offscreen: u32,
        max_cells: u32,
        max_offscreen: u32,
    },

    #[error("grid is {height} rows high but {lanes} lanes were described")]
    LaneCount { height: u32, lanes: usize },

    #[error("start cell ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds { x: i32, y: i32, width: u32, height: u32 },

    #[error("lane {row}: grass lanes cannot hold obstacles")]
    ObstacleOnGrass { row: u32 },

    #[error("lane {row}: speed {speed} is not a finite number")]
    Speed { row: u32, speed: f32 },

    #[error("lane {row}: no hitbox defined for obstacle kind `{kind}`")]
    UnknownObstacle { row: u32, kind: String },

    #[error("lane {row}: obstacle position {position} is outside [{min}, {max})")]
    ObstaclePosition { row: u32, position: f32, min: f32, max: f32 },

    #[error("lane {row}: hedge slot {position} is outside [0, {width})")]
    SlotPosition { row: u32, position: i32, width: u32 },

    #[error("lane {row}: hedge slot {position} is described twice")]
    DuplicateSlot { row: u32, position: i32 },

    #[error("frog needs one hitbox per move frame: expected {expected}, found {found}")]
    FrogHitboxes { expected: usize, found: usize },

    #[error("hitbox `{name}` is inverted or not finite")]
    Hitbox { name: String },

    #[error("tuning value `{field}` is out of range")]
    Tuning { field: &'static str },
}
