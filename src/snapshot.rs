//! Read-only view of a level for renderers
//!
//! Everything a renderer needs for one frame, detached from the simulation so
//! it can be serialized or sent across a thread boundary.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Facing, Level, Terrain};

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub kind: String,
    pub pos: Vec2,
    pub flipped: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaneView {
    pub row: u32,
    pub terrain: Terrain,
    pub obstacles: Vec<ObstacleView>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrogView {
    pub pos: Vec2,
    pub frame: u32,
    pub facing: Facing,
    /// Sprite rotation in degrees
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeathView {
    pub pos: Vec2,
    pub frame: u32,
}

/// One frame of level state
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub cell_size: f32,
    /// Playfield size in pixels (life icons sit in the row above it)
    pub size: Vec2,
    pub lanes: Vec<LaneView>,
    /// `None` while hidden
    pub frog: Option<FrogView>,
    /// `None` unless the death sequence is playing
    pub death: Option<DeathView>,
    pub life_icons: Vec<Vec2>,
    pub exit_markers: Vec<Vec2>,
    pub lives: u8,
    pub won: bool,
    pub paused: bool,
}

impl FrameSnapshot {
    pub fn capture(level: &Level) -> Self {
        let grid = level.grid();
        let lanes = level
            .lanes()
            .iter()
            .map(|lane| LaneView {
                row: lane.row(),
                terrain: lane.terrain(),
                obstacles: lane
                    .obstacles()
                    .iter()
                    .map(|o| ObstacleView {
                        kind: o.kind.clone(),
                        pos: o.pos,
                        flipped: o.flipped,
                    })
                    .collect(),
            })
            .collect();

        let frog = level.frog_visible().then(|| {
            let frog = level.frog();
            FrogView {
                pos: frog.pos,
                frame: frog.frame,
                facing: frog.facing,
                angle: frog.facing.degrees(),
            }
        });
        let death = level.death().map(|d| DeathView {
            pos: d.pos,
            frame: d.frame(),
        });

        Self {
            cell_size: grid.cell_size,
            size: Vec2::new(grid.width_px(), grid.height_px()),
            lanes,
            frog,
            death,
            life_icons: level.life_icons(),
            exit_markers: level.exit_markers(),
            lives: level.lives(),
            won: level.game_won(),
            paused: level.paused(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
