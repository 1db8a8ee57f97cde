//! Lanes and the obstacles that scroll through them
//!
//! Every row of the playfield is one lane. Roads and water scroll their
//! obstacles sideways at a fixed speed and wrap them around once they are far
//! enough off-screen; grass and hedges never move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Grid, Hitbox, Rect};
use super::hedge::{ExitSlot, SlotKind};
use crate::config::{HitboxTable, LaneConfig, ObstacleConfig};
use crate::error::ConfigError;

/// Lane background, as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Grass,
    Road,
    Water,
    Hedge,
}

/// A car, truck, log or any other scrolling sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Sprite/hitbox key (e.g. `car1`, `log3`)
    pub kind: String,
    /// Sprite center in playfield pixels
    pub pos: Vec2,
    /// Hitbox offsets, already mirrored when `flipped`
    pub hitbox: Hitbox,
    /// Sprite faces left
    pub flipped: bool,
}

impl Obstacle {
    pub fn new(kind: impl Into<String>, pos: Vec2, hitbox: Hitbox, flipped: bool) -> Self {
        let hitbox = if flipped { hitbox.mirrored() } else { hitbox };
        Self {
            kind: kind.into(),
            pos,
            hitbox,
            flipped,
        }
    }

    #[inline]
    pub fn hitbox_rect(&self) -> Rect {
        self.hitbox.at(self.pos)
    }
}

/// Lane variants; speeds are pixels per second, positive scrolls right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaneKind {
    /// Safe ground
    Grass,
    /// Obstacles kill on contact
    Road { speed: f32, obstacles: Vec<Obstacle> },
    /// Obstacles carry the frog; the water itself kills
    Water { speed: f32, obstacles: Vec<Obstacle> },
    /// One slot per column
    Hedge { slots: Vec<ExitSlot> },
}

/// One row of the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    row: u32,
    kind: LaneKind,
}

impl Lane {
    pub fn new(row: u32, kind: LaneKind) -> Self {
        Self { row, kind }
    }

    /// Build the lane for `row` from its description
    ///
    /// Speeds go from cells per second to pixels per second; obstacles in
    /// left-scrolling lanes are flipped.
    pub fn from_config(
        row: u32,
        config: &LaneConfig,
        grid: &Grid,
        hitboxes: &HitboxTable,
    ) -> Result<Self, ConfigError> {
        let kind = match config {
            LaneConfig::Grass { .. } => LaneKind::Grass,
            LaneConfig::Road { speed, objects } => {
                let speed = speed * grid.cell_size;
                LaneKind::Road {
                    speed,
                    obstacles: place_obstacles(row, speed, objects, grid, hitboxes)?,
                }
            }
            LaneConfig::Water { speed, objects } => {
                let speed = speed * grid.cell_size;
                LaneKind::Water {
                    speed,
                    obstacles: place_obstacles(row, speed, objects, grid, hitboxes)?,
                }
            }
            LaneConfig::Hedge { objects } => {
                let mut slots = vec![ExitSlot::new(SlotKind::Blocked); grid.width as usize];
                for slot in objects {
                    let cell = usize::try_from(slot.position)
                        .ok()
                        .and_then(|i| slots.get_mut(i));
                    let Some(cell) = cell else {
                        return Err(ConfigError::SlotPosition {
                            row,
                            position: slot.position,
                            width: grid.width,
                        });
                    };
                    *cell = ExitSlot::new(slot.kind);
                }
                LaneKind::Hedge { slots }
            }
        };
        Ok(Self::new(row, kind))
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn kind(&self) -> &LaneKind {
        &self.kind
    }

    pub fn terrain(&self) -> Terrain {
        match self.kind {
            LaneKind::Grass => Terrain::Grass,
            LaneKind::Road { .. } => Terrain::Road,
            LaneKind::Water { .. } => Terrain::Water,
            LaneKind::Hedge { .. } => Terrain::Hedge,
        }
    }

    /// Scroll speed in pixels per second (0 for static lanes)
    pub fn speed(&self) -> f32 {
        match self.kind {
            LaneKind::Road { speed, .. } | LaneKind::Water { speed, .. } => speed,
            LaneKind::Grass | LaneKind::Hedge { .. } => 0.0,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        match &self.kind {
            LaneKind::Road { obstacles, .. } | LaneKind::Water { obstacles, .. } => obstacles,
            LaneKind::Grass | LaneKind::Hedge { .. } => &[],
        }
    }

    pub fn slots(&self) -> Option<&[ExitSlot]> {
        match &self.kind {
            LaneKind::Hedge { slots } => Some(slots),
            _ => None,
        }
    }

    pub fn slots_mut(&mut self) -> Option<&mut [ExitSlot]> {
        match &mut self.kind {
            LaneKind::Hedge { slots } => Some(slots),
            _ => None,
        }
    }

    #[inline]
    pub fn is_water(&self) -> bool {
        matches!(self.kind, LaneKind::Water { .. })
    }

    #[inline]
    pub fn is_hedge(&self) -> bool {
        matches!(self.kind, LaneKind::Hedge { .. })
    }

    /// Scroll obstacles by `speed * dt`, wrapping the ones that left the buffer zone
    pub fn advance(&mut self, dt: f32, grid: &Grid) {
        let (speed, obstacles) = match &mut self.kind {
            LaneKind::Road { speed, obstacles } | LaneKind::Water { speed, obstacles } => {
                (*speed, obstacles)
            }
            LaneKind::Grass | LaneKind::Hedge { .. } => return,
        };
        let dist = speed * dt;
        for obstacle in obstacles.iter_mut() {
            obstacle.pos.x = wrap_x(obstacle.pos.x + dist, speed, grid);
        }
    }
}

fn place_obstacles(
    row: u32,
    speed: f32,
    objects: &[ObstacleConfig],
    grid: &Grid,
    hitboxes: &HitboxTable,
) -> Result<Vec<Obstacle>, ConfigError> {
    let y = (row as f32 + 0.5) * grid.cell_size;
    objects
        .iter()
        .map(|object| {
            let hitbox = hitboxes
                .obstacle(&object.kind)
                .ok_or_else(|| ConfigError::UnknownObstacle {
                    row,
                    kind: object.kind.clone(),
                })?;
            let x = object.position * grid.cell_size + grid.cell_size / 2.0;
            Ok(Obstacle::new(object.kind.as_str(), Vec2::new(x, y), hitbox, speed < 0.0))
        })
        .collect()
}

/// Wrap an x position that scrolled past the far edge of the buffer zone
///
/// The overshoot is carried over so spacing between obstacles never changes.
pub fn wrap_x(x: f32, speed: f32, grid: &Grid) -> f32 {
    let near = -grid.buffer_px();
    let far = grid.width_px() + grid.buffer_px();
    let span = far - near;
    if speed > 0.0 && x >= far {
        near + (x - far).rem_euclid(span)
    } else if speed < 0.0 && x <= near {
        far - (near - x).rem_euclid(span)
    } else {
        x
    }
}
