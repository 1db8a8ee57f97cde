//! Level and hitbox descriptions
//!
//! Both are plain JSON documents. Lanes are listed bottom row first; speeds are
//! in cells per second and obstacle positions in cells from the left edge.
//! Everything is checked up front so a bad file never reaches the simulation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GRID_CELLS, MAX_OFFSCREEN_CELLS};
use crate::error::ConfigError;
use crate::sim::geom::{Grid, Hitbox};
use crate::sim::hedge::SlotKind;
use crate::tuning::Tuning;

/// A complete level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// `[columns, rows]`
    pub size: [u32; 2],
    /// Side of one cell in pixels
    pub cell_size: f32,
    /// Frog start cell `[column, row]`
    pub start: [i32; 2],
    /// Cells obstacles travel off-screen before wrapping
    #[serde(default)]
    pub offscreen: u32,
    /// One entry per row, bottom first
    pub lanes: Vec<LaneConfig>,
}

/// Lane description, tagged by `"type"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LaneConfig {
    Grass {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        objects: Vec<ObstacleConfig>,
    },
    Road {
        speed: f32,
        #[serde(default)]
        objects: Vec<ObstacleConfig>,
    },
    Water {
        speed: f32,
        #[serde(default)]
        objects: Vec<ObstacleConfig>,
    },
    Hedge {
        #[serde(default)]
        objects: Vec<SlotConfig>,
    },
}

impl LaneConfig {
    pub fn grass() -> Self {
        LaneConfig::Grass { objects: Vec::new() }
    }
}

/// An obstacle placed in a road or water lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Hitbox key
    #[serde(rename = "type")]
    pub kind: String,
    /// Column of the sprite's left cell (fractions allowed)
    pub position: f32,
}

impl ObstacleConfig {
    pub fn new(kind: impl Into<String>, position: f32) -> Self {
        Self {
            kind: kind.into(),
            position,
        }
    }
}

/// A hedge cell that is not solid hedge
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotConfig {
    #[serde(rename = "type")]
    pub kind: SlotKind,
    pub position: i32,
}

/// Hitboxes for every obstacle kind and for the frog's hop frames
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitboxTable {
    pub obstacles: BTreeMap<String, Hitbox>,
    /// One per hop display frame, indexed by frame
    pub frog: Vec<Hitbox>,
}

impl HitboxTable {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: HitboxTable = serde_json::from_str(json)?;
        for (name, hitbox) in &table.obstacles {
            if !hitbox.is_valid() {
                return Err(ConfigError::Hitbox { name: name.clone() });
            }
        }
        for (frame, hitbox) in table.frog.iter().enumerate() {
            if !hitbox.is_valid() {
                return Err(ConfigError::Hitbox {
                    name: format!("frog[{frame}]"),
                });
            }
        }
        Ok(table)
    }

    pub fn obstacle(&self, kind: &str) -> Option<Hitbox> {
        self.obstacles.get(kind).copied()
    }
}

impl LevelConfig {
    /// Parse a level file; cross-checks against hitboxes happen in [`LevelConfig::validate`]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn grid(&self) -> Grid {
        Grid {
            cell_size: self.cell_size,
            width: self.size[0],
            height: self.size[1],
            offscreen: self.offscreen,
        }
    }

    /// Check the level is fully simulatable with the given hitboxes and tuning
    pub fn validate(&self, hitboxes: &HitboxTable, tuning: &Tuning) -> Result<(), ConfigError> {
        tuning.validate()?;

        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        let [width, height] = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        let oversized = width > MAX_GRID_CELLS || height > MAX_GRID_CELLS;
        if oversized || self.offscreen > MAX_OFFSCREEN_CELLS {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                offscreen: self.offscreen,
                max_cells: MAX_GRID_CELLS,
                max_offscreen: MAX_OFFSCREEN_CELLS,
            });
        }
        if self.lanes.len() != height as usize {
            return Err(ConfigError::LaneCount {
                height,
                lanes: self.lanes.len(),
            });
        }
        let [x, y] = self.start;
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return Err(ConfigError::StartOutOfBounds { x, y, width, height });
        }
        if hitboxes.frog.len() != tuning.move_frames as usize {
            return Err(ConfigError::FrogHitboxes {
                expected: tuning.move_frames as usize,
                found: hitboxes.frog.len(),
            });
        }

        for (row, lane) in self.lanes.iter().enumerate() {
            let row = row as u32;
            match lane {
                LaneConfig::Grass { objects } => {
                    if !objects.is_empty() {
                        return Err(ConfigError::ObstacleOnGrass { row });
                    }
                }
                LaneConfig::Road { speed, objects } | LaneConfig::Water { speed, objects } => {
                    if !speed.is_finite() {
                        return Err(ConfigError::Speed { row, speed: *speed });
                    }
                    self.validate_obstacles(row, objects, hitboxes)?;
                }
                LaneConfig::Hedge { objects } => self.validate_slots(row, objects)?,
            }
        }

        let exits = self
            .lanes
            .iter()
            .filter_map(|lane| match lane {
                LaneConfig::Hedge { objects } => Some(objects),
                _ => None,
            })
            .flatten()
            .filter(|slot| slot.kind == SlotKind::Exit)
            .count();
        if exits == 0 {
            log::warn!("Level has no exit slots and cannot be won");
        }

        Ok(())
    }

    fn validate_obstacles(
        &self,
        row: u32,
        objects: &[ObstacleConfig],
        hitboxes: &HitboxTable,
    ) -> Result<(), ConfigError> {
        let min = -(self.offscreen as f32);
        let max = (u64::from(self.size[0]) + u64::from(self.offscreen)) as f32;
        for object in objects {
            if hitboxes.obstacle(&object.kind).is_none() {
                return Err(ConfigError::UnknownObstacle {
                    row,
                    kind: object.kind.clone(),
                });
            }
            if !(object.position >= min && object.position < max) {
                return Err(ConfigError::ObstaclePosition {
                    row,
                    position: object.position,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn validate_slots(&self, row: u32, slots: &[SlotConfig]) -> Result<(), ConfigError> {
        let width = self.size[0];
        let mut seen = BTreeSet::new();
        for slot in slots {
            if slot.position < 0 || slot.position >= width as i32 {
                return Err(ConfigError::SlotPosition {
                    row,
                    position: slot.position,
                    width,
                });
            }
            if !seen.insert(slot.position) {
                return Err(ConfigError::DuplicateSlot {
                    row,
                    position: slot.position,
                });
            }
        }
        Ok(())
    }
}
