//! Playfield geometry: grid dimensions, hitboxes and lane tiles
//!
//! The playfield is y-up: row 0 is the bottom lane, and a cell's center sits at
//! `(col + 0.5, row + 0.5) * cell_size`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle spanning one grid cell
    pub fn cell(col: i32, row: i32, cell_size: f32) -> Self {
        let min = Vec2::new(col as f32, row as f32) * cell_size;
        Self::new(min, min + Vec2::splat(cell_size))
    }

    /// Whether the two rectangles share interior area (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Whether `point` lies inside or on the boundary
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Hitbox as offsets from a sprite center: `[left, bottom, right, top]`
///
/// Left and bottom are usually negative. Serialized as a plain 4-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Hitbox {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Hitbox {
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self { left, bottom, right, top }
    }

    /// Symmetric hitbox of the given half extents
    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Self::new(-half_width, -half_height, half_width, half_height)
    }

    /// Place the hitbox around a sprite center
    #[inline]
    pub fn at(&self, center: Vec2) -> Rect {
        Rect::new(
            center + Vec2::new(self.left, self.bottom),
            center + Vec2::new(self.right, self.top),
        )
    }

    /// Mirror horizontally (sprite turned to face the other way)
    pub fn mirrored(&self) -> Self {
        Self::new(-self.right, self.bottom, -self.left, self.top)
    }

    /// Finite with a positive area
    pub fn is_valid(&self) -> bool {
        [self.left, self.bottom, self.right, self.top]
            .iter()
            .all(|v| v.is_finite())
            && self.left < self.right
            && self.bottom < self.top
    }
}

impl From<[f32; 4]> for Hitbox {
    fn from([left, bottom, right, top]: [f32; 4]) -> Self {
        Self::new(left, bottom, right, top)
    }
}

impl From<Hitbox> for [f32; 4] {
    fn from(h: Hitbox) -> Self {
        [h.left, h.bottom, h.right, h.top]
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Side of one cell in pixels
    pub cell_size: f32,
    /// Columns
    pub width: u32,
    /// Rows (one lane each)
    pub height: u32,
    /// Cells obstacles travel past either edge before wrapping
    pub offscreen: u32,
}

impl Grid {
    #[inline]
    pub fn width_px(&self) -> f32 {
        self.width as f32 * self.cell_size
    }

    #[inline]
    pub fn height_px(&self) -> f32 {
        self.height as f32 * self.cell_size
    }

    /// Off-screen travel distance in pixels
    #[inline]
    pub fn buffer_px(&self) -> f32 {
        self.offscreen as f32 * self.cell_size
    }

    /// Length of one full wraparound cycle
    pub fn wrap_span(&self) -> f32 {
        self.width_px() + 2.0 * self.buffer_px()
    }

    pub fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + Vec2::splat(0.5)) * self.cell_size
    }

    /// Column under an x position, `None` outside the playfield
    pub fn column_at(&self, x: f32) -> Option<i32> {
        if x < 0.0 || x >= self.width_px() {
            return None;
        }
        Some((x / self.cell_size).floor() as i32)
    }

    /// Full-width tile of a lane
    pub fn row_tile(&self, row: u32) -> Rect {
        let bottom = row as f32 * self.cell_size;
        Rect::new(
            Vec2::new(0.0, bottom),
            Vec2::new(self.width_px(), bottom + self.cell_size),
        )
    }
}
