//! Hazard and carrier detection
//!
//! Everything here is axis-aligned rectangle tests: road obstacles kill on any
//! overlap with the frog's hitbox, water kills unless the frog's center sits
//! inside a carrier's hitbox.

use glam::Vec2;

use super::geom::{Grid, Rect};
use super::lane::{Lane, LaneKind};

/// Road obstacle hit by the frog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadHit {
    pub lane: usize,
    pub obstacle: usize,
}

/// First road obstacle whose hitbox overlaps `frog`
pub fn road_hit(lanes: &[Lane], frog: &Rect) -> Option<RoadHit> {
    lanes.iter().enumerate().find_map(|(lane_index, lane)| {
        let LaneKind::Road { obstacles, .. } = lane.kind() else {
            return None;
        };
        obstacles
            .iter()
            .position(|o| o.hitbox_rect().overlaps(frog))
            .map(|obstacle| RoadHit {
                lane: lane_index,
                obstacle,
            })
    })
}

/// What the water does to the frog this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Carry {
    /// Not standing in a water lane
    Dry,
    /// Riding a carrier that moves `dx` pixels this tick
    Carried { dx: f32 },
    /// In the water with nothing underneath
    Drowned,
}

/// Resolve the frog center against every water lane
///
/// The first water lane whose tile contains `center` decides; within it the
/// first obstacle containing `center` is the carrier.
pub fn water_check(lanes: &[Lane], grid: &Grid, center: Vec2, dt: f32) -> Carry {
    for lane in lanes.iter().filter(|lane| lane.is_water()) {
        if !grid.row_tile(lane.row()).contains(center) {
            continue;
        }
        let riding = lane
            .obstacles()
            .iter()
            .any(|o| o.hitbox_rect().contains(center));
        return if riding {
            Carry::Carried { dx: lane.speed() * dt }
        } else {
            Carry::Drowned
        };
    }
    Carry::Dry
}

/// Carried outside the open interval `(0, width)`
#[inline]
pub fn off_playfield(x: f32, grid: &Grid) -> bool {
    x <= 0.0 || x >= grid.width_px()
}
