//! Exit hedge bookkeeping
//!
//! A hedge lane holds one slot per column. Exit slots are the win condition:
//! once the frog lands in one it is taken for the rest of the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Grid;
use super::lane::Lane;

/// What a hedge cell does to a frog trying to enter it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Solid hedge
    #[default]
    Blocked,
    /// Gap the frog may pass through; never scores
    Open,
    /// Scoring target, taken once reached
    Exit,
}

/// One cell of a hedge lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExitSlot {
    pub kind: SlotKind,
    occupied: bool,
}

impl ExitSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self { kind, occupied: false }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Exit slot still waiting for a frog
    #[inline]
    pub fn accepts_frog(&self) -> bool {
        self.kind == SlotKind::Exit && !self.occupied
    }
}

/// Occupied vs total exit counts across all hedge lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub occupied: usize,
    pub total: usize,
}

impl Tally {
    /// All exits taken, and there was at least one
    pub fn is_win(&self) -> bool {
        self.total > 0 && self.occupied == self.total
    }
}

/// Kind of the slot at `index`; anything that is not a hedge cell reads as Blocked
pub fn classify_slot(lane: &Lane, index: i32) -> SlotKind {
    let Some(slots) = lane.slots() else {
        return SlotKind::Blocked;
    };
    usize::try_from(index)
        .ok()
        .and_then(|i| slots.get(i))
        .map(|slot| slot.kind)
        .unwrap_or(SlotKind::Blocked)
}

/// Mark an exit slot as taken
///
/// Panics if the slot is not a free exit: callers must check
/// [`ExitSlot::accepts_frog`] first.
pub fn occupy(lane: &mut Lane, index: usize) {
    let row = lane.row();
    let slot = lane
        .slots_mut()
        .and_then(|slots| slots.get_mut(index))
        .unwrap_or_else(|| panic!("lane {row} has no hedge slot {index}"));
    assert!(
        slot.accepts_frog(),
        "hedge slot {index} in lane {row} cannot be occupied ({:?}, occupied: {})",
        slot.kind,
        slot.occupied
    );
    slot.occupied = true;
    log::info!("Exit {index} in lane {row} occupied");
}

/// Count exits across every hedge lane
pub fn tally(lanes: &[Lane]) -> Tally {
    lanes
        .iter()
        .filter_map(Lane::slots)
        .flatten()
        .filter(|slot| slot.kind == SlotKind::Exit)
        .fold(Tally::default(), |mut t, slot| {
            t.total += 1;
            if slot.occupied {
                t.occupied += 1;
            }
            t
        })
}

/// Centers of the "safe frog" markers left in occupied exits
pub fn exit_markers(lanes: &[Lane], grid: &Grid) -> Vec<Vec2> {
    let mut markers = Vec::new();
    for lane in lanes {
        let Some(slots) = lane.slots() else { continue };
        for (col, slot) in slots.iter().enumerate() {
            if slot.kind == SlotKind::Exit && slot.occupied {
                markers.push(grid.cell_center(col as i32, lane.row() as i32));
            }
        }
    }
    markers
}
