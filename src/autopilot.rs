//! Seeded autopilot for headless and demo runs
//!
//! Looks one lane ahead and hops up when the way is clear, steering toward the
//! nearest free exit once a hedge is above. A seeded PCG stream decides the
//! occasional sideways wander so runs are reproducible per seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Direction, LaneKind, Level, Rect, TickInput};

/// Chance of wandering sideways on open grass
const WANDER_CHANCE: f64 = 0.1;
/// Ticks spent waiting for a gap before trying a neighbouring column
const PATIENCE_TICKS: u32 = 60;

pub struct Autopilot {
    rng: Pcg32,
    drift: Direction,
    waited: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let drift = if rng.random_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        };
        Self { rng, drift, waited: 0 }
    }

    /// Input for the next tick
    pub fn next_input(&mut self, level: &Level) -> TickInput {
        let frog = level.frog();
        if level.collision() || level.reached_exit() || level.paused() || frog.is_moving() {
            self.waited = 0;
            return TickInput::default();
        }
        if frog.blocked {
            self.drift = opposite(self.drift);
        }

        match self.choose(level) {
            Some(direction) => {
                self.waited = 0;
                TickInput::holding(direction)
            }
            None if self.waited >= PATIENCE_TICKS => TickInput::holding(self.drift),
            None => {
                self.waited += 1;
                TickInput::default()
            }
        }
    }

    fn choose(&mut self, level: &Level) -> Option<Direction> {
        let grid = level.grid();
        let frog = level.frog();
        let row = (frog.pos.y / grid.cell_size).floor() as usize;
        let col = grid.column_at(frog.pos.x)?;

        let Some(above) = level.lanes().get(row + 1) else {
            return Some(self.drift);
        };
        let target = frog.pos + Vec2::Y * grid.cell_size;

        match above.kind() {
            LaneKind::Grass => {
                let here = level.lanes().get(row).map(|l| l.kind());
                let on_grass = matches!(here, Some(LaneKind::Grass));
                if on_grass && self.rng.random_bool(WANDER_CHANCE) {
                    return Some(if self.rng.random_range(0..2) == 0 {
                        Direction::Left
                    } else {
                        Direction::Right
                    });
                }
                Some(Direction::Up)
            }
            LaneKind::Road { speed, obstacles } => {
                let frog_rect = frog.hitbox().at(target);
                let hop_time = level.tuning().move_duration;
                let reach = speed.abs() * hop_time * 2.0 + grid.cell_size * 0.25;
                let danger = obstacles
                    .iter()
                    .any(|o| widened(o.hitbox_rect(), reach).overlaps(&frog_rect));
                (!danger).then_some(Direction::Up)
            }
            LaneKind::Water { obstacles, .. } => obstacles
                .iter()
                .any(|o| o.hitbox_rect().contains(target))
                .then_some(Direction::Up),
            LaneKind::Hedge { slots } => {
                let exit = slots
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.accepts_frog())
                    .map(|(i, _)| i as i32)
                    .min_by_key(|i| (i - col).abs())?;
                Some(match exit.cmp(&col) {
                    std::cmp::Ordering::Less => Direction::Left,
                    std::cmp::Ordering::Greater => Direction::Right,
                    std::cmp::Ordering::Equal => Direction::Up,
                })
            }
        }
    }
}

fn widened(rect: Rect, by: f32) -> Rect {
    Rect::new(rect.min - Vec2::X * by, rect.max + Vec2::X * by)
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
    }
}
