//! Timed animations for the frog
//!
//! A hop slides the frog exactly one cell over a fixed duration while the
//! sprite stretches out and back; the death sequence plays a fixed strip of
//! frames. Both are plain state objects stepped once per tick with whatever
//! delta the driver supplies. Frames come from accumulated time or distance,
//! never from the number of steps, so irregular ticks give the same result.
//!
//! Cancelling an animation is just dropping it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::movement::Direction;

/// Result of stepping an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continuing,
    Completed,
}

/// Axis a hop travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One-cell hop in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveAnimation {
    start: Vec2,
    target: Vec2,
    elapsed: f32,
    duration: f32,
    axis: Axis,
    cell_size: f32,
    peak_frame: u32,
    finished: bool,
}

impl MoveAnimation {
    pub fn new(
        start: Vec2,
        direction: Direction,
        cell_size: f32,
        duration: f32,
        peak_frame: u32,
    ) -> Self {
        Self {
            start,
            target: start + direction.offset() * cell_size,
            elapsed: 0.0,
            duration,
            axis: direction.axis(),
            cell_size,
            peak_frame,
            finished: false,
        }
    }

    /// Advance the hop by `dt`, moving `pos` and updating the display `frame`
    ///
    /// On completion `pos` is snapped onto the target cell center and the frame
    /// returns to rest. Panics if called again after completion.
    pub fn step(&mut self, pos: &mut Vec2, frame: &mut u32, dt: f32) -> Step {
        assert!(!self.finished, "move animation stepped after completion");
        self.elapsed += dt;

        let velocity = (self.target - self.start) / self.duration;
        let covered = match self.axis {
            Axis::Horizontal => {
                pos.x += velocity.x * dt;
                (pos.x - self.start.x).abs()
            }
            Axis::Vertical => {
                pos.y += velocity.y * dt;
                (pos.y - self.start.y).abs()
            }
        };

        let fraction = covered / self.cell_size;
        if fraction >= 1.0 || self.elapsed >= self.duration {
            *pos = self.target;
            *frame = 0;
            self.finished = true;
            return Step::Completed;
        }

        *frame = hop_frame(fraction, self.peak_frame);
        Step::Continuing
    }
}

/// Display frame for a hop that has covered `fraction` of a cell
///
/// Stretches up to `peak` at the halfway point, then counts back down.
pub fn hop_frame(fraction: f32, peak: u32) -> u32 {
    let peak_f = peak as f32;
    let frame = if fraction < 0.5 {
        peak_f * 2.0 * fraction
    } else {
        peak_f * (2.0 - 2.0 * fraction)
    };
    (frame.round().max(0.0) as u32).min(peak)
}

/// Death sequence in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathAnimation {
    elapsed: f32,
    duration: f32,
    last_frame: u32,
    frame: u32,
    finished: bool,
}

impl DeathAnimation {
    pub fn new(duration: f32, last_frame: u32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            last_frame,
            frame: 0,
            finished: false,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Advance by `dt`; the frame never moves backwards
    pub fn step(&mut self, dt: f32) -> Step {
        assert!(!self.finished, "death animation stepped after completion");
        self.elapsed += dt;

        if self.elapsed >= self.duration {
            self.frame = self.last_frame;
            self.finished = true;
            return Step::Completed;
        }

        let frame = (self.last_frame as f32 * self.elapsed / self.duration).round() as u32;
        self.frame = self.frame.max(frame.min(self.last_frame));
        Step::Continuing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: f32 = 32.0;
    const HOP: f32 = 0.2;

    fn run_hop(dts: &[f32], direction: Direction) -> (Vec2, Vec<u32>, usize) {
        let start = Vec2::new(48.0, 80.0);
        let mut anim = MoveAnimation::new(start, direction, CELL, HOP, 4);
        let mut pos = start;
        let mut frame = 0;
        let mut frames = Vec::new();
        for (i, dt) in dts.iter().enumerate() {
            let step = anim.step(&mut pos, &mut frame, *dt);
            frames.push(frame);
            if step == Step::Completed {
                return (pos, frames, i + 1);
            }
        }
        panic!("hop did not complete");
    }

    #[test]
    fn test_hop_frame_curve() {
        assert_eq!(hop_frame(0.0, 4), 0);
        assert_eq!(hop_frame(0.25, 4), 2);
        assert_eq!(hop_frame(0.49, 4), 4);
        assert_eq!(hop_frame(0.5, 4), 4);
        assert_eq!(hop_frame(0.75, 4), 2);
        assert_eq!(hop_frame(0.99, 4), 0);
    }

    #[test]
    fn test_hop_snaps_exactly_onto_target() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (pos, frames, _) = run_hop(&[0.013; 40], direction);
            let expected = Vec2::new(48.0, 80.0) + direction.offset() * CELL;
            assert_eq!(pos, expected, "{direction:?}");
            assert_eq!(*frames.last().unwrap(), 0);
        }
    }

    #[test]
    fn test_hop_frames_rise_then_fall() {
        let (_, frames, _) = run_hop(&[HOP / 8.0; 12], Direction::Up);
        let peak = frames.iter().position(|&f| f == 4).unwrap();
        assert!(frames[..=peak].windows(2).all(|w| w[0] <= w[1]));
        assert!(frames[peak..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_irregular_ticks_reach_same_cell() {
        let (even, _, _) = run_hop(&[0.05; 10], Direction::Right);
        let (ragged, _, _) = run_hop(&[0.001, 0.09, 0.03, 0.004, 0.2], Direction::Right);
        assert_eq!(even, ragged);
    }

    #[test]
    fn test_single_long_tick_completes() {
        let (pos, _, steps) = run_hop(&[1.0], Direction::Left);
        assert_eq!(steps, 1);
        assert_eq!(pos, Vec2::new(16.0, 80.0));
    }

    #[test]
    fn test_hop_only_moves_along_its_axis() {
        let start = Vec2::new(48.0, 80.0);
        let mut anim = MoveAnimation::new(start, Direction::Up, CELL, HOP, 4);
        let mut pos = start;
        let mut frame = 0;
        anim.step(&mut pos, &mut frame, HOP / 4.0);
        assert_eq!(pos.x, 48.0);
        assert!((pos.y - 88.0).abs() < 1e-4);
        assert_eq!(frame, 2);
    }

    #[test]
    #[should_panic(expected = "after completion")]
    fn test_stepping_finished_hop_panics() {
        let start = Vec2::ZERO;
        let mut anim = MoveAnimation::new(start, Direction::Up, CELL, HOP, 4);
        let mut pos = start;
        let mut frame = 0;
        assert_eq!(anim.step(&mut pos, &mut frame, 1.0), Step::Completed);
        anim.step(&mut pos, &mut frame, 0.01);
    }

    #[test]
    fn test_death_frames_monotonic_and_complete() {
        let mut death = DeathAnimation::new(1.0, 8);
        let mut last = 0;
        let mut completed = false;
        for dt in [0.1, 0.02, 0.3, 0.05, 0.2, 0.1, 0.1, 0.2] {
            let step = death.step(dt);
            assert!(death.frame() >= last);
            last = death.frame();
            if step == Step::Completed {
                completed = true;
                break;
            }
        }
        assert!(completed);
        assert_eq!(death.frame(), 8);
    }

    #[test]
    fn test_death_frame_from_elapsed_time() {
        let mut death = DeathAnimation::new(1.0, 8);
        death.step(0.5);
        assert_eq!(death.frame(), 4);
        death.step(0.25);
        assert_eq!(death.frame(), 6);
    }
}
