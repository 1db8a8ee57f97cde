//! Level state and core simulation types
//!
//! A [`Level`] owns everything one level needs: the lanes, the frog and the
//! death overlay. Loading a new level means building a new `Level`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{DeathAnimation, MoveAnimation};
use super::geom::{Grid, Hitbox, Rect};
use super::hedge::{self, Tally};
use super::lane::Lane;
use super::movement::Facing;
use crate::config::{HitboxTable, LevelConfig};
use crate::consts::LIFE_ICON_COLUMNS;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Events raised by the simulation for the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A hop started
    Hop,
    /// A hop into a free exit started
    Trill,
    /// The frog died
    Splat,
}

/// The player's frog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frog {
    /// Sprite center in playfield pixels
    pub pos: Vec2,
    pub facing: Facing,
    /// Hop sprite frame, 0 at rest
    pub frame: u32,
    pub lives: u8,
    /// Seconds until the next hop may start
    pub cooldown: f32,
    /// A hop was refused this tick
    pub blocked: bool,
    /// Standing in an open hedge slot after a vertical hop
    pub pass_through: bool,
    /// Hop in flight
    pub motion: Option<MoveAnimation>,
    /// One hitbox per hop frame
    hitboxes: Vec<Hitbox>,
}

impl Frog {
    pub fn new(pos: Vec2, lives: u8, hitboxes: Vec<Hitbox>) -> Self {
        Self {
            pos,
            facing: Facing::North,
            frame: 0,
            lives,
            cooldown: 0.0,
            blocked: false,
            pass_through: false,
            motion: None,
            hitboxes,
        }
    }

    /// Hitbox for the current display frame
    pub fn hitbox(&self) -> Hitbox {
        let index = (self.frame as usize).min(self.hitboxes.len().saturating_sub(1));
        self.hitboxes
            .get(index)
            .copied()
            .unwrap_or(Hitbox::new(0.0, 0.0, 0.0, 0.0))
    }

    #[inline]
    pub fn hitbox_rect(&self) -> Rect {
        self.hitbox().at(self.pos)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }
}

/// Death sequence overlay, drawn where the frog died
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Death {
    pub pos: Vec2,
    pub animation: DeathAnimation,
}

impl Death {
    pub fn frame(&self) -> u32 {
        self.animation.frame()
    }
}

/// One loaded level
#[derive(Debug, Clone)]
pub struct Level {
    pub(crate) grid: Grid,
    /// Frog start cell center
    pub(crate) start: Vec2,
    pub(crate) tuning: Tuning,
    pub(crate) lanes: Vec<Lane>,
    pub(crate) frog: Frog,
    pub(crate) death: Option<Death>,
    pub(crate) collision: bool,
    pub(crate) reached_exit: bool,
    pub(crate) won: bool,
    pub(crate) paused: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl Level {
    /// Validate `config` and build the level from it
    pub fn new(
        config: &LevelConfig,
        hitboxes: &HitboxTable,
        tuning: Tuning,
    ) -> Result<Self, ConfigError> {
        config.validate(hitboxes, &tuning)?;

        let grid = config.grid();
        let lanes = config
            .lanes
            .iter()
            .enumerate()
            .map(|(row, lane)| Lane::from_config(row as u32, lane, &grid, hitboxes))
            .collect::<Result<Vec<_>, _>>()?;
        let start = grid.cell_center(config.start[0], config.start[1]);

        log::info!(
            "Level loaded: {}x{} cells, {} exits, {} lives",
            grid.width,
            grid.height,
            hedge::tally(&lanes).total,
            tuning.starting_lives
        );

        Ok(Self {
            grid,
            start,
            tuning,
            lanes,
            frog: Frog::new(start, tuning.starting_lives, hitboxes.frog.clone()),
            death: None,
            collision: false,
            reached_exit: false,
            won: false,
            paused: false,
            events: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn frog(&self) -> &Frog {
        &self.frog
    }

    pub fn death(&self) -> Option<&Death> {
        self.death.as_ref()
    }

    pub fn frog_position(&self) -> Vec2 {
        self.frog.pos
    }

    pub fn set_frog_position(&mut self, pos: Vec2) {
        self.frog.pos = pos;
    }

    pub fn collision(&self) -> bool {
        self.collision
    }

    /// Setting the flag starts the death sequence on the next tick
    pub fn set_collision(&mut self, collision: bool) {
        self.collision = collision;
    }

    pub fn reached_exit(&self) -> bool {
        self.reached_exit
    }

    pub fn set_reached_exit(&mut self, reached: bool) {
        self.reached_exit = reached;
    }

    pub fn game_won(&self) -> bool {
        self.won
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn lives(&self) -> u8 {
        self.frog.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.frog.lives == 0
    }

    pub fn tally(&self) -> Tally {
        hedge::tally(&self.lanes)
    }

    /// Drop the hop in flight, leaving the frog where it is
    pub fn cancel_motion(&mut self) {
        self.frog.motion = None;
    }

    /// The frog has landed in an exit and is waiting to be sent back
    pub fn exit_settled(&self) -> bool {
        self.reached_exit && !self.frog.is_moving()
    }

    /// Life icon centers, one per remaining life, in the row above the playfield
    pub fn life_icons(&self) -> Vec<Vec2> {
        let first = self.grid.width as i32 - LIFE_ICON_COLUMNS as i32;
        let row = self.grid.height as i32;
        (0..self.frog.lives as i32)
            .map(|i| self.grid.cell_center(first + i, row))
            .collect()
    }

    /// Markers left in occupied exits
    pub fn exit_markers(&self) -> Vec<Vec2> {
        hedge::exit_markers(&self.lanes, &self.grid)
    }

    /// The frog sprite is drawn (not dying, not sitting in an exit)
    pub fn frog_visible(&self) -> bool {
        !self.collision && !self.exit_settled()
    }

    pub fn death_visible(&self) -> bool {
        self.death.is_some()
    }

    /// Send the frog back to the start for its next attempt
    ///
    /// Lives, lanes and occupied exits are kept.
    pub fn continue_game(&mut self) {
        let frog = &mut self.frog;
        frog.pos = self.start;
        frog.facing = Facing::North;
        frog.frame = 0;
        frog.cooldown = 0.0;
        frog.blocked = false;
        frog.pass_through = false;
        frog.motion = None;
        self.death = None;
        self.collision = false;
        self.reached_exit = false;
        self.paused = false;
        log::debug!("Frog back at start with {} lives", frog.lives);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
