//! Per-frame level update
//!
//! Order within a tick: lanes scroll, road hazards are checked, the frog is
//! carried (or drowned) by water, then either the death sequence or the hop
//! in flight is stepped, and finally held input may start a new hop.

use super::animation::{DeathAnimation, MoveAnimation, Step};
use super::collision::{self, Carry};
use super::hedge;
use super::movement::{self, Direction, MoveContext, Verdict};
use super::state::{Death, GameEvent, Level};

/// Directions held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Input holding a single direction
    pub fn holding(direction: Direction) -> Self {
        let mut input = Self::default();
        match direction {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
        }
        input
    }

    /// Commanded direction; up, down, right, left take priority in that order
    pub fn direction(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.right {
            Some(Direction::Right)
        } else if self.left {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// Advance the level by `dt` seconds
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) {
    if level.paused {
        return;
    }

    let grid = level.grid;
    for lane in &mut level.lanes {
        lane.advance(dt, &grid);
    }

    if !level.collision {
        if let Some(hit) = collision::road_hit(&level.lanes, &level.frog.hitbox_rect()) {
            log::debug!("Frog hit obstacle {} in lane {}", hit.obstacle, hit.lane);
            level.collision = true;
            level.frog.motion = None;
        }
    }

    if !level.collision && !level.frog.is_moving() && !level.frog.blocked {
        match collision::water_check(&level.lanes, &grid, level.frog.pos, dt) {
            Carry::Dry => {}
            Carry::Carried { dx } => {
                level.frog.pos.x += dx;
                if collision::off_playfield(level.frog.pos.x, &grid) {
                    log::debug!("Frog carried off the playfield");
                    level.collision = true;
                }
            }
            Carry::Drowned => {
                log::debug!("Frog drowned");
                level.collision = true;
            }
        }
    }
    level.frog.blocked = false;

    if level.collision {
        step_death(level, dt);
        return;
    }

    step_motion(level, dt);

    if level.reached_exit {
        return;
    }
    if let Some(direction) = input.direction() {
        if level.frog.cooldown <= 0.0 && !level.frog.is_moving() {
            try_move(level, direction);
        } else {
            level.frog.cooldown -= dt;
        }
    }
}

fn step_death(level: &mut Level, dt: f32) {
    let Some(death) = level.death.as_mut() else {
        level.frog.motion = None;
        level.death = Some(Death {
            pos: level.frog.pos,
            animation: DeathAnimation::new(
                level.tuning.death_duration,
                level.tuning.death_last_frame(),
            ),
        });
        level.events.push(GameEvent::Splat);
        return;
    };

    if death.animation.step(dt) == Step::Completed {
        level.death = None;
        level.frog.lives = level.frog.lives.saturating_sub(1);
        level.paused = true;
        log::info!("Frog lost a life, {} remaining", level.frog.lives);
    }
}

fn step_motion(level: &mut Level, dt: f32) {
    let frog = &mut level.frog;
    let Some(mut motion) = frog.motion.take() else {
        return;
    };
    match motion.step(&mut frog.pos, &mut frog.frame, dt) {
        Step::Continuing => frog.motion = Some(motion),
        Step::Completed => frog.cooldown = level.tuning.move_duration,
    }
}

fn try_move(level: &mut Level, direction: Direction) {
    let ctx = MoveContext {
        grid: &level.grid,
        lanes: &level.lanes,
        pos: level.frog.pos,
        hitbox: level.frog.hitbox(),
        pass_through: level.frog.pass_through,
    };
    let verdict = movement::evaluate(&ctx, direction);
    level.frog.facing = direction.facing();

    let Verdict::Legal { pass_through, exit } = verdict else {
        log::debug!("{direction:?} refused: {verdict:?}");
        level.frog.blocked = true;
        return;
    };

    level.frog.pass_through = pass_through;
    match exit {
        Some(exit) => {
            hedge::occupy(&mut level.lanes[exit.lane], exit.slot);
            level.reached_exit = true;
            level.events.push(GameEvent::Trill);
            if hedge::tally(&level.lanes).is_win() {
                level.won = true;
                log::info!("Every exit occupied, level won");
            }
        }
        None => level.events.push(GameEvent::Hop),
    }

    level.frog.cooldown = level.tuning.move_duration;
    level.frog.motion = Some(MoveAnimation::new(
        level.frog.pos,
        direction,
        level.grid.cell_size,
        level.tuning.move_duration,
        level.tuning.move_peak_frame(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LaneConfig, ObstacleConfig};
    use crate::consts::SIM_DT;
    use crate::sim::fixtures;
    use crate::sim::movement::Facing;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn idle(level: &mut Level, ticks: usize) {
        for _ in 0..ticks {
            tick(level, &TickInput::default(), SIM_DT);
        }
    }

    fn settle(level: &mut Level) {
        for _ in 0..120 {
            if !level.frog().is_moving() {
                return;
            }
            tick(level, &TickInput::default(), SIM_DT);
        }
        panic!("hop never finished");
    }

    /// Hold `direction` until a hop starts or is refused; returns whether it started
    fn press(level: &mut Level, direction: Direction) -> bool {
        let input = TickInput::holding(direction);
        for _ in 0..120 {
            tick(level, &input, SIM_DT);
            if level.frog().is_moving() {
                settle(level);
                return true;
            }
            if level.frog().blocked || level.collision() {
                return false;
            }
        }
        panic!("{direction:?} neither started nor refused");
    }

    fn hop(level: &mut Level, direction: Direction) {
        assert!(press(level, direction), "{direction:?} refused");
    }

    fn place(level: &mut Level, col: i32, row: i32) {
        let pos = level.grid().cell_center(col, row);
        level.set_frog_position(pos);
    }

    fn die(level: &mut Level) {
        level.set_collision(true);
        for _ in 0..200 {
            if level.paused() {
                return;
            }
            idle(level, 1);
        }
        panic!("death sequence never finished");
    }

    #[test]
    fn test_input_priority() {
        let all = TickInput { up: true, down: true, left: true, right: true };
        assert_eq!(all.direction(), Some(Direction::Up));
        let no_up = TickInput { up: false, ..all };
        assert_eq!(no_up.direction(), Some(Direction::Down));
        let sideways = TickInput { left: true, right: true, ..Default::default() };
        assert_eq!(sideways.direction(), Some(Direction::Right));
        assert_eq!(TickInput::default().direction(), None);
    }

    #[test]
    fn test_hop_snaps_and_faces() {
        let mut level = fixtures::level();
        hop(&mut level, Direction::Right);
        assert_eq!(level.frog_position(), Vec2::new(112.0, 16.0));
        assert_eq!(level.frog().facing, Facing::East);
        assert_eq!(level.frog().frame, 0);
        assert_eq!(level.drain_events(), vec![GameEvent::Hop]);
    }

    #[test]
    fn test_up_into_blocked_hedge_is_refused() {
        let mut level = fixtures::level();
        place(&mut level, 0, 4);
        tick(&mut level, &TickInput::holding(Direction::Up), SIM_DT);

        assert!(level.frog().blocked);
        assert!(!level.frog().is_moving());
        assert_eq!(level.frog().cooldown, 0.0);
        assert_eq!(level.frog_position(), Vec2::new(16.0, 144.0));
        assert!(level.drain_events().is_empty());

        idle(&mut level, 1);
        assert!(!level.frog().blocked);
    }

    #[test]
    fn test_refused_move_still_turns_frog() {
        let mut level = fixtures::level();
        assert!(!press(&mut level, Direction::Down));
        assert_eq!(level.frog().facing, Facing::South);
        assert_eq!(level.frog_position(), Vec2::new(80.0, 16.0));
    }

    #[test]
    fn test_walk_across_the_level() {
        let mut level = fixtures::level();
        for _ in 0..4 {
            hop(&mut level, Direction::Up);
        }
        assert!(!level.collision());
        assert_eq!(level.frog_position(), Vec2::new(80.0, 144.0));
    }

    #[test]
    fn test_exit_is_occupied_once() {
        let mut level = fixtures::level();
        place(&mut level, 1, 4);
        hop(&mut level, Direction::Up);

        assert!(level.reached_exit());
        assert!(level.exit_settled());
        assert!(!level.frog_visible());
        assert_eq!(level.drain_events(), vec![GameEvent::Trill]);
        assert_eq!(level.exit_markers(), vec![Vec2::new(48.0, 176.0)]);

        // Input is ignored until the frog is sent back
        tick(&mut level, &TickInput::holding(Direction::Down), SIM_DT);
        assert!(!level.frog().is_moving());

        level.continue_game();
        place(&mut level, 1, 4);
        assert!(!press(&mut level, Direction::Up));
        assert!(!level.reached_exit());
        assert_eq!(level.frog_position(), Vec2::new(48.0, 144.0));
        assert_eq!(level.tally().occupied, 1);
    }

    #[test]
    fn test_win_only_when_every_exit_taken() {
        let mut level = fixtures::level();
        place(&mut level, 1, 4);
        hop(&mut level, Direction::Up);
        assert!(!level.game_won());

        level.continue_game();
        place(&mut level, 3, 4);
        hop(&mut level, Direction::Up);
        assert!(level.game_won());
    }

    #[test]
    fn test_open_slot_passes_without_scoring() {
        let mut level = fixtures::level();
        place(&mut level, 2, 4);
        hop(&mut level, Direction::Up);
        assert!(!level.reached_exit());
        assert!(level.frog().pass_through);
        assert_eq!(level.tally().occupied, 0);
        assert_eq!(level.drain_events(), vec![GameEvent::Hop]);

        // Sideways out of the opening is refused
        assert!(!press(&mut level, Direction::Left));
        assert_eq!(level.frog_position(), Vec2::new(80.0, 176.0));
        assert!(level.frog().pass_through);

        hop(&mut level, Direction::Up);
        assert!(!level.frog().pass_through);

        hop(&mut level, Direction::Down);
        assert!(level.frog().pass_through);
        hop(&mut level, Direction::Down);
        assert!(!level.frog().pass_through);
        assert_eq!(level.frog_position(), Vec2::new(80.0, 144.0));
    }

    #[test]
    fn test_down_onto_exit_slot_refused() {
        let mut level = fixtures::level();
        place(&mut level, 1, 6);
        assert!(!press(&mut level, Direction::Down));
        assert_eq!(level.frog_position(), Vec2::new(48.0, 208.0));
    }

    #[test]
    fn test_death_with_last_life_ends_the_game() {
        let tuning = Tuning {
            starting_lives: 1,
            ..Tuning::default()
        };
        let mut level = fixtures::level_with(fixtures::level_config(), tuning);
        level.set_collision(true);

        idle(&mut level, 1);
        assert!(level.death_visible());
        assert!(!level.frog_visible());
        assert_eq!(level.drain_events(), vec![GameEvent::Splat]);

        die(&mut level);
        assert_eq!(level.lives(), 0);
        assert!(level.paused());
        assert!(level.is_game_over());
        assert!(!level.death_visible());
        assert!(level.life_icons().is_empty());
    }

    #[test]
    fn test_death_frames_advance() {
        let mut level = fixtures::level();
        level.set_collision(true);
        idle(&mut level, 1);
        let mut last = 0;
        for _ in 0..30 {
            idle(&mut level, 1);
            let frame = level.death().map(|d| d.frame()).unwrap();
            assert!(frame >= last);
            last = frame;
        }
        assert!(last > 0);
    }

    #[test]
    fn test_paused_level_is_frozen() {
        let mut config = fixtures::level_config();
        config.lanes[1] = LaneConfig::Road {
            speed: 1.0,
            objects: vec![ObstacleConfig::new("car", 0.0)],
        };
        let mut level = fixtures::level_with(config, Tuning::default());
        die(&mut level);

        let car = level.lanes()[1].obstacles()[0].pos;
        let frog = level.frog_position();
        for _ in 0..10 {
            tick(&mut level, &TickInput::holding(Direction::Up), SIM_DT);
        }
        assert_eq!(level.lanes()[1].obstacles()[0].pos, car);
        assert_eq!(level.frog_position(), frog);
        assert_eq!(level.lives(), 2);
    }

    #[test]
    fn test_continue_game_resets_frog() {
        let mut level = fixtures::level();
        hop(&mut level, Direction::Right);
        die(&mut level);
        level.continue_game();

        assert_eq!(level.frog_position(), Vec2::new(80.0, 16.0));
        assert_eq!(level.frog().facing, Facing::North);
        assert_eq!(level.frog().frame, 0);
        assert!(!level.collision() && !level.paused());
        assert!(level.death().is_none());
        assert_eq!(level.lives(), 2);
        assert_eq!(level.life_icons().len(), 2);
        hop(&mut level, Direction::Up);
    }

    #[test]
    fn test_cancelled_hop_leaves_frog_in_place() {
        let mut level = fixtures::level();
        tick(&mut level, &TickInput::holding(Direction::Right), SIM_DT);
        idle(&mut level, 3);
        let mid = level.frog_position();
        assert!(mid.x > 80.0 && mid.x < 112.0);

        level.cancel_motion();
        assert!(!level.frog().is_moving());
        idle(&mut level, 30);
        assert!(!level.frog().is_moving());
        assert_eq!(level.frog_position(), mid);
        assert!(!level.collision());
    }

    #[test]
    fn test_road_collision_cancels_hop() {
        let mut level = fixtures::level();
        place(&mut level, 0, 0);
        tick(&mut level, &TickInput::holding(Direction::Up), SIM_DT);
        assert!(level.frog().is_moving());

        idle(&mut level, 12);
        assert!(level.collision());
        assert!(!level.frog().is_moving());
        assert!(level.frog_position().y < 48.0);
    }

    #[test]
    fn test_riding_a_log() {
        let mut config = fixtures::level_config();
        config.lanes[3] = LaneConfig::Water {
            speed: 1.0,
            objects: vec![ObstacleConfig::new("log", 2.0)],
        };
        let mut level = fixtures::level_with(config, Tuning::default());
        place(&mut level, 2, 3);

        idle(&mut level, 30);
        assert!(!level.collision());
        let log_x = level.lanes()[3].obstacles()[0].pos.x;
        assert!((log_x - 96.0).abs() < 1e-3);
        assert!((level.frog_position().x - 96.0).abs() < 1e-3);
    }

    #[test]
    fn test_water_without_carrier_drowns() {
        let mut level = fixtures::level();
        place(&mut level, 0, 3);
        idle(&mut level, 1);
        assert!(level.collision());
        assert_eq!(level.drain_events(), vec![GameEvent::Splat]);
    }

    #[test]
    fn test_carried_off_the_playfield() {
        let mut config = fixtures::level_config();
        config.lanes[3] = LaneConfig::Water {
            speed: -2.0,
            objects: vec![ObstacleConfig::new("log", 0.0)],
        };
        let mut level = fixtures::level_with(config, Tuning::default());
        place(&mut level, 0, 3);

        idle(&mut level, 10);
        assert!(!level.collision());
        idle(&mut level, 10);
        assert!(level.collision());
    }

    #[test]
    fn test_blocked_frog_is_not_carried() {
        let mut config = fixtures::level_config();
        config.lanes[3] = LaneConfig::Water {
            speed: 1.0,
            objects: vec![ObstacleConfig::new("log", 0.0)],
        };
        let mut level = fixtures::level_with(config, Tuning::default());
        place(&mut level, 0, 3);

        tick(&mut level, &TickInput::holding(Direction::Left), SIM_DT);
        assert!(level.frog().blocked);
        let x = level.frog_position().x;

        idle(&mut level, 1);
        assert_eq!(level.frog_position().x, x);
        idle(&mut level, 1);
        assert!(level.frog_position().x > x);
    }

    #[test]
    fn test_cooldown_drains_only_while_held() {
        let mut level = fixtures::level();
        tick(&mut level, &TickInput::holding(Direction::Right), SIM_DT);
        settle(&mut level);
        assert_eq!(level.frog().cooldown, level.tuning().move_duration);

        idle(&mut level, 60);
        assert_eq!(level.frog().cooldown, level.tuning().move_duration);

        tick(&mut level, &TickInput::holding(Direction::Left), SIM_DT);
        assert!(!level.frog().is_moving());
        assert!(level.frog().cooldown < level.tuning().move_duration);
    }
}
