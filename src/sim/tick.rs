//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{check_ball_collision, paddle_rebound, resolve_brick_collision};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move paddle left (Left / A held)
    pub move_left: bool,
    /// Move paddle right (Right / D held)
    pub move_right: bool,
    /// Launch edge (Space pressed this frame)
    pub launch: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    if state.phase == GamePhase::Win {
        if input.launch {
            state.reset_level();
            state.reset_player();
            state.phase = GamePhase::Active;
            events.push(GameEvent::LevelRestarted);
            log::info!("Level restarted after win");
        }
        return events;
    }

    // Paddle movement; a stuck ball rides along
    let mut dx = 0.0;
    if input.move_left {
        dx -= state.tuning.paddle_speed * dt;
    }
    if input.move_right {
        dx += state.tuning.paddle_speed * dt;
    }
    if dx != 0.0 {
        let max_x = (state.arena.x - state.paddle.size.x).max(0.0);
        let old_x = state.paddle.pos.x;
        state.paddle.pos.x = (old_x + dx).clamp(0.0, max_x);
        if state.ball.stuck {
            state.ball.object.pos.x += state.paddle.pos.x - old_x;
        }
    }

    if input.launch && state.ball.stuck {
        state.ball.stuck = false;
        events.push(GameEvent::BallLaunched);
    }

    state.ball.advance(dt, state.arena.x);

    // A stuck ball rides the paddle and ignores collisions
    if !state.ball.stuck {
        for (index, brick) in state.level.bricks.iter_mut().enumerate() {
            if brick.destroyed {
                continue;
            }
            let collision = check_ball_collision(&state.ball, brick);
            if !collision.hit {
                continue;
            }
            if brick.is_solid {
                events.push(GameEvent::SolidBrickHit { index });
            } else {
                brick.destroyed = true;
                events.push(GameEvent::BrickDestroyed { index });
            }
            resolve_brick_collision(&mut state.ball, &collision);
        }

        if check_ball_collision(&state.ball, &state.paddle).hit {
            paddle_rebound(
                &mut state.ball,
                &state.paddle,
                state.tuning.ball_velocity.x,
                state.tuning.paddle_strength,
            );
            events.push(GameEvent::PaddleHit);
        }
    }

    // Fell out the bottom
    if state.ball.object.pos.y >= state.arena.y {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::BallLost {
            lives_left: state.lives,
        });
        log::debug!("Ball lost, {} lives left", state.lives);
        if state.lives == 0 {
            state.reset_level();
            events.push(GameEvent::LevelRestarted);
            log::info!("Out of lives, level restarted");
        }
        state.reset_player();
    }

    if state.level.is_completed() {
        state.phase = GamePhase::Win;
        events.push(GameEvent::LevelCompleted);
        log::info!("Level completed after {} ticks", state.time_ticks);
    }

    events
}

/// Demo AI: launch right away and keep the paddle under the ball
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    if state.ball.stuck || state.phase == GamePhase::Win {
        input.launch = true;
    }

    // Oscillating offset so rebounds vary instead of looping
    let time_factor = state.time_ticks as f32 * 0.01;
    let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.1) * state.paddle.size.x;

    let target = state.ball.center().x + offset;
    let paddle_center = state.paddle.center().x;
    let dead_zone = state.paddle.size.x * 0.05;

    input.move_left = target < paddle_center - dead_zone;
    input.move_right = target > paddle_center + dead_zone;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::resources::{
        ResourceTable, TEXTURE_BALL, TEXTURE_BLOCK, TEXTURE_BLOCK_SOLID, TEXTURE_PADDLE,
    };
    use crate::sim::Level;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state(layout: &str, level_size: Vec2) -> GameState {
        let mut table = ResourceTable::new();
        for name in [TEXTURE_BLOCK, TEXTURE_BLOCK_SOLID, TEXTURE_PADDLE, TEXTURE_BALL] {
            table.insert_texture(name);
        }
        let level = Level::parse(layout, level_size, &table).unwrap();
        GameState::from_resources(level, Tuning::default(), Vec2::new(800.0, 600.0), &table)
            .unwrap()
    }

    fn default_state() -> GameState {
        new_state("2 2 2 2\n3 3 3 3\n", Vec2::new(800.0, 300.0))
    }

    /// Free the ball with its center at (cx, cy)
    fn place_ball(state: &mut GameState, cx: f32, cy: f32, vel: Vec2) {
        let r = state.ball.radius();
        state.ball.stuck = false;
        state.ball.object.pos = Vec2::new(cx - r, cy - r);
        state.ball.object.vel = vel;
    }

    #[test]
    fn test_ball_stays_stuck_until_launch() {
        let mut state = default_state();
        let start = state.ball.object.pos;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert!(state.ball.stuck);
        assert_eq!(state.ball.object.pos, start);

        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        let events = tick(&mut state, &launch, SIM_DT);
        assert_eq!(events, vec![GameEvent::BallLaunched]);
        assert!(!state.ball.stuck);
        assert!(state.ball.object.pos.y < start.y);
    }

    #[test]
    fn test_stuck_ball_follows_paddle() {
        let mut state = default_state();
        let offset = state.ball.object.pos.x - state.paddle.pos.x;

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, 0.1);
        assert!((state.paddle.pos.x - 300.0).abs() < 1e-3);
        assert!((state.ball.object.pos.x - state.paddle.pos.x - offset).abs() < 1e-3);

        // Pinned against the left wall, ball keeps its offset
        for _ in 0..20 {
            tick(&mut state, &left, 0.1);
        }
        assert_eq!(state.paddle.pos.x, 0.0);
        assert!((state.ball.object.pos.x - offset).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_clamped_right() {
        let mut state = default_state();
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut state, &right, 0.1);
        }
        assert_eq!(state.paddle.pos.x, 700.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = default_state();
        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &both, 0.1);
        assert_eq!(state.paddle.pos.x, 350.0);
    }

    #[test]
    fn test_destructible_brick_destroyed_and_reflects() {
        // One brick at (200, 100) sized (200, 100); bottom face at y = 200
        let mut state = new_state("0 0 0 0\n0 2 0 0\n", Vec2::new(800.0, 200.0));
        place_ball(&mut state, 300.0, 210.0, Vec2::new(0.0, -350.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.contains(&GameEvent::BrickDestroyed { index: 0 }));
        assert!(state.level.bricks[0].destroyed);
        assert_eq!(state.ball.object.vel, Vec2::new(0.0, 350.0));
        // Pushed back out below the brick
        assert!((state.ball.center().y - 212.5).abs() < 1e-3);
        // Last destructible brick gone
        assert!(events.contains(&GameEvent::LevelCompleted));
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    fn test_destroyed_brick_no_longer_collides() {
        let mut state = new_state("2 0 0 0\n0 2 0 0\n", Vec2::new(800.0, 200.0));
        state.level.bricks[1].destroyed = true;
        place_ball(&mut state, 300.0, 150.0, Vec2::new(0.0, -350.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.ball.object.vel, Vec2::new(0.0, -350.0));
    }

    #[test]
    fn test_solid_brick_never_destroyed() {
        let mut state = new_state("2 0 0 0\n0 1 0 0\n", Vec2::new(800.0, 200.0));
        place_ball(&mut state, 300.0, 210.0, Vec2::new(0.0, -350.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(events, vec![GameEvent::SolidBrickHit { index: 1 }]);
        assert!(!state.level.bricks[1].destroyed);
        assert!(state.ball.object.vel.y > 0.0);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_paddle_rebound_off_center() {
        let mut state = default_state();
        // Right half of the paddle (center x = 400, top y = 580)
        place_ball(&mut state, 425.0, 570.0, Vec2::new(0.0, 350.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(events, vec![GameEvent::PaddleHit]);
        let vel = state.ball.object.vel;
        assert!(vel.x > 0.0);
        assert!(vel.y < 0.0);
        assert!((vel.length() - 350.0).abs() < 1e-2);
    }

    #[test]
    fn test_stuck_ball_ignores_paddle() {
        let mut state = default_state();
        let vel = state.ball.object.vel;
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!events.contains(&GameEvent::PaddleHit));
        assert_eq!(state.ball.object.vel, vel);
    }

    #[test]
    fn test_stuck_ball_ignores_overlapping_brick() {
        // One brick covering the whole arena, resting ball included
        let mut state = new_state("2\n", Vec2::new(800.0, 600.0));
        let pos = state.ball.object.pos;
        let vel = state.ball.object.vel;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert!(state.ball.stuck);
        assert!(!state.level.bricks[0].destroyed);
        assert_eq!(state.ball.object.pos, pos);
        assert_eq!(state.ball.object.vel, vel);
    }

    #[test]
    fn test_ball_lost_resets_player() {
        let mut state = default_state();
        place_ball(&mut state, 60.0, 610.0, Vec2::new(0.0, 350.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(events, vec![GameEvent::BallLost { lives_left: 2 }]);
        assert_eq!(state.lives, 2);
        assert!(state.ball.stuck);
        assert_eq!(state.paddle.pos, Vec2::new(350.0, 580.0));
    }

    #[test]
    fn test_last_life_restarts_level() {
        let mut state = default_state();
        state.lives = 1;
        state.level.bricks[0].destroyed = true;
        place_ball(&mut state, 60.0, 610.0, Vec2::new(0.0, 350.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(
            events,
            vec![
                GameEvent::BallLost { lives_left: 0 },
                GameEvent::LevelRestarted
            ]
        );
        assert_eq!(state.lives, 3);
        assert!(!state.level.bricks[0].destroyed);
    }

    #[test]
    fn test_win_waits_for_launch() {
        let mut state = new_state("1 2\n", Vec2::new(800.0, 100.0));
        state.level.bricks[1].destroyed = true;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(events, vec![GameEvent::LevelCompleted]);
        assert_eq!(state.phase, GamePhase::Win);

        // Nothing moves while won
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &right, SIM_DT).is_empty());
        assert_eq!(state.paddle.pos.x, 350.0);

        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        let events = tick(&mut state, &launch, SIM_DT);
        assert_eq!(events, vec![GameEvent::LevelRestarted]);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(!state.level.bricks[1].destroyed);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_idle_mode_plays() {
        let mut state = default_state();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut destroyed = 0;
        for _ in 0..5000 {
            for event in tick(&mut state, &input, SIM_DT) {
                if matches!(event, GameEvent::BrickDestroyed { .. }) {
                    destroyed += 1;
                }
            }
        }
        assert!(destroyed > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = default_state();
        let mut state2 = default_state();

        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput {
                launch: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_right: true,
                ..Default::default()
            },
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            let e1 = tick(&mut state1, input, SIM_DT);
            let e2 = tick(&mut state2, input, SIM_DT);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.paddle, state2.paddle);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }
}
