//! Game state and core simulation types

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Drawable, GameObject};
use super::level::Level;
use crate::error::LoadError;
use crate::renderer::Renderer;
use crate::resources::{ResourceTable, TEXTURE_BALL, TEXTURE_PADDLE, TextureHandle};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play (or stuck to the paddle waiting for launch)
    Active,
    /// Every destructible brick cleared
    Win,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    BrickDestroyed { index: usize },
    SolidBrickHit { index: usize },
    PaddleHit,
    /// Ball fell past the bottom edge
    BallLost { lives_left: u8 },
    LevelCompleted,
    /// Out of lives (or restarting after a win): bricks and lives restored
    LevelRestarted,
}

/// Sprites for the player-controlled entities
#[derive(Debug, Clone, Copy)]
pub struct PlayerSprites {
    pub paddle: TextureHandle,
    pub ball: TextureHandle,
}

impl PlayerSprites {
    pub fn from_resources(resources: &ResourceTable) -> Result<Self, LoadError> {
        Ok(Self {
            paddle: resources.texture(TEXTURE_PADDLE)?,
            ball: resources.texture(TEXTURE_BALL)?,
        })
    }
}

/// Complete game state (deterministic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Playfield size in pixels
    pub arena: Vec2,
    pub tuning: Tuning,
    pub paddle: GameObject,
    pub ball: Ball,
    pub level: Level,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(level: Level, tuning: Tuning, arena: Vec2, sprites: PlayerSprites) -> Self {
        let paddle = GameObject::new(
            paddle_start(arena, &tuning),
            tuning.paddle_size,
            Vec2::ZERO,
            Vec3::ONE,
            sprites.paddle,
        );
        let ball = Ball::new(
            ball_start(&paddle, tuning.ball_radius),
            tuning.ball_radius,
            tuning.ball_velocity,
            sprites.ball,
        );

        Self {
            phase: GamePhase::Active,
            arena,
            lives: tuning.lives,
            tuning,
            paddle,
            ball,
            level,
            time_ticks: 0,
        }
    }

    /// Build with sprites looked up by name
    pub fn from_resources(
        level: Level,
        tuning: Tuning,
        arena: Vec2,
        resources: &ResourceTable,
    ) -> Result<Self, LoadError> {
        let sprites = PlayerSprites::from_resources(resources)?;
        Ok(Self::new(level, tuning, arena, sprites))
    }

    /// Re-center the paddle and stick a fresh ball to it
    pub fn reset_player(&mut self) {
        self.paddle.pos = paddle_start(self.arena, &self.tuning);
        let pos = ball_start(&self.paddle, self.ball.radius());
        self.ball.reset(pos, self.tuning.ball_velocity);
    }

    /// Restore every brick and the life counter
    pub fn reset_level(&mut self) {
        self.level.reset();
        self.lives = self.tuning.lives;
    }

    /// Draw bricks, paddle and ball
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.level.draw(renderer);
        self.paddle.draw(renderer);
        self.ball.draw(renderer);
    }
}

/// Paddle centered on the bottom edge
fn paddle_start(arena: Vec2, tuning: &Tuning) -> Vec2 {
    Vec2::new(
        arena.x / 2.0 - tuning.paddle_size.x / 2.0,
        arena.y - tuning.paddle_size.y,
    )
}

/// Ball resting on top of the paddle, horizontally centered
fn ball_start(paddle: &GameObject, radius: f32) -> Vec2 {
    paddle.pos + Vec2::new(paddle.size.x / 2.0 - radius, -radius * 2.0)
}
