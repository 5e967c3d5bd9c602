//! Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, levels, collisions, game state)
//! - `renderer`: WebGPU sprite rendering
//! - `input`: Keyboard state table
//! - `resources`: Named texture/shader handles
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod renderer;
pub mod resources;
pub mod sim;
pub mod tuning;

pub use error::{LoadError, ResourceError};
pub use input::KeyState;
pub use resources::{ResourceTable, ShaderHandle, TextureHandle};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the loop will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Number of slots in the key state table
    pub const KEY_COUNT: usize = 1024;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle travel speed (pixels/s)
    pub const PADDLE_SPEED: f32 = 500.0;
    /// How strongly the hit offset on the paddle bends the rebound
    pub const PADDLE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const BALL_VELOCITY_X: f32 = 100.0;
    pub const BALL_VELOCITY_Y: f32 = -350.0;

    /// Lives before the level is reset
    pub const LIVES: u8 = 3;
    /// Share of the window height occupied by the brick grid
    pub const LEVEL_HEIGHT_FRACTION: f32 = 0.5;
}

/// Window size as a vector
#[inline]
pub fn window_size() -> Vec2 {
    Vec2::new(consts::WINDOW_WIDTH, consts::WINDOW_HEIGHT)
}

/// Initial launch velocity of the ball
#[inline]
pub fn initial_ball_velocity() -> Vec2 {
    Vec2::new(consts::BALL_VELOCITY_X, consts::BALL_VELOCITY_Y)
}
