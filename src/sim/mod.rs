//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (bricks keep their load index)
//! - No platform dependencies; drawing goes through the `Renderer` trait

pub mod collision;
pub mod entity;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{
    Collision, Direction, check_ball_collision, check_collision, paddle_rebound,
    resolve_brick_collision, vector_direction,
};
pub use entity::{Ball, Drawable, GameObject};
pub use level::{BUNDLED, BrickSprites, Level, TileGrid, bundled, tile_color};
pub use state::{GameEvent, GamePhase, GameState, PlayerSprites};
pub use tick::{TickInput, tick};
