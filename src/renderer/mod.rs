//! WebGPU rendering module
//!
//! The game draws through the `Renderer` trait; `SpriteBatch` turns those
//! calls into textured quads and `SpriteRenderState` puts them on screen.

pub mod batch;
pub mod pipeline;
pub mod textures;
pub mod vertex;

pub use batch::{SpriteBatch, SpriteRun};
pub use pipeline::{RenderInitError, SpriteRenderState};
pub use textures::TextureImage;
pub use vertex::SpriteVertex;

use glam::{Vec2, Vec3};

use crate::resources::TextureHandle;
use crate::sim::GameState;

/// Sprite sink
pub trait Renderer {
    /// Draw `texture` with its top-left corner at `position`, rotated by
    /// `rotation` degrees about its center and multiplied by `color`
    fn draw(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
    );
}

/// Background, bricks, paddle, ball
pub fn draw_scene(renderer: &mut dyn Renderer, state: &GameState, background: TextureHandle) {
    renderer.draw(background, Vec2::ZERO, state.arena, 0.0, Vec3::ONE);
    state.draw(renderer);
}
