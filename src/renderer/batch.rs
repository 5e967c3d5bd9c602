//! CPU sprite batching
//!
//! Every `draw` call becomes two triangles in pixel space. Consecutive sprites
//! sharing a texture are merged into one run so the GPU side issues one draw
//! per texture change.

use glam::{Mat2, Vec2, Vec3};

use super::Renderer;
use super::vertex::SpriteVertex;
use crate::resources::TextureHandle;

/// Unit quad corners with matching texture coordinates (TL, TR, BR, BL)
const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// Two triangles over the corners
const QUAD_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

pub const VERTICES_PER_SPRITE: u32 = QUAD_INDICES.len() as u32;

/// Vertices `start..start + count` all sample `texture`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRun {
    pub texture: TextureHandle,
    pub start: u32,
    pub count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteBatch {
    vertices: Vec<SpriteVertex>,
    runs: Vec<SpriteRun>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything queued for the previous frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.runs.clear();
    }

    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    pub fn runs(&self) -> &[SpriteRun] {
        &self.runs
    }

    pub fn sprite_count(&self) -> usize {
        self.vertices.len() / QUAD_INDICES.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Renderer for SpriteBatch {
    fn draw(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
    ) {
        // Rotate about the sprite center
        let rot = Mat2::from_angle(rotation.to_radians());
        let half = size * 0.5;
        let color = color.extend(1.0).to_array();

        let corners = CORNERS.map(|uv| {
            let local = Vec2::from(uv) * size - half;
            let p = position + half + rot * local;
            SpriteVertex::new(p.to_array(), uv, color)
        });

        let start = self.vertices.len() as u32;
        self.vertices
            .extend(QUAD_INDICES.iter().map(|&i| corners[i]));

        match self.runs.last_mut() {
            Some(run) if run.texture == texture => run.count += VERTICES_PER_SPRITE,
            _ => self.runs.push(SpriteRun {
                texture,
                start,
                count: VERTICES_PER_SPRITE,
            }),
        }
    }
}
