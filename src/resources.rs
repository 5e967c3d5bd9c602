//! Named resource table
//!
//! Maps symbolic names to opaque handles. Built once at startup and passed by
//! reference to whatever constructs renderable entities; the simulation only
//! ever carries the handles around.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, ResourceKind};

/// Texture names used by the game
pub const TEXTURE_BACKGROUND: &str = "background";
pub const TEXTURE_BALL: &str = "ball";
pub const TEXTURE_PADDLE: &str = "paddle";
pub const TEXTURE_BLOCK: &str = "block";
pub const TEXTURE_BLOCK_SOLID: &str = "block_solid";

/// Shader used for every sprite
pub const SHADER_SPRITE: &str = "sprite";

/// Opaque texture handle (index into the renderer's texture list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Opaque shader handle (index into the renderer's pipeline list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShaderHandle(pub u32);

#[derive(Debug, Default)]
pub struct ResourceTable {
    textures: HashMap<String, TextureHandle>,
    shaders: HashMap<String, ShaderHandle>,
    next_texture: u32,
    next_shader: u32,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture name, returning its handle.
    /// Re-registering a name returns the existing handle.
    pub fn insert_texture(&mut self, name: impl Into<String>) -> TextureHandle {
        let next = &mut self.next_texture;
        *self.textures.entry(name.into()).or_insert_with(|| {
            let handle = TextureHandle(*next);
            *next += 1;
            handle
        })
    }

    /// Register a shader name, returning its handle
    pub fn insert_shader(&mut self, name: impl Into<String>) -> ShaderHandle {
        let next = &mut self.next_shader;
        *self.shaders.entry(name.into()).or_insert_with(|| {
            let handle = ShaderHandle(*next);
            *next += 1;
            handle
        })
    }

    pub fn texture(&self, name: &str) -> Result<TextureHandle, ResourceError> {
        self.textures
            .get(name)
            .copied()
            .ok_or_else(|| ResourceError::NotFound {
                kind: ResourceKind::Texture,
                name: name.to_string(),
            })
    }

    pub fn shader(&self, name: &str) -> Result<ShaderHandle, ResourceError> {
        self.shaders
            .get(name)
            .copied()
            .ok_or_else(|| ResourceError::NotFound {
                kind: ResourceKind::Shader,
                name: name.to_string(),
            })
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_registered() {
        let mut table = ResourceTable::new();
        let block = table.insert_texture(TEXTURE_BLOCK);
        let solid = table.insert_texture(TEXTURE_BLOCK_SOLID);
        assert_ne!(block, solid);
        assert_eq!(table.texture(TEXTURE_BLOCK), Ok(block));
        assert_eq!(table.texture_count(), 2);
    }

    #[test]
    fn test_reinsert_keeps_handle() {
        let mut table = ResourceTable::new();
        let first = table.insert_texture("ball");
        let second = table.insert_texture("ball");
        assert_eq!(first, second);
        assert_eq!(table.texture_count(), 1);
    }

    #[test]
    fn test_missing_name_is_not_found() {
        let mut table = ResourceTable::new();
        table.insert_shader(SHADER_SPRITE);
        assert!(table.shader(SHADER_SPRITE).is_ok());
        assert_eq!(
            table.texture("face"),
            Err(ResourceError::NotFound {
                kind: ResourceKind::Texture,
                name: "face".to_string(),
            })
        );
    }
}
