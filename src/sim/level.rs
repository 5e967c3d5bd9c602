//! Brick layouts loaded from tile-code text files
//!
//! One digit per cell, rows separated by newlines, spaces ignored:
//! `0` is empty, `1` is a solid (indestructible) brick, any other digit is a
//! destructible brick tinted from a fixed palette.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::{Drawable, GameObject};
use crate::error::LoadError;
use crate::renderer::Renderer;
use crate::resources::{ResourceTable, TEXTURE_BLOCK, TEXTURE_BLOCK_SOLID, TextureHandle};

/// Levels shipped with the game, compiled in for targets without a filesystem
pub const BUNDLED: [(&str, &str); 4] = [
    ("one", include_str!("../../levels/one.lvl")),
    ("two", include_str!("../../levels/two.lvl")),
    ("three", include_str!("../../levels/three.lvl")),
    ("four", include_str!("../../levels/four.lvl")),
];

/// Source text of a bundled level
pub fn bundled(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(level, _)| *level == name)
        .map(|(_, source)| *source)
}

/// Tint for a tile code
pub fn tile_color(code: u8) -> Vec3 {
    match code {
        1 => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// Parsed tile codes, every row the same width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: Vec<Vec<u8>>,
}

impl TileGrid {
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();

        for (line_no, line) in source.lines().enumerate() {
            let mut row = Vec::new();
            for (column, ch) in line.chars().enumerate() {
                match ch {
                    ' ' | '\t' | '\r' => continue,
                    '0'..='9' => row.push(ch as u8 - b'0'),
                    _ => {
                        return Err(LoadError::InvalidTile {
                            row: line_no,
                            column,
                            found: ch,
                        });
                    }
                }
            }
            if row.is_empty() {
                continue;
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LoadError::RaggedRow {
                        row: line_no,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(LoadError::EmptyLevel);
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        self.rows.get(row)?.get(column).copied()
    }
}

/// Textures a level needs
#[derive(Debug, Clone, Copy)]
pub struct BrickSprites {
    pub block: TextureHandle,
    pub solid: TextureHandle,
}

impl BrickSprites {
    pub fn from_resources(resources: &ResourceTable) -> Result<Self, LoadError> {
        Ok(Self {
            block: resources.texture(TEXTURE_BLOCK)?,
            solid: resources.texture(TEXTURE_BLOCK_SOLID)?,
        })
    }
}

/// A grid of bricks; indices stay stable for the whole session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<GameObject>,
}

impl Level {
    /// Lay bricks out over a `level_size` pixel area
    pub fn from_grid(grid: &TileGrid, level_size: Vec2, sprites: BrickSprites) -> Self {
        let unit = Vec2::new(
            level_size.x / grid.width() as f32,
            level_size.y / grid.height() as f32,
        );

        let mut bricks = Vec::new();
        for (i, row) in grid.rows.iter().enumerate() {
            for (j, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let pos = Vec2::new(unit.x * j as f32, unit.y * i as f32);
                let sprite = if code == 1 {
                    sprites.solid
                } else {
                    sprites.block
                };
                let mut brick = GameObject::new(pos, unit, Vec2::ZERO, tile_color(code), sprite);
                brick.is_solid = code == 1;
                bricks.push(brick);
            }
        }

        Self { bricks }
    }

    /// Parse tile text and lay it out
    pub fn parse(
        source: &str,
        level_size: Vec2,
        resources: &ResourceTable,
    ) -> Result<Self, LoadError> {
        let sprites = BrickSprites::from_resources(resources)?;
        let grid = TileGrid::parse(source)?;
        Ok(Self::from_grid(&grid, level_size, sprites))
    }

    /// Read a level file
    pub fn load(
        path: impl AsRef<Path>,
        level_size: Vec2,
        resources: &ResourceTable,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::parse(&source, level_size, resources)?;
        log::info!(
            "Loaded level {} ({} bricks, {} destructible)",
            path.display(),
            level.bricks.len(),
            level.remaining()
        );
        Ok(level)
    }

    /// Bricks still in play
    pub fn active_bricks(&self) -> impl Iterator<Item = &GameObject> {
        self.bricks.iter().filter(|b| !b.destroyed)
    }

    /// Destructible bricks left to clear
    pub fn remaining(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| !b.is_solid && !b.destroyed)
            .count()
    }

    /// True once every destructible brick is gone; solid bricks never count
    pub fn is_completed(&self) -> bool {
        self.remaining() == 0
    }

    /// Bring every brick back
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.destroyed = false;
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for brick in self.active_bricks() {
            brick.draw(renderer);
        }
    }
}
