//! Procedural sprite textures
//!
//! Sprites are generated at startup rather than decoded from image files.
//! They are near-white so the per-sprite tint carries the color.

use crate::resources::{
    ResourceTable, SHADER_SPRITE, TEXTURE_BACKGROUND, TEXTURE_BALL, TEXTURE_BLOCK,
    TEXTURE_BLOCK_SOLID, TEXTURE_PADDLE, TextureHandle,
};

/// Every texture the game draws with
pub const TEXTURE_NAMES: [&str; 5] = [
    TEXTURE_BACKGROUND,
    TEXTURE_BALL,
    TEXTURE_PADDLE,
    TEXTURE_BLOCK,
    TEXTURE_BLOCK_SOLID,
];

/// RGBA8 pixels, row-major, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; (width * height * 4) as usize],
        }
    }

    /// Fill every pixel from a function of (x, y)
    fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, f(x, y));
            }
        }
        image
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.rgba[idx..idx + 4].copy_from_slice(&pixel);
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ]
    }
}

fn grey(v: f32, alpha: f32) -> [u8; 4] {
    let v = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [v, v, v, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8]
}

/// Dark blue vertical gradient with a soft vignette
pub fn background() -> TextureImage {
    let (w, h) = (128, 96);
    TextureImage::from_fn(w, h, |x, y| {
        let t = y as f32 / (h - 1) as f32;
        let dx = x as f32 / (w - 1) as f32 - 0.5;
        let dy = t - 0.5;
        let vignette = 1.0 - (dx * dx + dy * dy) * 0.8;
        let r = (0.05 + 0.05 * t) * vignette;
        let g = (0.06 + 0.08 * t) * vignette;
        let b = (0.18 + 0.12 * t) * vignette;
        [
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            255,
        ]
    })
}

/// Anti-aliased disc with a highlight toward the top-left
pub fn ball() -> TextureImage {
    let size = 64;
    let radius = size as f32 / 2.0;
    TextureImage::from_fn(size, size, |x, y| {
        let px = x as f32 + 0.5 - radius;
        let py = y as f32 + 0.5 - radius;
        let dist = (px * px + py * py).sqrt();
        let alpha = (radius - dist).clamp(0.0, 1.0);

        let hx = px + radius * 0.35;
        let hy = py + radius * 0.35;
        let highlight = 1.0 - ((hx * hx + hy * hy).sqrt() / radius).min(1.0);
        grey(0.8 + 0.2 * highlight, alpha)
    })
}

/// Rounded bar, lighter along the top edge
pub fn paddle() -> TextureImage {
    let (w, h) = (128, 32);
    let corner = 10.0;
    TextureImage::from_fn(w, h, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        // Distance outside the inner rectangle
        let qx = (corner - px).max(px - (w as f32 - corner)).max(0.0);
        let qy = (corner - py).max(py - (h as f32 - corner)).max(0.0);
        let alpha = (corner - (qx * qx + qy * qy).sqrt()).clamp(0.0, 1.0);

        let shade = 1.0 - 0.3 * (py / h as f32);
        grey(shade, alpha)
    })
}

/// Bevelled brick
pub fn block() -> TextureImage {
    let (w, h) = (64, 32);
    let bevel = 3;
    TextureImage::from_fn(w, h, |x, y| {
        let shade = if x < bevel || y < bevel {
            1.0
        } else if x >= w - bevel || y >= h - bevel {
            0.55
        } else {
            0.85
        };
        grey(shade, 1.0)
    })
}

/// Riveted metal plate for indestructible bricks
pub fn block_solid() -> TextureImage {
    let (w, h) = (64, 32);
    let rivets = [(6.0, 6.0), (58.0, 6.0), (6.0, 26.0), (58.0, 26.0)];
    TextureImage::from_fn(w, h, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let on_rivet = rivets.iter().any(|&(rx, ry): &(f32, f32)| {
            let dx = px - rx;
            let dy = py - ry;
            dx * dx + dy * dy < 6.25
        });

        let shade = if x < 2 || y < 2 || x >= w - 2 || y >= h - 2 {
            0.4
        } else if on_rivet {
            1.0
        } else {
            // Brushed streaks
            0.65 + 0.05 * ((y % 4) as f32 / 3.0)
        };
        grey(shade, 1.0)
    })
}

/// Generate a texture by its resource name
pub fn generate(name: &str) -> Option<TextureImage> {
    match name {
        TEXTURE_BACKGROUND => Some(background()),
        TEXTURE_BALL => Some(ball()),
        TEXTURE_PADDLE => Some(paddle()),
        TEXTURE_BLOCK => Some(block()),
        TEXTURE_BLOCK_SOLID => Some(block_solid()),
        _ => None,
    }
}

/// Register every texture and the sprite shader, returning the images to upload
pub fn register_all(resources: &mut ResourceTable) -> Vec<(TextureHandle, TextureImage)> {
    resources.insert_shader(SHADER_SPRITE);
    TEXTURE_NAMES
        .iter()
        .filter_map(|&name| {
            let image = generate(name)?;
            Some((resources.insert_texture(name), image))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_generates() {
        for name in TEXTURE_NAMES {
            let image = generate(name).unwrap();
            assert_eq!(
                image.rgba.len(),
                (image.width * image.height * 4) as usize,
                "{}",
                name
            );
        }
        assert!(generate("unknown").is_none());
    }

    #[test]
    fn test_ball_is_round() {
        let image = ball();
        assert_eq!(image.pixel(0, 0)[3], 0);
        assert_eq!(image.pixel(32, 32)[3], 255);
    }

    #[test]
    fn test_paddle_corners_transparent() {
        let image = paddle();
        assert_eq!(image.pixel(0, 0)[3], 0);
        assert_eq!(image.pixel(image.width - 1, image.height - 1)[3], 0);
        assert_eq!(image.pixel(64, 16)[3], 255);
    }

    #[test]
    fn test_register_all() {
        let mut table = ResourceTable::new();
        let textures = register_all(&mut table);
        assert_eq!(textures.len(), TEXTURE_NAMES.len());
        assert_eq!(table.texture_count(), TEXTURE_NAMES.len());
        assert!(table.shader(SHADER_SPRITE).is_ok());
        for (handle, _) in &textures {
            assert!(TEXTURE_NAMES
                .iter()
                .any(|name| table.texture(name).unwrap() == *handle));
        }
    }
}
