//! Entity types: rectangular game objects and the ball

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::renderer::Renderer;
use crate::resources::TextureHandle;

/// Anything with a sprite, a position and a size
pub trait Drawable {
    fn texture(&self) -> TextureHandle;
    /// Top-left corner
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;
    /// Rotation in degrees
    fn rotation(&self) -> f32;
    fn color(&self) -> Vec3;

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw(
            self.texture(),
            self.position(),
            self.size(),
            self.rotation(),
            self.color(),
        );
    }
}

/// A rectangular entity (brick or paddle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Tint applied to the shared texture
    pub color: Vec3,
    /// Degrees, visual only
    pub rotation: f32,
    /// Indestructible brick
    pub is_solid: bool,
    /// Out of play; the slot stays so indices are stable
    pub destroyed: bool,
    pub sprite: TextureHandle,
}

impl GameObject {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, color: Vec3, sprite: TextureHandle) -> Self {
        Self {
            pos,
            size,
            vel,
            color,
            rotation: 0.0,
            is_solid: false,
            destroyed: false,
            sprite,
        }
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new(
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::ZERO,
            Vec3::ONE,
            TextureHandle::default(),
        )
    }
}

impl Drawable for GameObject {
    fn texture(&self) -> TextureHandle {
        self.sprite
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn color(&self) -> Vec3 {
        self.color
    }
}

/// The ball: a square game object with a radius, optionally riding the paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub object: GameObject,
    radius: f32,
    /// Riding on the paddle; velocity is not integrated
    pub stuck: bool,
}

impl Ball {
    /// New ball, stuck until launched
    pub fn new(pos: Vec2, radius: f32, vel: Vec2, sprite: TextureHandle) -> Self {
        let size = Vec2::splat(radius * 2.0);
        Self {
            object: GameObject::new(pos, size, vel, Vec3::ONE, sprite),
            radius,
            stuck: true,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Change the radius, keeping `size == 2 * radius`
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.object.size = Vec2::splat(radius * 2.0);
    }

    /// Circle center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.object.pos + Vec2::splat(self.radius)
    }

    /// Integrate velocity and bounce off the left, right and top walls.
    /// The bottom is open. Returns the new position.
    pub fn advance(&mut self, dt: f32, window_width: f32) -> Vec2 {
        if self.stuck {
            return self.object.pos;
        }

        let obj = &mut self.object;
        obj.pos += obj.vel * dt;

        if obj.pos.x <= 0.0 {
            obj.vel.x = -obj.vel.x;
            obj.pos.x = 0.0;
        }
        if obj.pos.x + obj.size.x >= window_width {
            obj.vel.x = -obj.vel.x;
            obj.pos.x = window_width - obj.size.x;
        }
        if obj.pos.y <= 0.0 {
            obj.vel.y = -obj.vel.y;
            obj.pos.y = 0.0;
        }

        obj.pos
    }

    /// Put the ball back on the paddle with a fresh velocity
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.object.pos = pos;
        self.object.vel = vel;
        self.stuck = true;
    }
}

impl Drawable for Ball {
    fn texture(&self) -> TextureHandle {
        self.object.sprite
    }

    fn position(&self) -> Vec2 {
        self.object.pos
    }

    fn size(&self) -> Vec2 {
        self.object.size
    }

    fn rotation(&self) -> f32 {
        self.object.rotation
    }

    fn color(&self) -> Vec3 {
        self.object.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, 12.5, vel, TextureHandle(0));
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_size_tracks_radius() {
        let mut ball = Ball::new(Vec2::ZERO, 12.5, Vec2::ZERO, TextureHandle(0));
        assert_eq!(ball.object.size, Vec2::new(25.0, 25.0));
        ball.set_radius(4.0);
        assert_eq!(ball.object.size, Vec2::new(8.0, 8.0));
        assert_eq!(ball.center(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_free_flight() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(-100.0, -350.0));
        let pos = ball.advance(0.016, 800.0);
        assert!((pos.x - 98.4).abs() < 1e-3);
        assert!((pos.y - 94.4).abs() < 1e-3);
        assert_eq!(ball.object.vel, Vec2::new(-100.0, -350.0));
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(50.0, 50.0), 12.5, Vec2::new(100.0, -350.0), TextureHandle(0));
        assert_eq!(ball.advance(1.0, 800.0), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_left_wall_reflects_and_clamps() {
        let mut ball = free_ball(Vec2::new(1.0, 300.0), Vec2::new(-200.0, 50.0));
        ball.advance(0.016, 800.0);
        assert_eq!(ball.object.pos.x, 0.0);
        assert_eq!(ball.object.vel, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_right_wall_reflects_and_clamps() {
        let mut ball = free_ball(Vec2::new(774.0, 300.0), Vec2::new(200.0, 50.0));
        ball.advance(0.016, 800.0);
        assert_eq!(ball.object.pos.x, 775.0);
        assert_eq!(ball.object.vel, Vec2::new(-200.0, 50.0));
    }

    #[test]
    fn test_top_wall_reflects_and_clamps() {
        let mut ball = free_ball(Vec2::new(300.0, 2.0), Vec2::new(30.0, -300.0));
        ball.advance(0.016, 800.0);
        assert_eq!(ball.object.pos.y, 0.0);
        assert_eq!(ball.object.vel, Vec2::new(30.0, 300.0));
    }

    #[test]
    fn test_corner_fires_both_checks() {
        let mut ball = free_ball(Vec2::new(1.0, 1.0), Vec2::new(-100.0, -100.0));
        ball.advance(0.05, 800.0);
        assert_eq!(ball.object.pos, Vec2::ZERO);
        assert_eq!(ball.object.vel, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_no_bottom_wall() {
        let mut ball = free_ball(Vec2::new(300.0, 590.0), Vec2::new(0.0, 300.0));
        ball.advance(0.1, 800.0);
        assert!(ball.object.pos.y > 600.0);
        assert_eq!(ball.object.vel.y, 300.0);
    }

    #[test]
    fn test_reset_sticks() {
        let mut ball = free_ball(Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0));
        ball.reset(Vec2::new(10.0, 20.0), Vec2::new(100.0, -350.0));
        assert!(ball.stuck);
        assert_eq!(ball.object.pos, Vec2::new(10.0, 20.0));
    }
}
