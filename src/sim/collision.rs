//! Collision detection and response
//!
//! Bricks and the paddle are axis-aligned boxes; the ball is a circle. A plain
//! overlap test can't tell which face of a box the ball struck, so every hit is
//! classified into one of four compass directions and the response flips and
//! corrects exactly one axis.

use glam::Vec2;

use super::entity::{Ball, GameObject};

/// Compass direction of an impact, in the simulation's coordinate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Scan order; earlier entries win ties
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a ball-vs-box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub hit: bool,
    pub direction: Direction,
    /// Closest point on the box minus the ball center
    pub difference: Vec2,
}

impl Collision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            direction: Direction::Up,
            difference: Vec2::ZERO,
        }
    }
}

/// Classify a vector by the compass direction it points closest to.
///
/// A direction only wins with a strictly positive dot product, so the zero
/// vector falls through to `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    let target = target.normalize_or_zero();
    let mut max = 0.0;
    let mut best = Direction::Up;
    for dir in Direction::ALL {
        let dot = target.dot(dir.unit());
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}

/// Box-vs-box overlap (touching edges count)
pub fn check_collision(a: &GameObject, b: &GameObject) -> bool {
    let x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    x && y
}

/// Circle-vs-box test
pub fn check_ball_collision(ball: &Ball, other: &GameObject) -> Collision {
    let center = ball.center();

    let half = other.half_extents();
    let box_center = other.center();

    // Closest point on the box to the circle center
    let clamped = (center - box_center).clamp(-half, half);
    let closest = box_center + clamped;

    let difference = closest - center;
    if difference.length() < ball.radius() {
        Collision {
            hit: true,
            direction: vector_direction(difference),
            difference,
        }
    } else {
        Collision::miss()
    }
}

/// Reflect off a brick and push the ball back out along one axis
pub fn resolve_brick_collision(ball: &mut Ball, collision: &Collision) {
    let radius = ball.radius();
    let obj = &mut ball.object;
    match collision.direction {
        Direction::Left | Direction::Right => {
            obj.vel.x = -obj.vel.x;
            let penetration = radius - collision.difference.x.abs();
            if collision.direction == Direction::Left {
                obj.pos.x += penetration;
            } else {
                obj.pos.x -= penetration;
            }
        }
        Direction::Up | Direction::Down => {
            obj.vel.y = -obj.vel.y;
            let penetration = radius - collision.difference.y.abs();
            if collision.direction == Direction::Up {
                obj.pos.y -= penetration;
            } else {
                obj.pos.y += penetration;
            }
        }
    }
}

/// Send the ball back up off the paddle.
///
/// Where the ball lands relative to the paddle center sets the horizontal
/// component; the result is rescaled to the incoming speed.
pub fn paddle_rebound(ball: &mut Ball, paddle: &GameObject, base_speed_x: f32, strength: f32) {
    let paddle_center = paddle.pos.x + paddle.size.x / 2.0;
    let distance = ball.center().x - paddle_center;
    let percentage = distance / (paddle.size.x / 2.0);

    let old_vel = ball.object.vel;
    let speed = old_vel.length();
    let redirected = Vec2::new(base_speed_x * percentage * strength, -old_vel.y.abs());

    let dir = redirected.try_normalize().unwrap_or(Vec2::new(0.0, -1.0));
    ball.object.vel = dir * speed;
}
