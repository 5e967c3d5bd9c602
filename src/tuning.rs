//! Game balance values
//!
//! Defaults come from `consts`; a JSON file can override any subset of them.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LoadError;

/// Data-driven gameplay numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddle ===
    /// Paddle width/height in pixels
    pub paddle_size: Vec2,
    /// Paddle travel speed (pixels/s)
    pub paddle_speed: f32,
    /// Rebound angle multiplier for off-center paddle hits
    pub paddle_strength: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch velocity; its x component is also the base rebound speed
    pub ball_velocity: Vec2,

    // === Rules ===
    pub lives: u8,
    /// Share of the window height the brick grid occupies
    pub level_height_fraction: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_speed: PADDLE_SPEED,
            paddle_strength: PADDLE_STRENGTH,

            ball_radius: BALL_RADIUS,
            ball_velocity: crate::initial_ball_velocity(),

            lives: LIVES,
            level_height_fraction: LEVEL_HEIGHT_FRACTION,
        }
    }
}

impl Tuning {
    /// Parse tuning JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), LoadError> {
        let checks = [
            ("paddle_size.x", self.paddle_size.x, self.paddle_size.x > 0.0),
            ("paddle_size.y", self.paddle_size.y, self.paddle_size.y > 0.0),
            ("paddle_speed", self.paddle_speed, self.paddle_speed >= 0.0),
            ("ball_radius", self.ball_radius, self.ball_radius > 0.0),
            ("lives", self.lives as f32, self.lives > 0),
            (
                "level_height_fraction",
                self.level_height_fraction,
                self.level_height_fraction > 0.0 && self.level_height_fraction < 1.0,
            ),
        ];
        for (field, value, ok) in checks {
            // NaN fails every comparison above
            if !ok {
                return Err(LoadError::TuningRange { field, value });
            }
        }
        Ok(())
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Pixel height of the brick grid for a given arena height
    pub fn level_height(&self, arena_height: f32) -> f32 {
        arena_height * self.level_height_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.paddle_size, Vec2::new(100.0, 20.0));
        assert_eq!(tuning.ball_velocity, Vec2::new(100.0, -350.0));
        assert_eq!(tuning.paddle_strength, 2.0);
        assert_eq!(tuning.lives, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "paddle_speed": 650.0, "lives": 5 }"#).unwrap();
        assert_eq!(tuning.paddle_speed, 650.0);
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_bad_json_is_tuning_error() {
        let err = Tuning::from_json("{ paddle_speed: ").unwrap_err();
        assert!(matches!(err, LoadError::Tuning(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for (json, field) in [
            (r#"{ "lives": 0 }"#, "lives"),
            (r#"{ "ball_radius": 0.0 }"#, "ball_radius"),
            (r#"{ "ball_radius": -4.0 }"#, "ball_radius"),
            (r#"{ "level_height_fraction": 1.0 }"#, "level_height_fraction"),
            (r#"{ "level_height_fraction": 0.0 }"#, "level_height_fraction"),
            (r#"{ "paddle_size": [0.0, 20.0] }"#, "paddle_size.x"),
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(
                matches!(err, LoadError::TuningRange { field: f, .. } if f == field),
                "{}",
                json
            );
        }
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_level_height() {
        assert_eq!(Tuning::default().level_height(600.0), 300.0);
    }
}
