//! Play-field geometry and timing
//!
//! Passed explicitly into the game at construction. Every field falls back
//! to the value in [`crate::consts`] when absent from a config file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a config was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be {requirement}")]
    Invalid {
        field: &'static str,
        requirement: &'static str,
    },
}

/// Geometry and timing for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play field width
    pub screen_width: f32,
    /// Play field height
    pub screen_height: f32,

    /// Ball diameter
    pub object_size: f32,
    /// Top of a freshly spawned ball
    pub spawn_y: f32,
    /// Distance from the bottom edge where the drop animation ends
    pub drop_target_offset: f32,
    /// Distance from the bottom edge of the floor threshold
    pub floor_offset: f32,

    /// Catcher width
    pub catcher_width: f32,
    /// Distance from the bottom edge of the catcher's head line
    pub head_offset: f32,
    /// Height of the catch band around the head line
    pub head_height: f32,
    /// Shift per move command
    pub catcher_step: f32,

    /// Spawn cadence (ms)
    pub spawn_period_ms: f64,
    /// Time for a ball to fall from spawn to its target (ms)
    pub drop_duration_ms: f64,
    /// Collision poll period (ms)
    pub collision_poll_ms: f64,

    /// Catcher spring parameters
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    pub spring_mass: f32,

    /// Starting lives
    pub max_lives: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            object_size: OBJECT_SIZE,
            spawn_y: SPAWN_Y,
            drop_target_offset: DROP_TARGET_OFFSET,
            floor_offset: FLOOR_OFFSET,

            catcher_width: CATCHER_WIDTH,
            head_offset: HEAD_OFFSET,
            head_height: HEAD_HEIGHT,
            catcher_step: CATCHER_STEP,

            spawn_period_ms: SPAWN_PERIOD_MS,
            drop_duration_ms: DROP_DURATION_MS,
            collision_poll_ms: COLLISION_POLL_MS,

            spring_stiffness: SPRING_STIFFNESS,
            spring_damping: SPRING_DAMPING,
            spring_mass: SPRING_MASS,

            max_lives: MAX_LIVES,
        }
    }
}

impl GameConfig {
    /// Where a ball's drop animation ends
    pub fn drop_target_y(&self) -> f32 {
        self.screen_height - self.drop_target_offset
    }

    /// Vertical position at which a ball counts as having hit the floor
    pub fn floor_y(&self) -> f32 {
        self.screen_height - self.floor_offset
    }

    /// Vertical position of the catcher's head line
    pub fn head_y(&self) -> f32 {
        self.screen_height - self.head_offset
    }

    /// Rightmost left edge for a ball
    pub fn max_object_x(&self) -> f32 {
        (self.screen_width - self.object_size).max(0.0)
    }

    /// Rightmost left edge for the catcher
    pub fn max_catcher_x(&self) -> f32 {
        (self.screen_width - self.catcher_width).max(0.0)
    }

    /// Catcher starts centered
    pub fn catcher_start_x(&self) -> f32 {
        (self.screen_width / 2.0 - self.catcher_width / 2.0).clamp(0.0, self.max_catcher_x())
    }

    /// Reject values the game loop can't run with
    ///
    /// Timer periods must be positive or a timer would re-arm at its own due
    /// time forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, requirement| Err(ConfigError::Invalid { field, requirement });
        let positive = [
            ("spawn_period_ms", self.spawn_period_ms),
            ("collision_poll_ms", self.collision_poll_ms),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "a positive number");
            }
        }
        if !(self.drop_duration_ms.is_finite() && self.drop_duration_ms >= 0.0) {
            return invalid("drop_duration_ms", "zero or more");
        }
        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("object_size", self.object_size),
            ("catcher_width", self.catcher_width),
            ("head_height", self.head_height),
            ("spring_stiffness", self.spring_stiffness),
            ("spring_mass", self.spring_mass),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "a positive number");
            }
        }
        let finite = [
            ("spawn_y", self.spawn_y),
            ("drop_target_offset", self.drop_target_offset),
            ("floor_offset", self.floor_offset),
            ("head_offset", self.head_offset),
            ("catcher_step", self.catcher_step),
            ("spring_damping", self.spring_damping),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return invalid(field, "a finite number");
            }
        }
        if self.spring_damping < 0.0 {
            return invalid("spring_damping", "zero or more");
        }
        if self.max_lives == 0 {
            return invalid("max_lives", "at least 1");
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it can't be read or parsed
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Bad game config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Can't read game config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
