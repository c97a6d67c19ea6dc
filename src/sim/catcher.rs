//! Player-controlled catcher
//!
//! Moves in fixed steps along the bottom of the play field, easing toward
//! its target with a spring.

use serde::{Deserialize, Serialize};

use super::motion::{Spring, SpringParams};
use crate::config::GameConfig;

/// Move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Horizontal catcher state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    spring: Spring,
    step: f32,
    max_x: f32,
}

impl Catcher {
    /// Catcher centered at the bottom of the field, at rest
    pub fn new(config: &GameConfig) -> Self {
        let params = SpringParams {
            stiffness: config.spring_stiffness,
            damping: config.spring_damping,
            mass: config.spring_mass,
        };
        Self {
            spring: Spring::at_rest(config.catcher_start_x(), params),
            step: config.catcher_step,
            max_x: config.max_catcher_x(),
        }
    }

    /// Where the catcher is heading
    pub fn target(&self) -> f32 {
        self.spring.target()
    }

    /// Shift the target one step, clamped to the field, and start easing there
    pub fn move_toward(&mut self, direction: Direction, now: f64) {
        let delta = match direction {
            Direction::Left => -self.step,
            Direction::Right => self.step,
        };
        let target = (self.spring.target() + delta).clamp(0.0, self.max_x);
        self.spring.retarget(target, now);
    }

    /// Live, in-flight left edge (what collisions sample)
    pub fn current_value(&self, now: f64) -> f32 {
        self.spring.value_at(now).clamp(0.0, self.max_x)
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.spring.is_settled(now)
    }
}
