//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::Tween;
use super::problem::Problem;
use crate::config::GameConfig;

/// Current phase of the mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session yet, or torn down after exit
    NotStarted,
    /// Balls are falling
    Running,
    /// Lives ran out; waiting for retry or exit
    GameOver,
}

/// How to begin a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Score 0, full lives
    Fresh,
    /// Score and lives from the saved snapshot
    Resume,
}

/// Unique ball id within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// A ball falling across the play field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: ObjectId,
    /// Number printed on the ball
    pub value: i32,
    /// Left edge
    pub x: f32,
    /// Vertical motion (top edge over time)
    pub drop: Tween,
}

impl FallingObject {
    /// Top edge at `now`
    pub fn y_at(&self, now: f64) -> f32 {
        self.drop.value_at(now)
    }

    /// Top-left corner at `now`
    pub fn position_at(&self, now: f64) -> Vec2 {
        Vec2::new(self.x, self.y_at(now))
    }

    /// Center point at `now`
    pub fn center_at(&self, now: f64, config: &GameConfig) -> Vec2 {
        self.position_at(now) + Vec2::splat(config.object_size / 2.0)
    }

    /// Whether this ball answers the given problem
    pub fn is_correct(&self, problem: &Problem) -> bool {
        self.value == problem.answer
    }
}

/// Score, lives and the live problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u32,
    pub lives: u8,
    pub problem: Problem,
}

impl GameSession {
    pub fn new(score: u32, lives: u8, problem: Problem) -> Self {
        Self {
            score,
            lives,
            problem,
        }
    }

    /// Take one life; returns true when this was the last one
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

/// Visual feedback emitted by the game, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Feedback {
    /// Correct catch: pop effect at the ball's top-left corner
    Pop { position: Vec2 },
    /// Screen shake after a penalty
    Shake,
    /// A life was taken
    LifeLost { lives: u8 },
    /// A new problem replaced the solved one
    NewProblem,
    /// Lives ran out
    GameOver { final_score: u32 },
}

/// Pop animation length (ms)
pub const POP_DURATION_MS: f64 = 300.0;
/// Shake animation: offset sequence, each step held for `SHAKE_STEP_MS`
pub const SHAKE_OFFSETS: [f32; 4] = [10.0, -10.0, 10.0, 0.0];
pub const SHAKE_STEP_MS: f64 = 100.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::problem::Operator;

    #[test]
    fn test_lose_life_saturates() {
        let mut session = GameSession::new(0, 2, Problem::new(1, Operator::Add, 1));
        assert!(!session.lose_life());
        assert!(session.lose_life());
        assert!(session.lose_life());
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_object_geometry() {
        let config = GameConfig::default();
        let ball = FallingObject {
            id: ObjectId(1),
            value: 4,
            x: 100.0,
            drop: Tween::new(0.0, 400.0, 0.0, 4000.0),
        };
        assert_eq!(ball.position_at(1000.0), Vec2::new(100.0, 100.0));
        assert_eq!(ball.center_at(1000.0, &config), Vec2::new(130.0, 130.0));
        assert!(ball.is_correct(&Problem::new(2, Operator::Mul, 2)));
        assert!(!ball.is_correct(&Problem::new(2, Operator::Add, 3)));
    }
}
