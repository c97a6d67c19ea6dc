//! What the front-end draws each frame
//!
//! A plain snapshot: the front-end never reaches into the game itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Feedback, Game, GamePhase};

/// Ball color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorClass {
    /// Matches the live answer (green)
    Correct,
    /// Decoy (red)
    Decoy,
}

impl ColorClass {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorClass::Correct => "#4CAF50",
            ColorClass::Decoy => "#FF6B6B",
        }
    }
}

/// One ball as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    /// Top-left corner
    pub position: Vec2,
    pub label: String,
    pub color_class: ColorClass,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// "3 + 4 = ?"
    pub problem_text: String,
    pub objects: Vec<ObjectView>,
    /// Live left edge of the catcher
    pub catcher_position: f32,
    pub feedback: Vec<Feedback>,
}

impl RenderSnapshot {
    pub fn capture(game: &Game, now: f64, feedback: Vec<Feedback>) -> Self {
        let problem = game.problem();
        let objects = game
            .objects()
            .iter()
            .map(|o| ObjectView {
                position: o.position_at(now),
                label: o.value.to_string(),
                color_class: if o.is_correct(problem) {
                    ColorClass::Correct
                } else {
                    ColorClass::Decoy
                },
            })
            .collect();
        Self {
            phase: game.phase(),
            score: game.score(),
            lives: game.lives(),
            problem_text: problem.prompt(),
            objects,
            catcher_position: game.catcher().current_value(now),
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::persistence::MemoryStore;
    use crate::sim::StartMode;
    use std::rc::Rc;

    #[test]
    fn test_snapshot_reflects_game() {
        let mut game = Game::new(GameConfig::default(), Rc::new(MemoryStore::new()), 5);
        game.start(StartMode::Fresh, 0.0);
        let snapshot = game.frame(2500.0);

        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.problem_text, game.problem().prompt());
        assert_eq!(snapshot.catcher_position, 145.0);
        assert_eq!(snapshot.objects.len(), 1);

        let ball = &game.objects()[0];
        let view = &snapshot.objects[0];
        assert_eq!(view.label, ball.value.to_string());
        assert_eq!(view.position, ball.position_at(2500.0));
        let expected = if ball.value == game.problem().answer {
            ColorClass::Correct
        } else {
            ColorClass::Decoy
        };
        assert_eq!(view.color_class, expected);
    }
}
