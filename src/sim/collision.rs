//! Ball contact tests and their scoring verdicts
//!
//! A ball is sampled against the floor first and the catcher's head second;
//! the first contact found wins.

use glam::Vec2;

use super::state::FallingObject;
use crate::config::GameConfig;

/// What a ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Reached the floor threshold
    Floor,
    /// Landed on the catcher's head
    Catch,
    /// Drop animation ran to completion without being intercepted
    Expired,
}

/// Effect of a contact on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Score +1 and a new problem
    Score,
    /// One life lost
    LoseLife,
    /// Ball removed, nothing else
    NoEffect,
}

/// The band around the catcher's head where balls are caught
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchZone {
    /// Center of the head line
    pub center: Vec2,
    /// Half extents (half catcher width, half head height)
    pub half_size: Vec2,
}

impl CatchZone {
    /// Zone for a catcher whose live left edge is `catcher_x`
    pub fn new(catcher_x: f32, config: &GameConfig) -> Self {
        Self {
            center: Vec2::new(catcher_x + config.catcher_width / 2.0, config.head_y()),
            half_size: Vec2::new(config.catcher_width / 2.0, config.head_height / 2.0),
        }
    }

    /// Strictly inside the band on both axes
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x < self.half_size.x && d.y < self.half_size.y
    }
}

/// Test one ball at `now`: floor before catch
pub fn check_contact(
    object: &FallingObject,
    now: f64,
    zone: &CatchZone,
    config: &GameConfig,
) -> Option<Contact> {
    if object.y_at(now) >= config.floor_y() {
        return Some(Contact::Floor);
    }
    if zone.contains(object.center_at(now, config)) {
        return Some(Contact::Catch);
    }
    None
}

/// Scoring rules
///
/// Catching the answer scores; catching a decoy costs a life. A correct ball
/// that gets away also costs a life, while a decoy that gets away is ignored.
pub fn judge(contact: Contact, correct: bool) -> Verdict {
    match (contact, correct) {
        (Contact::Catch, true) => Verdict::Score,
        (Contact::Catch, false) => Verdict::LoseLife,
        (Contact::Floor | Contact::Expired, true) => Verdict::LoseLife,
        (Contact::Floor | Contact::Expired, false) => Verdict::NoEffect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::Tween;
    use crate::sim::state::ObjectId;

    fn ball_at(x: f32, y: f32) -> FallingObject {
        FallingObject {
            id: ObjectId(1),
            value: 0,
            x,
            drop: Tween::new(y, y, 0.0, 4000.0),
        }
    }

    #[test]
    fn test_catch_zone_bounds() {
        let config = GameConfig::default();
        let zone = CatchZone::new(145.0, &config);
        assert_eq!(zone.center, Vec2::new(195.0, 664.0));
        assert!(zone.contains(Vec2::new(195.0, 664.0)));
        assert!(zone.contains(Vec2::new(146.0, 635.0)));
        // Edges are exclusive
        assert!(!zone.contains(Vec2::new(145.0, 664.0)));
        assert!(!zone.contains(Vec2::new(195.0, 634.0)));
    }

    #[test]
    fn test_ball_over_head_is_caught() {
        let config = GameConfig::default();
        let zone = CatchZone::new(145.0, &config);
        // Center (195, 664)
        let ball = ball_at(165.0, 634.0);
        assert_eq!(check_contact(&ball, 0.0, &zone, &config), Some(Contact::Catch));
    }

    #[test]
    fn test_ball_beside_catcher_is_missed() {
        let config = GameConfig::default();
        let zone = CatchZone::new(0.0, &config);
        let ball = ball_at(300.0, 634.0);
        assert_eq!(check_contact(&ball, 0.0, &zone, &config), None);
    }

    #[test]
    fn test_high_ball_is_not_caught() {
        let config = GameConfig::default();
        let zone = CatchZone::new(145.0, &config);
        let ball = ball_at(165.0, 300.0);
        assert_eq!(check_contact(&ball, 0.0, &zone, &config), None);
    }

    #[test]
    fn test_floor_wins_over_catch() {
        let config = GameConfig {
            floor_offset: 200.0,
            ..GameConfig::default()
        };
        // Floor at 644; ball top at 650 is both past the floor and over the head
        let zone = CatchZone::new(145.0, &config);
        let ball = ball_at(165.0, 650.0);
        assert!(zone.contains(ball.center_at(0.0, &config)));
        assert_eq!(check_contact(&ball, 0.0, &zone, &config), Some(Contact::Floor));
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(judge(Contact::Catch, true), Verdict::Score);
        assert_eq!(judge(Contact::Catch, false), Verdict::LoseLife);
        assert_eq!(judge(Contact::Floor, true), Verdict::LoseLife);
        assert_eq!(judge(Contact::Floor, false), Verdict::NoEffect);
        assert_eq!(judge(Contact::Expired, true), Verdict::LoseLife);
        assert_eq!(judge(Contact::Expired, false), Verdict::NoEffect);
    }
}
