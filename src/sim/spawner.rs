//! Falling ball creation
//!
//! Each spawn draws a correct answer and two decoys, shuffles them and drops
//! a single ball carrying the first one.

use rand::Rng;
use rand::seq::SliceRandom;

use super::motion::Tween;
use super::problem::Problem;
use super::state::{FallingObject, ObjectId};
use crate::config::GameConfig;

/// Largest distance between a decoy and the answer
pub const MAX_DECOY_OFFSET: i32 = 5;

/// Answer plus one decoy above and one below, shuffled
pub fn candidates<R: Rng + ?Sized>(rng: &mut R, answer: i32) -> [i32; 3] {
    let mut values = [
        answer,
        answer + rng.random_range(1..=MAX_DECOY_OFFSET),
        answer - rng.random_range(1..=MAX_DECOY_OFFSET),
    ];
    values.shuffle(rng);
    values
}

/// Create a ball for `problem` starting its drop at `now`
pub fn spawn<R: Rng + ?Sized>(
    rng: &mut R,
    problem: &Problem,
    id: ObjectId,
    now: f64,
    config: &GameConfig,
) -> FallingObject {
    let value = candidates(rng, problem.answer)[0];
    let max_x = config.max_object_x();
    let x = if max_x > 0.0 {
        rng.random_range(0.0..max_x)
    } else {
        0.0
    };
    let drop = Tween::new(
        config.spawn_y,
        config.drop_target_y(),
        now,
        config.drop_duration_ms,
    );
    FallingObject { id, value, x, drop }
}
