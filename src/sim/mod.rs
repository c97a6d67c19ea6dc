//! Mini-game simulation
//!
//! All gameplay logic lives here:
//! - Time passed in explicitly (milliseconds), never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (balls in spawn order)
//! - No rendering or platform dependencies

pub mod catcher;
pub mod collision;
pub mod game;
pub mod motion;
pub mod problem;
pub mod spawner;
pub mod state;
pub mod timers;

pub use catcher::{Catcher, Direction};
pub use collision::{CatchZone, Contact, Verdict, check_contact, judge};
pub use game::Game;
pub use motion::{Spring, SpringParams, Tween};
pub use problem::{Operator, Problem};
pub use state::{
    FallingObject, Feedback, GamePhase, GameSession, ObjectId, StartMode, POP_DURATION_MS,
    SHAKE_OFFSETS, SHAKE_STEP_MS,
};
pub use timers::{CancelToken, Scheduler, TimerKind};
