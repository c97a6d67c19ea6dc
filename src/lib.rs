//! Math Catcher - a learning game about catching the right answer
//!
//! Core modules:
//! - `sim`: Game loop (problems, falling balls, catcher, collisions, state machine)
//! - `persistence`: Key-value storage and the saved progress snapshot
//! - `heroes`: Hero builder, built-in characters and the custom hero roster
//! - `settings`: Theme preference and palettes
//! - `config`: Play-field geometry and timing
//! - `navigation`: Screen stack with delayed replacement
//! - `view`: Per-frame render snapshot

pub mod config;
pub mod heroes;
pub mod navigation;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod view;

pub use config::{ConfigError, GameConfig};
pub use settings::{Settings, Theme, ThemeMode};

/// Game configuration constants
pub mod consts {
    /// Play field size (portrait phone)
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 844.0;

    /// Maximum (and starting) lives
    pub const MAX_LIVES: u8 = 3;

    /// Ball diameter
    pub const OBJECT_SIZE: f32 = 60.0;
    /// Balls start above the visible field
    pub const SPAWN_Y: f32 = -60.0;
    /// Drop tween ends this far above the bottom edge
    pub const DROP_TARGET_OFFSET: f32 = 180.0;
    /// Floor threshold distance from the bottom edge
    pub const FLOOR_OFFSET: f32 = 100.0;

    /// Catcher (hero) box
    pub const CATCHER_WIDTH: f32 = 100.0;
    pub const HEAD_OFFSET: f32 = 180.0;
    pub const HEAD_HEIGHT: f32 = 60.0;
    /// Horizontal shift per move command
    pub const CATCHER_STEP: f32 = 50.0;

    /// Timer periods (milliseconds)
    pub const SPAWN_PERIOD_MS: f64 = 2000.0;
    pub const DROP_DURATION_MS: f64 = 4000.0;
    pub const COLLISION_POLL_MS: f64 = 16.0;

    /// Catcher spring (friction 7, tension 40 in origami units)
    pub const SPRING_STIFFNESS: f32 = 230.2;
    pub const SPRING_DAMPING: f32 = 22.0;
    pub const SPRING_MASS: f32 = 1.0;

    /// Delay before the splash and "get ready" screens move on
    pub const SCREEN_ADVANCE_MS: f64 = 2000.0;
    /// Delay between tapping a character and the "get ready" screen
    pub const SELECT_DELAY_MS: f64 = 200.0;
}
