//! Platform Dash - A single-screen platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `driver`: Cooperative frame loop + countdown scheduling
//! - `render`: Read-only frame view and renderer sinks
//! - `settings`: World constants fixed at construction

pub mod driver;
pub mod render;
pub mod settings;
pub mod sim;

pub use driver::{DriverStatus, FrameDriver};
pub use render::{FrameView, RenderSink};
pub use settings::{ConfigError, WorldConfig};

/// Game configuration constants (defaults for [`WorldConfig`])
pub mod consts {
    /// World (canvas) dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Actor size
    pub const ACTOR_WIDTH: f32 = 20.0;
    pub const ACTOR_HEIGHT: f32 = 30.0;
    /// Spawn x (bottom left, standing on the floor)
    pub const SPAWN_X: f32 = 100.0;

    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.8;
    /// Instantaneous vertical velocity applied on jump (negative = up)
    pub const JUMP_SPEED: f32 = -23.0;
    /// Horizontal distance per frame while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;

    /// Countdown tick interval
    pub const TIMER_INTERVAL_MS: u32 = 1000;
    /// Lives at session start
    pub const INITIAL_LIVES: u32 = 3;
    /// Countdown seconds at every level (re)load
    pub const INITIAL_TIME: i32 = 30;
    /// Seconds added when a pickup is collected
    pub const PICKUP_TIME_BONUS: i32 = 10;

    /// Display refresh interval used by the headless driver (60 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Goal size
    pub const GOAL_SIZE: f32 = 30.0;
    /// Hazard (spike) size
    pub const HAZARD_SIZE: f32 = 20.0;
    /// Pickup size
    pub const PICKUP_SIZE: f32 = 20.0;
}
