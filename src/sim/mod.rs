//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Stable iteration order (platforms and hazards in authored order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod countdown;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use actor::{Actor, Outcome};
pub use collision::{Landing, feet_in_platform, overlaps};
pub use countdown::{Countdown, CountdownTick, TimerToken};
pub use level::{LevelError, LevelFixture, LevelSet};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, Notice, Session};
pub use tick::{InputEvent, Key, apply_input, tick};
