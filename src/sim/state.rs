//! Session state machine
//!
//! Ties actor outcomes and countdown expiry to life, level and phase
//! transitions:
//!
//! ```text
//! Menu --start--> Playing --(out of lives | last goal)--> GameOver --ack--> Menu
//!                   |  ^
//!                   +--+ goal (next level) / time up (same level)
//! ```

use serde::{Deserialize, Serialize};

use super::actor::{Actor, Outcome};
use super::countdown::{Countdown, CountdownTick, TimerToken};
use super::level::{LevelFixture, LevelSet};
use super::rect::Rect;
use crate::settings::WorldConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start`
    Menu,
    /// Simulation running
    Playing,
    /// Run ended; waiting for acknowledgement
    GameOver,
}

/// Why the run ended, shown to the player until acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Lost the last life (hazard or time up)
    OutOfLives,
    /// Reached the goal of the last level
    AllLevelsComplete,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::OutOfLives => "Game Over! You have lost all your lives.",
            Notice::AllLevelsComplete => "Congratulations! You have completed all levels!",
        }
    }
}

/// Notable things that happened, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    LevelLoaded { index: usize },
    LifeLost { lives: u32 },
    PickupCollected { time_remaining: i32 },
    TimeUp,
    Ended(Notice),
    ReturnedToMenu,
}

/// One play session: phase, progression, lives and countdown
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) config: WorldConfig,
    pub(super) levels: LevelSet,
    pub(super) phase: GamePhase,
    pub(super) level_index: usize,
    /// Live pickup slot for the current level attempt
    pub(super) pickup: Option<Rect>,
    pub(super) actor: Actor,
    pub(super) countdown: Countdown,
    pub(super) notice: Option<Notice>,
    pub(super) help_visible: bool,
    /// Frames simulated since the last start
    pub(super) frame: u64,
    pub(super) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session sitting in the menu
    pub fn new(config: WorldConfig, levels: LevelSet) -> Self {
        Self {
            actor: Actor::new(&config),
            countdown: Countdown::new(config.initial_time),
            config,
            levels,
            phase: GamePhase::Menu,
            level_index: 0,
            pickup: None,
            notice: None,
            help_visible: false,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Default config and the built-in levels
    pub fn builtin() -> Self {
        Self::new(WorldConfig::default(), LevelSet::builtin())
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Fixture of the active level
    pub fn level(&self) -> Option<&LevelFixture> {
        self.levels.get(self.level_index)
    }

    /// Pickup still available on the active level
    pub fn pickup(&self) -> Option<&Rect> {
        self.pickup.as_ref()
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    #[cfg(test)]
    pub(crate) fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    pub fn lives(&self) -> u32 {
        self.actor.lives
    }

    pub fn time_remaining(&self) -> i32 {
        self.countdown.remaining()
    }

    /// Token the countdown trigger must present; `None` when nothing should
    /// be scheduled
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.countdown.armed()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a new run from the first level. Only valid from the menu.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::warn!("start ignored in phase {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Playing;
        self.frame = 0;
        self.actor.reset_lives();
        self.actor.respawn();
        self.events.push(GameEvent::Started);
        log::info!("Session started with {} lives", self.actor.lives);
        self.load_level(0);
        true
    }

    /// Dismiss the end-of-run notice and return to the menu
    pub fn acknowledge_game_over(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.notice = None;
        self.phase = GamePhase::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
        log::info!("Returned to menu");
        true
    }

    /// Instructions panel; no effect on the simulation
    pub fn show_help(&mut self) {
        self.help_visible = true;
    }

    pub fn hide_help(&mut self) {
        self.help_visible = false;
    }

    /// Deliver one countdown tick. Stale tokens and ticks outside `Playing`
    /// are ignored.
    pub fn timer_tick(&mut self, token: TimerToken) -> bool {
        if self.phase != GamePhase::Playing {
            log::warn!("Countdown tick outside Playing ignored");
            return false;
        }
        match self.countdown.tick(token) {
            CountdownTick::Stale => {
                log::warn!("Stale countdown tick {:?} ignored", token);
                false
            }
            CountdownTick::Running(_) => true,
            CountdownTick::Expired => {
                self.events.push(GameEvent::TimeUp);
                let lives = self.actor.lose_life();
                self.events.push(GameEvent::LifeLost { lives });
                if lives > 0 {
                    log::info!("Time up on level {}, {} lives left", self.level_index, lives);
                    self.load_level(self.level_index);
                } else {
                    self.end(Notice::OutOfLives);
                }
                true
            }
        }
    }

    /// Apply one frame's actor outcome
    pub(super) fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::None => {}
            Outcome::Goal => {
                let next = self.level_index + 1;
                if next < self.levels.len() {
                    log::info!("Level {} complete", self.level_index);
                    self.load_level(next);
                } else {
                    self.end(Notice::AllLevelsComplete);
                }
            }
            Outcome::GameOver => self.end(Notice::OutOfLives),
            Outcome::PowerUp => {
                if self.pickup.take().is_some() {
                    self.countdown.extend(self.config.pickup_time_bonus);
                    let time_remaining = self.countdown.remaining();
                    self.events.push(GameEvent::PickupCollected { time_remaining });
                    log::debug!("Pickup collected, {}s remaining", time_remaining);
                }
            }
        }
    }

    /// Make `index` the active level: colliders, fresh pickup, actor at
    /// spawn, countdown reseeded and re-armed
    fn load_level(&mut self, index: usize) {
        let Some(level) = self.levels.get(index) else {
            log::error!("Level {} does not exist", index);
            return;
        };
        self.level_index = index;
        self.pickup = level.pickup;
        self.actor.respawn();
        self.countdown.rearm();
        self.events.push(GameEvent::LevelLoaded { index });
        log::info!("Loaded level {} of {}", index + 1, self.levels.len());
    }

    /// Leave `Playing` for `GameOver`, cancelling the countdown
    fn end(&mut self, notice: Notice) {
        self.phase = GamePhase::GameOver;
        self.countdown.cancel();
        self.notice = Some(notice);
        self.events.push(GameEvent::Ended(notice));
        log::info!("Game over: {}", notice.message());
    }
}
