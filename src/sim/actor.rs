//! The player-controlled actor
//!
//! One call to [`Actor::update`] is one frame of physics: gravity, floor,
//! lateral intent, platform landings, world clamp, then the goal / hazard /
//! pickup checks that produce the frame's [`Outcome`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{self, Landing};
use super::rect::Rect;
use crate::settings::WorldConfig;

/// The single caller-relevant result of one actor step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing the session needs to act on
    None,
    /// Actor reached the level goal
    Goal,
    /// Actor lost its last life
    GameOver,
    /// Actor touched the level pickup
    PowerUp,
}

/// Per-frame physics constants copied from the world config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Physics {
    gravity: f32,
    jump_speed: f32,
    move_speed: f32,
    world: Vec2,
    spawn: Vec2,
}

impl From<&WorldConfig> for Physics {
    fn from(config: &WorldConfig) -> Self {
        Self {
            gravity: config.gravity,
            jump_speed: config.jump_speed,
            move_speed: config.move_speed,
            world: Vec2::new(config.world_width, config.world_height),
            spawn: Vec2::new(config.spawn_x, config.spawn_y()),
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    /// Velocity (units/frame). Horizontal motion is intent-driven, so `vel.x`
    /// is carried but never integrated.
    pub vel: Vec2,
    pub size: Vec2,
    /// Never negative
    pub lives: u32,
    pub move_left: bool,
    pub move_right: bool,
    initial_lives: u32,
    physics: Physics,
}

impl Actor {
    pub fn new(config: &WorldConfig) -> Self {
        let physics = Physics::from(config);
        Self {
            pos: physics.spawn,
            vel: Vec2::ZERO,
            size: Vec2::new(config.actor_width, config.actor_height),
            lives: config.initial_lives,
            move_left: false,
            move_right: false,
            initial_lives: config.initial_lives,
            physics,
        }
    }

    /// Current bounding rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Spawn position (bottom left, standing on the floor)
    pub fn spawn_point(&self) -> Vec2 {
        self.physics.spawn
    }

    /// Grounded means vertical velocity is exactly zero
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.vel.y == 0.0
    }

    /// Start a jump if grounded. Returns true if the jump was applied.
    pub fn jump(&mut self) -> bool {
        if self.is_grounded() {
            self.vel.y = self.physics.jump_speed;
            true
        } else {
            false
        }
    }

    /// Back to spawn: position, vertical velocity and held intents
    pub fn respawn(&mut self) {
        self.pos = self.physics.spawn;
        self.vel.y = 0.0;
        self.move_left = false;
        self.move_right = false;
    }

    /// Refill lives (session start only)
    pub fn reset_lives(&mut self) {
        self.lives = self.initial_lives;
    }

    /// Remove one life, never going below zero. Returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Advance one frame against the active level's colliders
    pub fn update(
        &mut self,
        platforms: &[Rect],
        goal: &Rect,
        hazards: &[Rect],
        pickup: Option<&Rect>,
    ) -> Outcome {
        let Physics {
            gravity,
            move_speed,
            world,
            ..
        } = self.physics;

        // Gravity
        self.vel.y += gravity;
        self.pos.y += self.vel.y;

        // World floor
        if let Landing::Snap(y) = collision::resolve_floor(&self.rect(), world.y) {
            self.pos.y = y;
            self.vel.y = 0.0;
        }

        // Lateral intent (opposite intents cancel out)
        if self.move_left {
            self.pos.x -= move_speed;
        }
        if self.move_right {
            self.pos.x += move_speed;
        }

        // Platform tops, in order; the last contact wins
        for platform in platforms {
            if let Landing::Snap(y) = collision::resolve_platform(&self.rect(), platform) {
                self.pos.y = y;
                self.vel.y = 0.0;
            }
        }

        self.pos.x = collision::clamp_horizontal(self.pos.x, self.size.x, world.x);

        if collision::overlaps(&self.rect(), goal) {
            return Outcome::Goal;
        }

        // At most one hazard hit per frame
        if collision::first_overlap(&self.rect(), hazards).is_some() {
            if self.lose_life() == 0 {
                return Outcome::GameOver;
            }
            log::debug!("Hazard hit, {} lives left", self.lives);
            self.respawn();
        }

        if let Some(pickup) = pickup {
            if collision::overlaps(&self.rect(), pickup) {
                return Outcome::PowerUp;
            }
        }

        Outcome::None
    }
}
