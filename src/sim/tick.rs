//! Per-frame simulation step
//!
//! Core game loop step: apply input intents, advance the actor one frame
//! against the active level, then feed the outcome to the session.

use serde::{Deserialize, Serialize};

use super::actor::Outcome;
use super::state::{GameEvent, Session};

/// Abstract input keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
}

/// Press/release of an input key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// Apply an input event to the actor's intents
///
/// Ignored outside `Playing`. Jump is an edge: it fires on press, and only
/// while the actor is grounded.
pub fn apply_input(session: &mut Session, event: InputEvent) {
    if !session.is_playing() {
        return;
    }
    let actor = &mut session.actor;
    match event {
        InputEvent::Pressed(Key::Left) => actor.move_left = true,
        InputEvent::Pressed(Key::Right) => actor.move_right = true,
        InputEvent::Pressed(Key::Jump) => {
            actor.jump();
        }
        InputEvent::Released(Key::Left) => actor.move_left = false,
        InputEvent::Released(Key::Right) => actor.move_right = false,
        InputEvent::Released(Key::Jump) => {}
    }
}

/// Advance the session by one frame
///
/// Returns the actor outcome that drove this frame's transition. Outside
/// `Playing` nothing moves and the outcome is `None`.
pub fn tick(session: &mut Session) -> Outcome {
    if !session.is_playing() {
        return Outcome::None;
    }
    let Some(level) = session.levels.get(session.level_index) else {
        log::error!("Active level {} missing", session.level_index);
        return Outcome::None;
    };

    session.frame += 1;
    let lives_before = session.actor.lives;
    let outcome = session.actor.update(
        &level.platforms,
        &level.goal,
        &level.hazards,
        session.pickup.as_ref(),
    );
    if session.actor.lives < lives_before {
        let lives = session.actor.lives;
        session.events.push(GameEvent::LifeLost { lives });
    }

    session.apply_outcome(outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Notice};
    use glam::Vec2;

    fn playing() -> Session {
        let mut session = Session::builtin();
        session.start();
        session.drain_events();
        session
    }

    #[test]
    fn test_tick_outside_playing_is_inert() {
        let mut session = Session::builtin();
        let before = session.actor().pos;
        assert_eq!(tick(&mut session), Outcome::None);
        assert_eq!(session.actor().pos, before);
        assert_eq!(session.frame(), 0);
    }

    #[test]
    fn test_input_moves_actor() {
        let mut session = playing();
        apply_input(&mut session, InputEvent::Pressed(Key::Right));
        tick(&mut session);
        tick(&mut session);
        assert_eq!(session.actor().pos.x, 110.0);

        apply_input(&mut session, InputEvent::Released(Key::Right));
        tick(&mut session);
        assert_eq!(session.actor().pos.x, 110.0);
        assert_eq!(session.frame(), 3);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut session = playing();
        apply_input(&mut session, InputEvent::Pressed(Key::Jump));
        assert_eq!(session.actor().vel.y, -23.0);
        tick(&mut session);
        apply_input(&mut session, InputEvent::Pressed(Key::Jump));
        assert!(session.actor().vel.y > -23.0, "mid-air jump ignored");
    }

    #[test]
    fn test_input_ignored_in_menu() {
        let mut session = Session::builtin();
        apply_input(&mut session, InputEvent::Pressed(Key::Left));
        assert!(!session.actor().move_left);
    }

    #[test]
    fn test_hazard_hit_through_tick() {
        let mut session = playing();
        // Level 1 spike at (250, 380); place the actor on it
        session.actor.pos = Vec2::new(250.0, 370.0);
        session.actor.vel.y = 0.0;

        assert_eq!(tick(&mut session), Outcome::None);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.actor().pos, Vec2::new(100.0, 570.0));
        assert_eq!(session.drain_events(), vec![GameEvent::LifeLost { lives: 2 }]);
    }

    #[test]
    fn test_last_life_hazard_ends_run() {
        let mut session = playing();
        session.actor.lives = 1;
        session.actor.pos = Vec2::new(250.0, 370.0);

        assert_eq!(tick(&mut session), Outcome::GameOver);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.notice(), Some(Notice::OutOfLives));
        assert_eq!(session.lives(), 0);
        // Position left where the hit happened (landed on the platform top)
        assert_eq!(session.actor().pos, Vec2::new(250.0, 370.0));
        assert_eq!(session.timer_token(), None);
    }

    #[test]
    fn test_pickup_through_tick() {
        let mut session = playing();
        // Level 1 pickup at (350, 380), resting on the first platform
        session.actor.pos = Vec2::new(345.0, 370.0);

        assert_eq!(tick(&mut session), Outcome::PowerUp);
        assert_eq!(session.time_remaining(), 40);
        assert!(session.pickup().is_none());

        // Standing in the same spot again: nothing left to collect
        assert_eq!(tick(&mut session), Outcome::None);
        assert_eq!(session.time_remaining(), 40);
    }

    #[test]
    fn test_goal_through_tick() {
        let mut session = playing();
        // Level 1 goal at (700, 350)
        session.actor.pos = Vec2::new(705.0, 340.0);

        assert_eq!(tick(&mut session), Outcome::Goal);
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.actor().pos, Vec2::new(100.0, 570.0));
    }
}
