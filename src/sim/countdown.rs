//! Level countdown with explicit arm/cancel
//!
//! The countdown is ticked by a periodic trigger that is scheduled
//! independently of the frame loop. Every arm hands out a fresh
//! [`TimerToken`]; a tick carrying any other token is stale and ignored, so a
//! trigger scheduled before a level load or a game over can never act on the
//! state that replaced it.

use serde::{Deserialize, Serialize};

/// Identifies one arming of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// Result of delivering one periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Token doesn't match the current arming (or the countdown is cancelled)
    Stale,
    /// Decremented, seconds remaining
    Running(i32),
    /// Decremented to zero or below
    Expired,
}

/// Seconds remaining on the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    initial: i32,
    remaining: i32,
    armed: Option<TimerToken>,
    next_token: u64,
}

impl Countdown {
    pub fn new(initial: i32) -> Self {
        Self {
            initial,
            remaining: initial,
            armed: None,
            next_token: 1,
        }
    }

    /// Seconds remaining (may be zero or negative right after expiry)
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Token of the current arming, `None` while cancelled
    pub fn armed(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Reseed to the initial value and arm with a fresh token
    pub fn rearm(&mut self) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.remaining = self.initial;
        self.armed = Some(token);
        token
    }

    /// Stop accepting ticks until the next [`Countdown::rearm`]
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Add bonus seconds
    pub fn extend(&mut self, secs: i32) {
        self.remaining += secs;
    }

    /// Deliver one periodic tick
    pub fn tick(&mut self, token: TimerToken) -> CountdownTick {
        if self.armed != Some(token) {
            return CountdownTick::Stale;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_ticks_are_stale() {
        let mut countdown = Countdown::new(30);
        assert_eq!(countdown.armed(), None);
        assert_eq!(countdown.tick(TimerToken(1)), CountdownTick::Stale);
        assert_eq!(countdown.remaining(), 30);
    }

    #[test]
    fn test_runs_down_to_expiry() {
        let mut countdown = Countdown::new(3);
        let token = countdown.rearm();
        assert_eq!(countdown.tick(token), CountdownTick::Running(2));
        assert_eq!(countdown.tick(token), CountdownTick::Running(1));
        assert_eq!(countdown.tick(token), CountdownTick::Expired);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_rearm_invalidates_old_token() {
        let mut countdown = Countdown::new(30);
        let old = countdown.rearm();
        countdown.tick(old);
        let new = countdown.rearm();
        assert_ne!(old, new);
        assert_eq!(countdown.remaining(), 30);
        assert_eq!(countdown.tick(old), CountdownTick::Stale);
        assert_eq!(countdown.tick(new), CountdownTick::Running(29));
    }

    #[test]
    fn test_cancel() {
        let mut countdown = Countdown::new(30);
        let token = countdown.rearm();
        countdown.cancel();
        assert_eq!(countdown.tick(token), CountdownTick::Stale);
        assert_eq!(countdown.remaining(), 30);
    }

    #[test]
    fn test_extend() {
        let mut countdown = Countdown::new(30);
        let token = countdown.rearm();
        countdown.extend(10);
        assert_eq!(countdown.tick(token), CountdownTick::Running(39));
    }
}
