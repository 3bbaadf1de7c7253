//! Frame driver
//!
//! Cooperative single-threaded scheduler for the two callbacks that touch
//! the session: the per-frame step (display refresh) and the countdown tick
//! (fixed real-time interval). Both run on one virtual clock, one at a time,
//! in timestamp order; frames go first on ties.
//!
//! The frame loop only reschedules itself while the session is `Playing`;
//! once it stops it must be restarted through [`FrameDriver::start`]. The
//! countdown schedule follows the session's armed [`TimerToken`]: a new
//! token restarts the interval, no token cancels it.

use crate::render::{FrameView, RenderSink};
use crate::settings::WorldConfig;
use crate::sim::{InputEvent, Outcome, Session, TimerToken, apply_input, tick};

/// Source of input intents, polled once per frame
pub trait InputSource {
    fn poll(&mut self, session: &Session) -> Vec<InputEvent>;
}

impl<F> InputSource for F
where
    F: FnMut(&Session) -> Vec<InputEvent>,
{
    fn poll(&mut self, session: &Session) -> Vec<InputEvent> {
        self(session)
    }
}

/// Input source that never presses anything
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _session: &Session) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Whether the frame loop is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    /// A frame is pending
    Running,
    /// Loop terminated (or never started)
    Stopped,
}

/// Which callback ran in a [`FrameDriver::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    Frame(Outcome),
    Countdown,
    /// Nothing was scheduled
    Idle,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    token: TimerToken,
    next_fire_ms: f64,
}

/// Virtual-clock frame + countdown scheduler
#[derive(Debug)]
pub struct FrameDriver {
    frame_interval_ms: f64,
    timer_interval_ms: f64,
    now_ms: f64,
    next_frame_ms: Option<f64>,
    timer: Option<ScheduledTimer>,
    frames_run: u64,
}

impl FrameDriver {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            frame_interval_ms: config.frame_interval_ms,
            timer_interval_ms: config.timer_interval_ms as f64,
            now_ms: 0.0,
            next_frame_ms: None,
            timer: None,
            frames_run: 0,
        }
    }

    /// Virtual time (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn status(&self) -> DriverStatus {
        if self.next_frame_ms.is_some() {
            DriverStatus::Running
        } else {
            DriverStatus::Stopped
        }
    }

    /// True while a countdown tick is scheduled
    pub fn timer_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    /// Start the session and (re)start the frame loop
    pub fn start(&mut self, session: &mut Session) -> bool {
        if !session.start() {
            return false;
        }
        self.next_frame_ms = Some(self.now_ms);
        self.sync_timer(session);
        log::debug!("Frame loop started at {:.1}ms", self.now_ms);
        true
    }

    /// Dismiss the end-of-run notice
    pub fn acknowledge(&mut self, session: &mut Session) -> bool {
        let acknowledged = session.acknowledge_game_over();
        self.sync_timer(session);
        acknowledged
    }

    /// Run the earliest pending callback
    pub fn step(
        &mut self,
        session: &mut Session,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Callback {
        let frame_due = self.next_frame_ms;
        let timer_due = self.timer.map(|t| t.next_fire_ms);

        let run_frame = match (frame_due, timer_due) {
            (None, None) => return Callback::Idle,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(f), Some(t)) => f <= t,
        };

        if run_frame {
            if let Some(at) = frame_due {
                self.now_ms = self.now_ms.max(at);
            }
            Callback::Frame(self.run_frame(session, input, sink))
        } else {
            if let Some(at) = timer_due {
                self.now_ms = self.now_ms.max(at);
            }
            self.run_countdown(session);
            Callback::Countdown
        }
    }

    /// Run callbacks until virtual time passes `deadline_ms` or nothing is
    /// scheduled
    pub fn run_until(
        &mut self,
        session: &mut Session,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
        deadline_ms: f64,
    ) -> DriverStatus {
        while let Some(next) = self.next_due() {
            if next > deadline_ms {
                break;
            }
            self.step(session, input, sink);
        }
        self.now_ms = self.now_ms.max(deadline_ms);
        self.status()
    }

    fn next_due(&self) -> Option<f64> {
        match (self.next_frame_ms, self.timer.map(|t| t.next_fire_ms)) {
            (Some(f), Some(t)) => Some(f.min(t)),
            (f, t) => f.or(t),
        }
    }

    fn run_frame(
        &mut self,
        session: &mut Session,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Outcome {
        if !session.is_playing() {
            self.next_frame_ms = None;
            self.sync_timer(session);
            return Outcome::None;
        }

        for event in input.poll(session) {
            apply_input(session, event);
        }
        let outcome = tick(session);
        self.frames_run += 1;

        if let Some(view) = FrameView::capture(session) {
            sink.draw(&view);
        }

        self.next_frame_ms = if session.is_playing() {
            Some(self.now_ms + self.frame_interval_ms)
        } else {
            log::debug!("Frame loop halted at {:.1}ms", self.now_ms);
            None
        };
        self.sync_timer(session);
        outcome
    }

    fn run_countdown(&mut self, session: &mut Session) {
        let Some(scheduled) = self.timer else {
            return;
        };
        session.timer_tick(scheduled.token);
        self.timer = Some(ScheduledTimer {
            token: scheduled.token,
            next_fire_ms: self.now_ms + self.timer_interval_ms,
        });
        self.sync_timer(session);
        if !session.is_playing() {
            self.next_frame_ms = None;
        }
    }

    /// Follow the session's armed token: keep, restart or cancel the interval
    fn sync_timer(&mut self, session: &Session) {
        self.timer = match (session.timer_token(), self.timer) {
            (Some(token), Some(current)) if current.token == token => Some(current),
            (Some(token), _) => Some(ScheduledTimer {
                token,
                next_fire_ms: self.now_ms + self.timer_interval_ms,
            }),
            (None, _) => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{AsciiCanvas, NullSink};
    use crate::sim::{GamePhase, Key, Notice};

    fn setup() -> (FrameDriver, Session) {
        let session = Session::builtin();
        let driver = FrameDriver::new(session.config());
        (driver, session)
    }

    #[test]
    fn test_not_started_is_idle() {
        let (mut driver, mut session) = setup();
        assert_eq!(driver.status(), DriverStatus::Stopped);
        assert_eq!(
            driver.step(&mut session, &mut NoInput, &mut NullSink),
            Callback::Idle
        );
    }

    #[test]
    fn test_frames_and_countdown_interleave() {
        let (mut driver, mut session) = setup();
        assert!(driver.start(&mut session));
        assert!(driver.timer_scheduled());

        let status = driver.run_until(&mut session, &mut NoInput, &mut NullSink, 1010.0);
        assert_eq!(status, DriverStatus::Running);
        assert_eq!(session.time_remaining(), 29);
        // 60 Hz over ~one second, counting the frame at t=0
        assert_eq!(driver.frames_run(), 61);
    }

    #[test]
    fn test_sink_receives_every_frame() {
        let (mut driver, mut session) = setup();
        driver.start(&mut session);
        let mut canvas = AsciiCanvas::new(40, 30);
        driver.run_until(&mut session, &mut NoInput, &mut canvas, 500.0);
        assert_eq!(canvas.frames_drawn(), driver.frames_run());
        assert!(canvas.last_frame().starts_with("Lives: 3  Time: 30"));
    }

    #[test]
    fn test_idle_player_times_out_until_game_over() {
        let (mut driver, mut session) = setup();
        driver.start(&mut session);

        // First timeout after 30s: one life lost, same level reloaded
        driver.run_until(&mut session, &mut NoInput, &mut NullSink, 30_000.0);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.time_remaining(), 30);

        driver.run_until(&mut session, &mut NoInput, &mut NullSink, 120_000.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.notice(), Some(Notice::OutOfLives));
        assert_eq!(session.lives(), 0);
        assert_eq!(driver.status(), DriverStatus::Stopped);
        assert!(!driver.timer_scheduled());

        // Nothing left to run
        let frames = driver.frames_run();
        assert_eq!(
            driver.step(&mut session, &mut NoInput, &mut NullSink),
            Callback::Idle
        );
        assert_eq!(driver.frames_run(), frames);
    }

    #[test]
    fn test_restart_after_acknowledge() {
        let (mut driver, mut session) = setup();
        driver.start(&mut session);
        driver.run_until(&mut session, &mut NoInput, &mut NullSink, 100_000.0);
        assert_eq!(session.phase(), GamePhase::GameOver);

        // Loop does not resume on its own
        assert!(!driver.start(&mut session));
        assert!(driver.acknowledge(&mut session));
        assert_eq!(driver.status(), DriverStatus::Stopped);

        assert!(driver.start(&mut session));
        assert_eq!(driver.status(), DriverStatus::Running);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.time_remaining(), 30);
    }

    #[test]
    fn test_level_load_restarts_countdown_interval() {
        let (mut driver, mut session) = setup();
        driver.start(&mut session);
        driver.run_until(&mut session, &mut NoInput, &mut NullSink, 1500.0);
        assert_eq!(session.time_remaining(), 29);

        // Drop the actor onto the goal; the next frame loads level 2
        session.actor_mut().pos = glam::Vec2::new(705.0, 340.0);
        driver.step(&mut session, &mut NoInput, &mut NullSink);
        assert_eq!(session.level_index(), 1);
        let loaded_at = driver.now_ms();

        // The old interval would have fired at 2000ms; the new one fires a
        // full interval after the load
        driver.run_until(&mut session, &mut NoInput, &mut NullSink, loaded_at + 999.0);
        assert_eq!(session.time_remaining(), 30);
        driver.run_until(&mut session, &mut NoInput, &mut NullSink, loaded_at + 1000.0);
        assert_eq!(session.time_remaining(), 29);
    }

    #[test]
    fn test_closure_input_source() {
        let (mut driver, mut session) = setup();
        driver.start(&mut session);
        let mut hold_right = |_: &Session| vec![InputEvent::Pressed(Key::Right)];
        driver.run_until(&mut session, &mut hold_right, &mut NullSink, 100.0);
        assert!(session.actor().pos.x > 100.0);
    }
}
