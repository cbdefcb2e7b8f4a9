//! Frame driver: turns host timestamps into draw/update passes.
//!
//! Each running tick draws the state left by the previous pass, then
//! advances it.  After game over the driver idles, only tracking timestamps
//! so the first tick after a restart sees a small delta instead of the whole
//! idle period.

use rand::Rng;

use crate::audio::Sfx;
use crate::entities::Intents;
use crate::session::Session;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing simulated; only the timestamp was recorded.
    Idle,
    Advanced,
    /// This tick ended the game and the driver went idle.
    Finished,
}

#[derive(Clone, Debug)]
pub struct Driver {
    phase: Phase,
    last_timestamp: f64,
    last_delta: f32,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Driver {
            phase: Phase::Idle,
            last_timestamp: 0.0,
            last_delta: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Delta handed to the last update pass.
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// First pass of a fresh world: draw, then update with a zero delta so
    /// every entity has render state but no timer has moved.
    pub fn prime<R: Rng>(&mut self, session: &mut Session<R>, surface: &mut dyn Surface) {
        surface.clear();
        session.world().draw(surface);
        session.update(0.0, &Intents::default());
        self.last_delta = 0.0;
    }

    /// Start button.  Resumes a paused session, or restarts a finished one
    /// before resuming.  Does nothing while already running.
    pub fn start<R: Rng>(&mut self, session: &mut Session<R>, surface: &mut dyn Surface) {
        if self.phase == Phase::Running {
            return;
        }
        if session.is_over() {
            session.restart();
            self.prime(session, surface);
        }
        self.phase = Phase::Running;
    }

    /// Handle one host frame at absolute time `timestamp` (milliseconds).
    pub fn frame<R: Rng>(
        &mut self,
        timestamp: f64,
        session: &mut Session<R>,
        intents: &Intents,
        surface: &mut dyn Surface,
        sfx: &mut dyn Sfx,
    ) -> FrameOutcome {
        let delta = (timestamp - self.last_timestamp).max(0.0) as f32;
        self.last_timestamp = timestamp;

        if self.phase == Phase::Idle {
            return FrameOutcome::Idle;
        }

        surface.clear();
        session.world().draw(surface);
        session.update(delta, intents);
        self.last_delta = delta;

        for sound in session.world_mut().take_sounds() {
            sfx.play(sound);
        }

        if session.is_over() {
            surface.clear();
            session.world().draw(surface);
            self.phase = Phase::Idle;
            return FrameOutcome::Finished;
        }
        FrameOutcome::Advanced
    }
}
