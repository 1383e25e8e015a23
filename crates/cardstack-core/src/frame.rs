//! Frame clock and the start/stop lifecycle of the animation loop.

use crate::constants::MAX_FRAME_DT_SEC;

/// Timing handed to every scene update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped to [`MAX_FRAME_DT_SEC`].
    pub dt: f32,
    /// Sum of clamped `dt` since the loop started.
    pub elapsed: f32,
    /// Frames since the loop started, starting at 1.
    pub frame: u64,
}

/// Turns host timestamps (seconds) into clamped frame deltas.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Option<f64>,
    elapsed: f64,
    frame: u64,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT_SEC)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: None,
            elapsed: 0.0,
            frame: 0,
            max_dt: max_dt.max(0.0),
        }
    }

    /// The first tick after construction or [`FrameClock::reset`] has `dt == 0`.
    /// Timestamps that go backwards also yield `dt == 0`.
    pub fn tick(&mut self, now: f64) -> FrameTime {
        let dt = match self.last {
            Some(prev) if now.is_finite() => ((now - prev).max(0.0) as f32).min(self.max_dt),
            _ => 0.0,
        };
        if now.is_finite() {
            self.last = Some(now);
        }
        self.elapsed += dt as f64;
        self.frame += 1;
        FrameTime {
            dt,
            elapsed: self.elapsed as f32,
            frame: self.frame,
        }
    }

    /// Forget the previous timestamp so a resumed loop does not see the pause.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Explicit lifecycle for a self-rescheduling frame callback.
///
/// The host asks [`FrameLoop::tick`] each time its display callback fires;
/// callbacks that arrive while stopped get `None` and advance nothing.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    state: LoopState,
    clock: FrameClock,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self {
            state: LoopState::Stopped,
            clock: FrameClock::default(),
        }
    }
}

impl FrameLoop {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.clock.reset();
        self.state = LoopState::Running;
        log::debug!("[loop] started");
        true
    }

    /// Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Stopped;
        log::debug!("[loop] stopped at {:.2}s", self.clock.elapsed());
        true
    }

    pub fn tick(&mut self, now: f64) -> Option<FrameTime> {
        self.is_running().then(|| self.clock.tick(now))
    }
}
