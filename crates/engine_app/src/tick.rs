//! Fixed-timestep game loop state and frame pacing.
//!
//! One loop iteration is:
//!
//! 1. Poll input and turn it into loop controls and queued events.
//! 2. Process the event queue.
//! 3. Update every system with the elapsed time (skipped while paused).
//! 4. Render.
//! 5. Flush deferred entity destruction.
//! 6. Sleep for whatever is left of the frame budget.
//!
//! The iteration itself is driven by [`Engine::step`](crate::Engine::step);
//! this module owns the pieces that carry state between iterations.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Source of monotonic time and the loop's only suspension point.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Block the loop thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven time for deterministic tests and headless runs.
///
/// Clones share the same timeline. Sleeping advances the clock instead of
/// blocking.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    slept: Rc<Cell<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Total time spent in [`Clock::sleep`].
    #[must_use]
    pub fn slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
        self.slept.set(self.slept.get() + duration);
    }
}

/// Tracks frame timing against a fixed target frame duration.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Duration,
    /// Timestamp passed to the previous [`delta`](Self::delta) call.
    previous: Option<Duration>,
}

impl FramePacer {
    #[must_use]
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            previous: None,
        }
    }

    /// The per-frame budget.
    #[must_use]
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Seconds since the previous call, or `0.0` on the first frame.
    pub fn delta(&mut self, now: Duration) -> f64 {
        let dt = self
            .previous
            .map_or(0.0, |previous| now.saturating_sub(previous).as_secs_f64());
        self.previous = Some(now);
        dt
    }

    /// Time left in the budget after a frame that took `elapsed`. Never
    /// negative: a late frame gets no wait and no catch-up.
    #[must_use]
    pub fn wait_time(&self, elapsed: Duration) -> Duration {
        self.target.saturating_sub(elapsed)
    }

    /// Sleep out the rest of a frame that started at `frame_start`.
    ///
    /// Returns the time slept.
    pub fn pace(&self, clock: &dyn Clock, frame_start: Duration, frame: u64) -> Duration {
        let elapsed = clock.now().saturating_sub(frame_start);
        let wait = self.wait_time(elapsed);
        if wait.is_zero() {
            if elapsed > self.target {
                warn!(
                    frame,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = self.target.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        } else {
            clock.sleep(wait);
        }
        wait
    }
}

/// Whether the loop keeps iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal.
    Stopped,
}

/// Flags and counters carried from one iteration to the next.
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: LoopState,
    paused: bool,
    debug: bool,
    frames: u64,
    max_frames: u64,
    pacer: FramePacer,
}

impl GameLoop {
    /// A running loop targeting `frame_duration` per frame. `max_frames` of
    /// zero means unlimited.
    #[must_use]
    pub fn new(frame_duration: Duration, max_frames: u64) -> Self {
        Self {
            state: LoopState::Running,
            paused: false,
            debug: false,
            frames: 0,
            max_frames,
            pacer: FramePacer::new(frame_duration),
        }
    }

    #[must_use]
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Transition to [`LoopState::Stopped`]. Observed at the top of the next
    /// iteration.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            info!(frames = self.frames, "game loop stopping");
            self.state = LoopState::Stopped;
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        info!(debug = self.debug, "debug overlay toggled");
    }

    /// Completed iterations.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Count a completed iteration, stopping the loop once the frame limit
    /// is reached.
    pub fn finish_frame(&mut self) {
        self.frames += 1;
        if self.max_frames > 0 && self.frames >= self.max_frames {
            info!(frames = self.frames, "frame limit reached");
            self.stop();
        }
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn pacer_mut(&mut self) -> &mut FramePacer {
        &mut self.pacer
    }
}
