use crate::canvas::Canvas;
use crate::random::{RandSource, RandomSource};
use crate::sim::{GridAgentSimulation, TickOutcome};
use log::{debug, info};
use rand::rngs::SmallRng;

/// Whatever delivers animation frames: a window's redraw request in the
/// binary, a counter in tests.
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
    fn cancel(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Self-rescheduling render loop. Each frame does at most one tick (when the
/// tick interval has been exceeded since the last one), one render, then asks
/// for the next frame. Missed intervals are not made up.
pub struct FrameLoop<S, R = RandSource<SmallRng>> {
    sim: GridAgentSimulation<R>,
    scheduler: S,
    tick_interval_ms: f64,
    last_tick_ms: f64,
    state: LoopState,
}

impl<S: FrameScheduler, R: RandomSource> FrameLoop<S, R> {
    pub fn new(sim: GridAgentSimulation<R>, scheduler: S) -> Self {
        let tick_interval_ms = sim.config().tick_interval_ms;
        Self { sim, scheduler, tick_interval_ms, last_tick_ms: 0.0, state: LoopState::Idle }
    }

    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }
        self.state = LoopState::Running;
        info!("frame loop started, ticking every {} ms", self.tick_interval_ms);
        self.scheduler.request_next_frame();
    }

    /// Runs one frame at `timestamp_ms` (milliseconds on any monotonic clock).
    /// Returns the tick outcome when this frame ticked.
    pub fn on_frame(&mut self, timestamp_ms: f64, canvas: &mut Canvas) -> Option<TickOutcome> {
        if self.state != LoopState::Running {
            return None;
        }
        let outcome = if timestamp_ms - self.last_tick_ms > self.tick_interval_ms {
            self.last_tick_ms = timestamp_ms;
            Some(self.sim.tick())
        } else {
            None
        };
        self.sim.render(canvas, timestamp_ms);
        self.scheduler.request_next_frame();
        outcome
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.sim.resize(width, height);
    }

    /// Stops requesting frames. Later frames and resizes are ignored.
    pub fn shutdown(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.scheduler.cancel();
        debug!(
            "frame loop stopped after {} coins and {} resets",
            self.sim.collected(),
            self.sim.resets()
        );
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn sim(&self) -> &GridAgentSimulation<R> {
        &self.sim
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
