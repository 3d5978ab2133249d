//! Tick scheduling
//!
//! Separates *when* from *what*: the steppers in `sim` are pure, and these
//! accumulators decide how many steps a frame gets. Stopping is idempotent
//! and can never strand a half-applied transition, because transitions run
//! synchronously inside the caller's tick.

use crate::consts::MAX_SUBSTEPS;

/// Largest frame delta fed into an accumulator; longer gaps (tab switch,
/// debugger pause) are swallowed instead of triggering a catch-up storm
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-timestep accumulator.
///
/// Feed wall-clock frame deltas in, get whole fixed steps out, capped at
/// `MAX_SUBSTEPS` per frame.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    step: f32,
    accumulator: f32,
    running: bool,
}

impl FixedStepper {
    /// A running stepper with the given fixed step size (seconds)
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            running: true,
        }
    }

    /// Feed a frame delta; returns the number of fixed steps to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Stop yielding steps. Idempotent; also clears any banked time so a
    /// later `start` begins from a clean slate.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Resume yielding steps. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Interval gate for coarse ticks (the 300 ms sort cadence).
///
/// Same contract as `FixedStepper` with a period instead of a step size.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: f32,
    elapsed: f32,
    running: bool,
}

impl IntervalTimer {
    /// A stopped timer with the given period (seconds)
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            running: false,
        }
    }

    /// From a period in milliseconds
    pub fn from_millis(ms: u32) -> Self {
        Self::new(ms as f32 / 1000.0)
    }

    /// Feed a frame delta; returns how many intervals elapsed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt.min(MAX_FRAME_DT);

        let mut fired = 0;
        while self.elapsed >= self.period && fired < MAX_SUBSTEPS {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    /// Stop firing and drop banked time. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    /// Start firing after a full period. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
