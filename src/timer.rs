//! Tick-driven timers for timed sequences
//!
//! Reloads and similar "wait, then act" sequences are explicit state
//! machines: each phase owns a `PhaseTimer` that the fixed tick advances,
//! and the owner transitions when it reports completion.

/// Elapsed/duration pair for one timed phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTimer {
    elapsed: f32,
    duration: f32,
}

impl PhaseTimer {
    /// Creates a timer for `duration` seconds (negative durations become 0)
    pub fn new(duration: f32) -> Self {
        PhaseTimer {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advances by `dt` seconds and returns true once the phase is over
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Completion in 0.0..=1.0
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }
}
