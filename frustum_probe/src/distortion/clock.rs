/// Transition clocks.
///
/// The transition only ever asks "how far along are we", so hosts can
/// drive it from wall time or from a fixed frame step.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Millisecond time source for transitions
pub trait TransitionClock: Send + Sync {
    /// Current time in milliseconds. Only differences are meaningful.
    fn now_ms(&self) -> f64;

    /// Fraction of `duration_ms` elapsed since `start_ms`, unclamped
    fn elapsed_fraction(&self, start_ms: f64, duration_ms: f64) -> f64 {
        (self.now_ms() - start_ms) / duration_ms
    }
}

/// Monotonic wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually driven clock.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock starting at `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self { bits: Arc::new(AtomicU64::new(start_ms.to_bits())) }
    }

    pub fn set_ms(&self, ms: f64) {
        self.bits.store(ms.to_bits(), Ordering::Relaxed);
    }

    pub fn advance_ms(&self, delta_ms: f64) {
        self.set_ms(self.now_ms() + delta_ms);
    }
}

impl TransitionClock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
