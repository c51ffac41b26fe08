//! Progress reporting for long-running matrix operations
//!
//! Every engine operation takes a [`Progress`] handle. A handle owns a budget
//! (`scale`) expressed in the units of whatever [`ProgressSink`] sits at the
//! root, and it only ever reports positive increments whose running total is
//! capped at that budget. Nested operations receive a handle produced by
//! [`Progress::split`], so their reports flow through the parent and the
//! totals compose additively.
//!
//! ```
//! use matrix_inspector::progress::{Progress, SharedProgress};
//!
//! let shared = SharedProgress::new();
//! let mut sink = shared.clone();
//! let mut progress = Progress::new(&mut sink);
//!
//! progress.advance(0.25);
//! {
//!     let mut child = progress.split(0.5);
//!     child.finish();
//! }
//! progress.finish();
//!
//! assert!((shared.get() - 1.0).abs() < 1e-12);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::constants::DEFAULT_PROGRESS_STEPS;

/// Receiver of progress increments
pub trait ProgressSink {
    /// Add `delta` (always positive) to the accumulated progress
    fn add(&mut self, delta: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn add(&mut self, delta: f64) {
        self(delta)
    }
}

/// A progress accumulator that can be polled from another thread
///
/// Clones share the same counter. Writes are expected to come from a single
/// producer at a time; reads may happen from anywhere.
#[derive(Debug, Clone, Default)]
pub struct SharedProgress {
    bits: Arc<AtomicU64>,
}

impl SharedProgress {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulated value
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Reset the counter to zero
    pub fn reset(&self) {
        self.bits.store(0f64.to_bits(), Ordering::Release);
    }
}

impl ProgressSink for SharedProgress {
    fn add(&mut self, delta: f64) {
        let mut current = self.bits.load(Ordering::Acquire);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }
}

/// Per-call progress handle
pub struct Progress<'a> {
    sink: Option<&'a mut (dyn ProgressSink + 'a)>,
    scale: f64,
    reported: f64,
}

impl<'a> Progress<'a> {
    /// A handle that reports nowhere
    pub fn none() -> Self {
        Self {
            sink: None,
            scale: 1.0,
            reported: 0.0,
        }
    }

    /// Report into `sink` with a budget of 1.0
    pub fn new(sink: &'a mut (dyn ProgressSink + 'a)) -> Self {
        Self::with_scale(sink, 1.0)
    }

    /// Report into `sink` with a budget of `scale`
    ///
    /// Non-finite or negative scales are treated as zero.
    pub fn with_scale(sink: &'a mut (dyn ProgressSink + 'a), scale: f64) -> Self {
        Self {
            sink: Some(sink),
            scale: sanitize(scale),
            reported: 0.0,
        }
    }

    /// Total budget of this handle
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Amount reported so far
    pub fn reported(&self) -> f64 {
        self.reported
    }

    /// Budget not yet reported
    pub fn remaining(&self) -> f64 {
        (self.scale - self.reported).max(0.0)
    }

    /// Whether reports reach a sink
    pub fn is_reporting(&self) -> bool {
        self.sink.is_some()
    }

    /// Report `fraction` of this handle's scale
    pub fn advance(&mut self, fraction: f64) {
        self.report(fraction * self.scale);
    }

    /// Report `fraction` of the budget not yet reported
    pub fn advance_remaining(&mut self, fraction: f64) {
        let delta = fraction * self.remaining();
        self.report(delta);
    }

    /// Report the whole remaining budget
    pub fn finish(&mut self) {
        let remaining = self.remaining();
        self.report(remaining);
    }

    /// Create a nested handle owning `fraction` of this handle's scale
    ///
    /// The child's budget is capped at what remains in the parent.
    pub fn split(&mut self, fraction: f64) -> Progress<'_> {
        let budget = sanitize(fraction * self.scale).min(self.remaining());
        if self.sink.is_none() {
            return Progress {
                sink: None,
                scale: budget,
                reported: 0.0,
            };
        }
        let parent: &mut (dyn ProgressSink + '_) = self;
        Progress {
            sink: Some(parent),
            scale: budget,
            reported: 0.0,
        }
    }

    fn report(&mut self, delta: f64) {
        let delta = sanitize(delta).min(self.remaining());
        if delta <= 0.0 {
            return;
        }
        self.reported += delta;
        if let Some(sink) = self.sink.as_mut() {
            sink.add(delta);
        }
    }
}

impl Default for Progress<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl ProgressSink for Progress<'_> {
    fn add(&mut self, delta: f64) {
        self.report(delta);
    }
}

impl std::fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("reporting", &self.is_reporting())
            .field("scale", &self.scale)
            .field("reported", &self.reported)
            .finish()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Spreads a share of a handle's budget across the iterations of a loop
///
/// At most `steps` reports are emitted, one every `len / steps` iterations,
/// and together they add up to exactly `fraction` of the handle's scale.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: usize,
    increment: f64,
}

impl Ticker {
    /// Ticker with the default number of steps
    pub fn new(len: usize, fraction: f64) -> Self {
        Self::with_steps(len, fraction, DEFAULT_PROGRESS_STEPS)
    }

    /// Ticker emitting at most `steps` reports
    pub fn with_steps(len: usize, fraction: f64, steps: usize) -> Self {
        let interval = (len / steps.max(1)).max(1);
        let ticks = len.div_ceil(interval);
        let increment = if ticks == 0 {
            0.0
        } else {
            fraction / ticks as f64
        };
        Self {
            interval,
            increment,
        }
    }

    /// Report once every `interval` iterations
    #[inline]
    pub fn tick(&self, progress: &mut Progress<'_>, i: usize) {
        if i % self.interval == 0 {
            progress.advance(self.increment);
        }
    }
}
