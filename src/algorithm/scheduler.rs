//! Chunked progress reporting and cooperative yielding
//!
//! Long runs are split into chunks of target slots. After each chunk the
//! scheduler reports how far it got and hands control back to the host
//! through a [`Yielder`]. Suspension only ever happens between chunks, and the
//! next chunk starts at exactly the index where the previous one stopped.

use crate::algorithm::executor::RunContext;
use crate::io::error::{Result, invalid_parameter};
use std::ops::Range;
use std::time::Duration;

/// Receives completion fractions in `[0.0, 1.0]`
pub trait ProgressSink {
    /// Record that the run is `fraction` complete
    fn report(&mut self, fraction: f64);
}

/// Hands control back to the host between chunks
pub trait Yielder {
    /// Suspend briefly before the next chunk starts
    fn yield_now(&mut self);
}

/// Discards all progress events
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _fraction: f64) {}
}

/// Keeps every progress event in order
#[derive(Clone, Debug, Default)]
pub struct RecordingProgress {
    /// Fractions received so far
    pub events: Vec<f64>,
}

impl ProgressSink for RecordingProgress {
    fn report(&mut self, fraction: f64) {
        self.events.push(fraction);
    }
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, fraction: f64) {
        self(fraction);
    }
}

/// Never suspends
#[derive(Clone, Copy, Debug, Default)]
pub struct NoYield;

impl Yielder for NoYield {
    fn yield_now(&mut self) {}
}

/// Offers the rest of the time slice to other threads
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadYield;

impl Yielder for ThreadYield {
    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}

/// Sleeps for a fixed pause between chunks
#[derive(Clone, Copy, Debug)]
pub struct SleepYield(pub Duration);

impl Yielder for SleepYield {
    fn yield_now(&mut self) {
        std::thread::sleep(self.0);
    }
}

/// Drives a per-index step function in chunks
///
/// Progress goes to the context's sink and suspension through its yielder.
pub struct ChunkScheduler<'c, 'a> {
    chunk_size: usize,
    context: &'c mut RunContext<'a>,
    last_reported: Option<f64>,
    yields: usize,
}

impl<'c, 'a> ChunkScheduler<'c, 'a> {
    /// Create a scheduler for one run
    ///
    /// # Errors
    ///
    /// Returns an error if `chunk_size` is zero
    pub fn new(chunk_size: usize, context: &'c mut RunContext<'a>) -> Result<Self> {
        if chunk_size == 0 {
            return Err(invalid_parameter(
                "chunk_size",
                &chunk_size,
                &"must be at least 1",
            ));
        }
        Ok(Self {
            chunk_size,
            context,
            last_reported: None,
            yields: 0,
        })
    }

    /// Process indices `0..total` in order
    ///
    /// After each chunk, the share of `total` completed is mapped into `span`
    /// and reported. The yielder runs between chunks but not after the last
    /// one. The first failing step aborts the loop.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `step`
    pub fn run_chunked<F>(&mut self, total: usize, span: Range<f64>, mut step: F) -> Result<()>
    where
        F: FnMut(usize) -> Result<()>,
    {
        let mut start = 0;
        while start < total {
            let end = start.saturating_add(self.chunk_size).min(total);
            for index in start..end {
                step(index)?;
            }

            let done = end as f64 / total as f64;
            self.report(span.start + (span.end - span.start) * done);

            if end < total {
                self.context.yielder.yield_now();
                self.yields += 1;
            }
            start = end;
        }
        Ok(())
    }

    /// Emit the terminating `1.0` unless it was already the last event
    pub fn finish(&mut self) {
        if self.last_reported != Some(1.0) {
            self.report(1.0);
        }
    }

    /// Number of times the yielder has run
    pub const fn yields(&self) -> usize {
        self.yields
    }

    /// Configured chunk size
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    // Clamped so events never go backwards or leave [0, 1]
    fn report(&mut self, fraction: f64) {
        let floor = self.last_reported.unwrap_or(0.0);
        let fraction = fraction.clamp(0.0, 1.0).max(floor);
        self.last_reported = Some(fraction);
        self.context.progress.report(fraction);
    }
}
