//! Source lifecycle tracing.
//!
//! Multi-source adapters (zips, interleaves, sorted merges, transposes) report
//! every state change of the iterators they own to a [`SeqTracer`]. When using
//! [`NoopTracer`], all hooks compile away via monomorphization, so tracing
//! costs nothing unless a caller opts in.
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | Zero-cost no-op (default type parameter) |
//! | [`StderrTracer`] | Human-readable lifecycle log to stderr |
//! | [`RecordingTracer`] | Event recording for assertions or post-mortem |
//!
//! # Usage
//!
//! ```
//! use moreseq::{RecordingTracer, TraceEvent, interleave};
//!
//! let tracer = RecordingTracer::new();
//! let merged: Vec<_> = interleave([vec![1, 3], vec![2]]).with_tracer(tracer.clone()).collect();
//! assert_eq!(merged, [1, 2, 3]);
//! assert!(tracer.events().contains(&TraceEvent::Exhausted { source: 1 }));
//! ```

use std::{cell::RefCell, fmt, rc::Rc};

use crate::ImbalanceStrategy;

/// Lifecycle event emitted by a multi-source adapter.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TraceEvent {
    /// The iterator for a source was created.
    Open {
        /// Declared position of the source.
        source: usize,
    },
    /// A source reported that it has no more elements; its iterator was released.
    Exhausted {
        /// Declared position of the source.
        source: usize,
    },
    /// A still-open source was released because the adapter finished or was dropped.
    Dispose {
        /// Declared position of the source.
        source: usize,
    },
    /// Sources ended at different positions under a policy that reports it.
    Imbalance {
        /// Declared position of the first source found exhausted early.
        source: usize,
        /// Policy in force when the imbalance was seen.
        policy: ImbalanceStrategy,
    },
}

/// Hooks for observing the lifecycle of source iterators.
///
/// All methods have default no-op implementations; implementations override
/// only the hooks they care about.
pub trait SeqTracer: fmt::Debug {
    /// Called right after the iterator for `source` has been created.
    #[inline(always)]
    fn on_open(&mut self, _source: usize) {}

    /// Called when `source` returned `None` and its iterator was dropped.
    #[inline(always)]
    fn on_exhausted(&mut self, _source: usize) {}

    /// Called when a still-open `source` is dropped during cleanup.
    #[inline(always)]
    fn on_dispose(&mut self, _source: usize) {}

    /// Called when an imbalance between sources is observed.
    #[inline(always)]
    fn on_imbalance(&mut self, _source: usize, _policy: ImbalanceStrategy) {}
}

// ============================================================================
// NoopTracer: zero-cost default
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl SeqTracer for NoopTracer {}

// ============================================================================
// StderrTracer: human-readable lifecycle log
// ============================================================================

/// Tracer that prints a human-readable lifecycle log to stderr.
///
/// Output format:
/// ```text
///   >>> OPEN      source=0
///   >>> OPEN      source=1
///   <<< EXHAUSTED source=1
///   xxx DISPOSE   source=0
/// ```
#[derive(Debug, Clone, Default)]
pub struct StderrTracer {
    /// Maximum number of lines to print. None = unlimited.
    limit: Option<usize>,
    /// Number of lines printed so far.
    count: usize,
}

impl StderrTracer {
    /// Creates a new stderr tracer with no line limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new stderr tracer that goes quiet after `limit` lines.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            count: 0,
        }
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if self.limit.is_some_and(|limit| self.count >= limit) {
            return;
        }
        eprintln!("{line}");
        self.count += 1;
    }
}

impl SeqTracer for StderrTracer {
    fn on_open(&mut self, source: usize) {
        self.emit(format_args!("  >>> OPEN      source={source}"));
    }

    fn on_exhausted(&mut self, source: usize) {
        self.emit(format_args!("  <<< EXHAUSTED source={source}"));
    }

    fn on_dispose(&mut self, source: usize) {
        self.emit(format_args!("  xxx DISPOSE   source={source}"));
    }

    fn on_imbalance(&mut self, source: usize, policy: ImbalanceStrategy) {
        self.emit(format_args!("  !!! IMBALANCE source={source} policy={policy}"));
    }
}

// ============================================================================
// RecordingTracer: event recording
// ============================================================================

/// Tracer that records every event into a shared log.
///
/// Clones share the same log, so a caller can keep one handle while the
/// adapter owns another and inspect the events after the adapter is dropped.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl RecordingTracer {
    /// Creates a new recording tracer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events in chronological order.
    #[must_use]
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    /// Returns the number of events recorded.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.borrow().len()
    }

    /// Counts the recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&TraceEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    fn push(&self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl SeqTracer for RecordingTracer {
    fn on_open(&mut self, source: usize) {
        self.push(TraceEvent::Open { source });
    }

    fn on_exhausted(&mut self, source: usize) {
        self.push(TraceEvent::Exhausted { source });
    }

    fn on_dispose(&mut self, source: usize) {
        self.push(TraceEvent::Dispose { source });
    }

    fn on_imbalance(&mut self, source: usize, policy: ImbalanceStrategy) {
        self.push(TraceEvent::Imbalance { source, policy });
    }
}
