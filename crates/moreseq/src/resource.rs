//! Resource limits for operators that retain elements on behalf of callers.
//!
//! Most operators hold a bounded amount of state. A memoized sequence is the
//! exception: its shared buffer grows with every element any cursor pulls.
//! [`ResourceLimits`] lets a caller bound that growth; the limits are plain
//! data and can be loaded from configuration with serde.

use std::{
    convert::Infallible,
    fmt,
    time::{Duration, Instant},
};

/// Error returned when a configured resource limit is exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The shared buffer would grow past its limit.
    Buffer { limit: usize, requested: usize },
    /// Pulling from the source took longer than allowed since tracking started.
    Time { limit: Duration, elapsed: Duration },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer { limit, requested } => {
                write!(f, "buffer limit exceeded: {requested} > {limit} items")
            }
            Self::Time { limit, elapsed } => {
                write!(f, "time limit exceeded: {elapsed:?} > {limit:?}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Trait for tracking growth of a retained buffer.
///
/// The associated `Error` lets the unlimited tracker use [`Infallible`], so
/// adapters parameterized with [`NoLimitTracker`] expose plain items while
/// [`LimitedTracker`] surfaces `Result` items.
pub trait ResourceTracker: fmt::Debug {
    /// Error produced when a limit is exceeded.
    type Error;

    /// Called before the buffer grows to `new_len` items.
    fn on_buffer_grow(&mut self, new_len: usize) -> Result<(), Self::Error>;
}

/// A tracker that never refuses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLimitTracker;

impl ResourceTracker for NoLimitTracker {
    type Error = Infallible;

    #[inline]
    fn on_buffer_grow(&mut self, _new_len: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Configuration for resource limits.
///
/// All limits are optional - set to `None` to disable a specific limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceLimits {
    /// Maximum number of items a shared buffer may retain.
    #[serde(default)]
    pub max_buffered_items: Option<usize>,
    /// Maximum time allowed between tracker creation and the last buffer growth.
    #[serde(default)]
    pub max_duration: Option<Duration>,
}

impl ResourceLimits {
    /// Creates limits with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of buffered items.
    #[must_use]
    pub fn max_buffered_items(mut self, limit: usize) -> Self {
        self.max_buffered_items = Some(limit);
        self
    }

    /// Sets the maximum duration.
    #[must_use]
    pub fn max_duration(mut self, limit: Duration) -> Self {
        self.max_duration = Some(limit);
        self
    }
}

/// A resource tracker that enforces [`ResourceLimits`].
///
/// The start time is recorded when the tracker is created; create it right
/// before enumeration starts.
#[derive(Debug, Clone)]
pub struct LimitedTracker {
    limits: ResourceLimits,
    start_time: Instant,
    /// Largest buffer length approved so far.
    high_water: usize,
}

impl LimitedTracker {
    /// Creates a new tracker with the given limits.
    #[must_use]
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            limits,
            start_time: Instant::now(),
            high_water: 0,
        }
    }

    /// Returns the largest buffer length approved so far.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Returns the configured limits.
    #[must_use]
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }
}

impl ResourceTracker for LimitedTracker {
    type Error = ResourceError;

    fn on_buffer_grow(&mut self, new_len: usize) -> Result<(), ResourceError> {
        if let Some(max) = self.limits.max_buffered_items
            && new_len > max
        {
            return Err(ResourceError::Buffer {
                limit: max,
                requested: new_len,
            });
        }

        if let Some(max) = self.limits.max_duration {
            let elapsed = self.start_time.elapsed();
            if elapsed > max {
                return Err(ResourceError::Time { limit: max, elapsed });
            }
        }

        self.high_water = self.high_water.max(new_len);
        Ok(())
    }
}
