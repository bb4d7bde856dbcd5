//! Execution context for query traversals.
//!
//! The context carries the cancellation source and execution statistics
//! shared by every cursor in one query execution. It is passed by
//! reference into every stepping call so that cancellation observed deep
//! in the tree surfaces immediately at every ancestor.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A handle for cancelling query execution.
///
/// Can be cloned and shared between threads to allow cancellation from
/// outside the execution thread.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// Cancels the associated execution.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks if cancellation was requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Execution statistics collected during a traversal.
#[derive(Debug)]
pub struct ExecutionStats {
    /// When execution started.
    start_time: Instant,
    /// Number of results produced by `advance`.
    results_produced: AtomicU64,
    /// Number of containment probes answered.
    probes_answered: AtomicU64,
}

impl ExecutionStats {
    /// Creates new execution statistics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            results_produced: AtomicU64::new(0),
            probes_answered: AtomicU64::new(0),
        }
    }

    /// Returns the number of results produced so far.
    #[inline]
    #[must_use]
    pub fn results_produced(&self) -> u64 {
        self.results_produced.load(Ordering::Relaxed)
    }

    /// Returns the number of containment probes answered so far.
    #[inline]
    #[must_use]
    pub fn probes_answered(&self) -> u64 {
        self.probes_answered.load(Ordering::Relaxed)
    }

    /// Returns the elapsed execution time.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExecutionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Execution context for a single query execution.
///
/// The context provides:
/// - Cancellation support, shared with external callers through a
///   [`CancellationToken`]
/// - Execution statistics
///
/// Leaf cursors consult the cancellation flag on every step; decorator
/// cursors forward the context untouched.
#[derive(Debug)]
pub struct ExecutionContext {
    token: CancellationToken,
    stats: ExecutionStats,
}

impl ExecutionContext {
    /// Creates a new execution context with its own cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self { token: CancellationToken::new(), stats: ExecutionStats::new() }
    }

    /// Creates a context driven by an externally held cancellation token.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self { token, stats: ExecutionStats::new() }
    }

    /// Returns the cancellation token for this execution.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels the execution.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Checks if the execution has been cancelled.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns the execution statistics.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Records that a result was produced.
    #[inline]
    pub fn record_result(&self) {
        self.stats.results_produced.fetch_add(1, Ordering::Relaxed);
    }

    /// Records that a containment probe was answered.
    #[inline]
    pub fn record_probe(&self) {
        self.stats.probes_answered.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}
