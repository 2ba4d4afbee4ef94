//! Observable search progress and cooperative cancellation.
//!
//! Both handles are cheap to clone and safe to share with other threads. The
//! planner only writes to a [`ProgressReporter`]; observers only read it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use daytrip_core::{Progress, Resolution, SearchState};

#[derive(Debug, Default)]
struct Shared {
    edges_evaluated: AtomicU64,
    edges_upper_bound: AtomicU64,
    resolution: OnceLock<Resolution>,
}

/// Live view of one planning call.
///
/// Attach a fresh reporter to each call. Snapshots taken while the search
/// runs are [`SearchState::Exploring`] with non-decreasing counters; once the
/// search ends every snapshot is the same [`SearchState::Resolved`].
///
/// # Examples
/// ```
/// use daytrip_core::SearchState;
/// use daytrip_planner::ProgressReporter;
///
/// let reporter = ProgressReporter::new();
/// assert!(matches!(reporter.snapshot(), SearchState::Exploring(_)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    shared: Arc<Shared>,
}

impl ProgressReporter {
    /// Create a reporter with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counters.
    #[must_use]
    pub fn progress(&self) -> Progress {
        // Read the count first: an edge seen here implies its upper bound is
        // visible too, so evaluated never exceeds the bound in a snapshot.
        let edges_evaluated = self.shared.edges_evaluated.load(Ordering::Acquire);
        Progress {
            edges_evaluated,
            edges_upper_bound: self.shared.edges_upper_bound.load(Ordering::Acquire),
        }
    }

    /// The terminal outcome, once the search has ended.
    #[must_use]
    pub fn resolution(&self) -> Option<&Resolution> {
        self.shared.resolution.get()
    }

    /// Current state of the search.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.resolution().map_or_else(
            || SearchState::Exploring(self.progress()),
            |resolution| SearchState::Resolved(resolution.clone()),
        )
    }

    pub(crate) fn begin(&self, edges_upper_bound: u64) {
        self.shared
            .edges_upper_bound
            .fetch_max(edges_upper_bound, Ordering::Release);
    }

    pub(crate) fn record_edge(&self) {
        self.shared.edges_evaluated.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn resolve(&self, resolution: Resolution) {
        if self.shared.resolution.set(resolution).is_err() {
            log::warn!("progress reporter was already resolved; keeping the first outcome");
        }
    }
}

/// Cooperative stop signal for a running search.
///
/// A cancelled search reports its best ordering so far as non-exhaustive.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every search holding this token to stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Upper bound on edges evaluated for `stop_count` intermediate stops.
///
/// Counts the `n * n` lookups of the bound pass (every stop to every other
/// stop and to the end point) and every edge of the full permutation tree:
/// `n!/(n-k)!` edges into depth `k` for `k` in `1..=n`, plus `n!` closing
/// edges to the end point. Saturates at [`u64::MAX`].
#[must_use]
pub fn edge_upper_bound(stop_count: usize) -> u64 {
    let n = u64::try_from(stop_count).unwrap_or(u64::MAX);
    let mut layer: u64 = 1;
    let mut total: u64 = n.saturating_mul(n);
    for remaining in (1..=n).rev() {
        layer = layer.saturating_mul(remaining);
        total = total.saturating_add(layer);
    }
    total.saturating_add(layer)
}
