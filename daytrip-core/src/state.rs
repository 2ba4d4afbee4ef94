//! Search progress and terminal outcomes.
//!
//! A search moves from [`SearchState::Exploring`] through further exploring
//! snapshots to exactly one [`SearchState::Resolved`], after which it never
//! changes again.

use std::time::Duration;

use chrono::NaiveTime;

use crate::{CostLookupError, Point};

/// Counters describing an in-flight search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Search edges evaluated so far.
    pub edges_evaluated: u64,
    /// Upper bound on the edges a full search could evaluate.
    pub edges_upper_bound: u64,
}

/// The best ordering a search found.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    /// Visiting order: start, every distinct stop once, end.
    pub order: Vec<Point>,
    /// Time from leaving the start to arriving at the end.
    pub elapsed: Duration,
    /// Arrival clock time at the end point.
    pub finish_time: NaiveTime,
    /// Meal times the ordering leaves uncovered.
    pub missed_meals: usize,
    /// Whether the whole search tree was explored.
    pub exhaustive: bool,
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A feasible ordering was found.
    Found(FoundPath),
    /// No feasible ordering was found.
    ///
    /// When `exhaustive` is `true` none exists; otherwise the search budget
    /// ran out first and one might.
    Infeasible {
        /// Whether the whole search tree was explored.
        exhaustive: bool,
    },
    /// The search stopped because a travel cost could not be priced.
    Aborted(CostLookupError),
}

impl Resolution {
    /// Whether the outcome is backed by a complete search.
    #[must_use]
    pub const fn is_exhaustive(&self) -> bool {
        match self {
            Self::Found(path) => path.exhaustive,
            Self::Infeasible { exhaustive } => *exhaustive,
            Self::Aborted(_) => false,
        }
    }
}

/// Snapshot of a planning search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// The search is still running.
    Exploring(Progress),
    /// The search has finished.
    Resolved(Resolution),
}

impl SearchState {
    /// Whether this is a terminal snapshot.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
