//! Depth-first branch-and-bound over visiting orders.
//!
//! Points are indexed `0` for the start, `1..=n` for the distinct stops in
//! input order and `n + 1` for the end. Children are expanded in index
//! order and only a strictly better ordering replaces the incumbent, so the
//! first optimum in that order wins.

mod meals;

use std::time::{Duration, Instant};

use daytrip_core::{
    Category, CostLookupError, CostSource, FoundPath, PlanRequest, Point, Resolution,
};

use crate::clock::clock_after;
use crate::config::{MealPolicy, PlannerConfig};
use crate::memo::CostMemo;
use crate::progress::{CancellationToken, ProgressReporter, edge_upper_bound};

use self::meals::MealWindows;

/// Result of a search: the outcome plus the winning index order.
pub(crate) struct SearchOutcome {
    pub(crate) resolution: Resolution,
    pub(crate) order: Vec<usize>,
}

/// Live hooks a search reports to and listens on.
pub(crate) struct SearchHooks<'h> {
    pub(crate) progress: &'h ProgressReporter,
    pub(crate) cancel: &'h CancellationToken,
}

#[derive(Debug, Clone)]
struct Incumbent {
    missed: usize,
    elapsed: Duration,
    stops: Vec<usize>,
}

impl Incumbent {
    /// Whether a branch scoring at least `(missed, elapsed)` could still win.
    fn beaten_by(&self, missed: usize, elapsed: Duration) -> bool {
        (missed, elapsed) < (self.missed, self.elapsed)
    }
}

pub(crate) struct Search<'s, 'a, C: ?Sized> {
    request: &'s PlanRequest,
    config: &'s PlannerConfig,
    memo: &'s mut CostMemo<'a, C>,
    hooks: SearchHooks<'s>,
    started: Instant,
    stop_count: usize,
    end: usize,
    horizon: Duration,
    dwell: Vec<Duration>,
    food: Vec<bool>,
    min_out: Vec<Duration>,
    meals: MealWindows,
    covered: Vec<bool>,
    visited: Vec<bool>,
    path: Vec<usize>,
    remaining_bound: Duration,
    edges: u64,
    interrupted: bool,
    best: Option<Incumbent>,
}

impl<'s, 'a, C> Search<'s, 'a, C>
where
    C: CostSource + ?Sized,
{
    /// Prepare a search over the points held by `memo`.
    ///
    /// `memo` must index the start at `0`, the stops next and the end last.
    pub(crate) fn new(
        request: &'s PlanRequest,
        config: &'s PlannerConfig,
        memo: &'s mut CostMemo<'a, C>,
        hooks: SearchHooks<'s>,
    ) -> Self {
        let end = memo.len().saturating_sub(1);
        let stop_count = end.saturating_sub(1);
        let points: Vec<Option<&Point>> = (0..=end).map(|index| memo.point(index)).collect();
        let dwell = points
            .iter()
            .enumerate()
            .map(|(index, point)| match point {
                Some(point) if index != 0 && index != end => {
                    Duration::from_secs(u64::from(point.dwell_minutes).saturating_mul(60))
                }
                _ => Duration::ZERO,
            })
            .collect();
        let food = points
            .iter()
            .map(|point| point.is_some_and(|point| point.category == Category::Food))
            .collect();
        let meals = MealWindows::new(
            request.start_time,
            &request.meal_times,
            config.meal_tolerance,
        );
        Self {
            request,
            config,
            memo,
            hooks,
            started: Instant::now(),
            stop_count,
            end,
            horizon: request.horizon(),
            dwell,
            food,
            min_out: vec![Duration::ZERO; end.saturating_add(1)],
            covered: vec![false; meals.len()],
            meals,
            visited: vec![false; end.saturating_add(1)],
            path: Vec::with_capacity(stop_count),
            remaining_bound: Duration::ZERO,
            edges: 0,
            interrupted: false,
            best: None,
        }
    }

    /// Run the search to completion, exhaustion of the budget or
    /// cancellation.
    ///
    /// # Errors
    ///
    /// Propagates the first failed cost lookup.
    pub(crate) fn run(mut self) -> Result<SearchOutcome, CostLookupError> {
        self.hooks.progress.begin(edge_upper_bound(self.stop_count));

        if self.meals_unreachable() {
            log::debug!(
                "{}: meal times requested but no food point is available",
                self.request.date
            );
            return Ok(self.finish());
        }

        self.prepare_bounds()?;
        if !self.interrupted {
            let start_cover = self.cover_meals(0, Duration::ZERO, Duration::ZERO);
            self.explore(0, Duration::ZERO, 0)?;
            self.uncover(&start_cover);
        }

        if self.interrupted {
            log::warn!(
                "{}: search stopped after {} edges; result is not proven optimal",
                self.request.date,
                self.edges
            );
        }
        Ok(self.finish())
    }

    fn meals_unreachable(&self) -> bool {
        self.config.meal_policy == MealPolicy::Required
            && !self.meals.is_empty()
            && !self.food.iter().any(|food| *food)
    }

    /// Cheapest way out of every stop, and the bound over all stops.
    ///
    /// These lookups are search edges like any other: they are counted,
    /// charged to the edge budget and abandoned once the search must stop.
    fn prepare_bounds(&mut self) -> Result<(), CostLookupError> {
        let mut total = Duration::ZERO;
        for stop in 1..=self.stop_count {
            let mut cheapest: Option<Duration> = None;
            for next in 1..=self.end {
                if next == stop {
                    continue;
                }
                if self.should_stop() {
                    return Ok(());
                }
                let Some(duration) = self.evaluate(stop, next)? else {
                    return Ok(());
                };
                cheapest = Some(cheapest.map_or(duration, |current| current.min(duration)));
            }
            let cheapest = cheapest.unwrap_or(Duration::ZERO);
            if let Some(slot) = self.min_out.get_mut(stop) {
                *slot = cheapest;
            }
            total = total
                .saturating_add(cheapest)
                .saturating_add(self.dwell_at(stop));
        }
        self.remaining_bound = total;
        Ok(())
    }

    fn explore(
        &mut self,
        current: usize,
        elapsed: Duration,
        depth: usize,
    ) -> Result<(), CostLookupError> {
        if self.should_stop() {
            return Ok(());
        }
        if depth == self.stop_count {
            return self.close(current, elapsed);
        }

        for candidate in 1..=self.stop_count {
            if self.interrupted {
                break;
            }
            if self.is_visited(candidate) {
                continue;
            }
            let Some(duration) = self.evaluate(current, candidate)? else {
                break;
            };
            let arrival = elapsed.saturating_add(duration);
            let dwell = self.dwell_at(candidate);
            let leave = arrival.saturating_add(dwell);
            if leave > self.horizon {
                continue;
            }
            let own_bound = self.min_out_at(candidate);
            let rest = self
                .remaining_bound
                .saturating_sub(own_bound.saturating_add(dwell));
            let bound = leave.saturating_add(own_bound).saturating_add(rest);
            if bound > self.horizon {
                continue;
            }

            let newly_covered = self.cover_meals(candidate, arrival, leave);
            let closed = self.meals_closed_by(leave);
            if self.prunable(closed, bound) {
                self.uncover(&newly_covered);
                continue;
            }

            self.set_visited(candidate, true);
            self.path.push(candidate);
            let saved_bound = std::mem::replace(&mut self.remaining_bound, rest);
            let outcome = self.explore(candidate, leave, depth.saturating_add(1));
            self.remaining_bound = saved_bound;
            self.path.pop();
            self.set_visited(candidate, false);
            self.uncover(&newly_covered);
            outcome?;
        }
        Ok(())
    }

    /// Take the closing edge to the end point and score the full ordering.
    fn close(&mut self, current: usize, elapsed: Duration) -> Result<(), CostLookupError> {
        let Some(duration) = self.evaluate(current, self.end)? else {
            return Ok(());
        };
        let arrival = elapsed.saturating_add(duration);
        if arrival > self.horizon {
            return Ok(());
        }

        let newly_covered = self.cover_meals(self.end, arrival, arrival);
        let missed = self.covered.iter().filter(|covered| !**covered).count();
        self.uncover(&newly_covered);

        if self.config.meal_policy == MealPolicy::Required && missed > 0 {
            return Ok(());
        }
        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| best.beaten_by(missed, arrival));
        if improves {
            log::trace!(
                "{}: new best ordering {:?} arriving after {:?}, {missed} meals missed",
                self.request.date,
                self.path,
                arrival
            );
            self.best = Some(Incumbent {
                missed,
                elapsed: arrival,
                stops: self.path.clone(),
            });
        }
        Ok(())
    }

    fn prunable(&self, closed_meals: usize, bound: Duration) -> bool {
        if self.config.meal_policy == MealPolicy::Required && closed_meals > 0 {
            return true;
        }
        self.best
            .as_ref()
            .is_some_and(|best| !best.beaten_by(closed_meals, bound))
    }

    /// Count and price one edge, or `None` once the edge budget is spent.
    fn evaluate(&mut self, from: usize, to: usize) -> Result<Option<Duration>, CostLookupError> {
        if let Some(max_edges) = self.config.budget.max_edges
            && self.edges >= max_edges
        {
            self.interrupted = true;
            return Ok(None);
        }
        self.edges = self.edges.saturating_add(1);
        self.hooks.progress.record_edge();
        Ok(Some(self.memo.cost(from, to)?.duration))
    }

    fn should_stop(&mut self) -> bool {
        if self.interrupted {
            return true;
        }
        let out_of_time = self
            .config
            .budget
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit);
        if out_of_time || self.hooks.cancel.is_cancelled() {
            self.interrupted = true;
        }
        self.interrupted
    }

    /// Mark meals covered by a visit to `point`; returns the newly covered
    /// ones so the caller can undo them on backtrack.
    fn cover_meals(&mut self, point: usize, arrival: Duration, departure: Duration) -> Vec<usize> {
        if !self.food.get(point).copied().unwrap_or(false) {
            return Vec::new();
        }
        let mut newly_covered = Vec::new();
        for meal in self.meals.covering(arrival, departure) {
            if let Some(covered) = self.covered.get_mut(meal)
                && !*covered
            {
                *covered = true;
                newly_covered.push(meal);
            }
        }
        newly_covered
    }

    fn uncover(&mut self, meals: &[usize]) {
        for meal in meals {
            if let Some(covered) = self.covered.get_mut(*meal) {
                *covered = false;
            }
        }
    }

    /// Uncovered meals whose window has already closed at `moment`.
    fn meals_closed_by(&self, moment: Duration) -> usize {
        self.covered
            .iter()
            .enumerate()
            .filter(|(meal, covered)| !**covered && self.meals.closed_by(*meal, moment))
            .count()
    }

    fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(true)
    }

    fn set_visited(&mut self, index: usize, visited: bool) {
        if let Some(slot) = self.visited.get_mut(index) {
            *slot = visited;
        }
    }

    fn dwell_at(&self, index: usize) -> Duration {
        self.dwell.get(index).copied().unwrap_or(Duration::ZERO)
    }

    fn min_out_at(&self, index: usize) -> Duration {
        self.min_out.get(index).copied().unwrap_or(Duration::ZERO)
    }

    fn finish(self) -> SearchOutcome {
        let exhaustive = !self.interrupted;
        let Some(best) = self.best else {
            return SearchOutcome {
                resolution: Resolution::Infeasible { exhaustive },
                order: Vec::new(),
            };
        };

        let mut order = Vec::with_capacity(best.stops.len().saturating_add(2));
        order.push(0);
        order.extend(best.stops.iter().copied());
        order.push(self.end);

        let points = order
            .iter()
            .filter_map(|index| self.memo.point(*index))
            .enumerate()
            .map(|(position, point)| {
                if position == 0 || position == best.stops.len().saturating_add(1) {
                    point.without_dwell()
                } else {
                    point.clone()
                }
            })
            .collect();

        let found = FoundPath {
            order: points,
            elapsed: best.elapsed,
            finish_time: clock_after(self.request.start_time, best.elapsed),
            missed_meals: best.missed,
            exhaustive,
        };
        SearchOutcome {
            resolution: Resolution::Found(found),
            order,
        }
    }
}

#[cfg(test)]
mod tests;
