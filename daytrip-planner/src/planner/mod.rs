//! `BranchAndBoundPlanner`: exact day planning over a [`CostSource`].

use daytrip_core::{
    CostSource, PlanError, PlanRequest, PlanResult, Planner, Point, Resolution,
};

use crate::config::PlannerConfig;
use crate::materialize::Materializer;
use crate::memo::CostMemo;
use crate::progress::{CancellationToken, ProgressReporter};
use crate::search::{Search, SearchHooks, SearchOutcome};

/// Exhaustive planner that finds the fastest feasible visiting order.
///
/// Every distinct stop is visited exactly once between the fixed start and
/// end points. Orderings that overrun the finish-by time are discarded, as
/// are orderings that miss a meal when [`MealPolicy::Required`] is in force.
/// Among the survivors the earliest arrival at the end wins; ties go to the
/// ordering that comes first when stops are taken in input order.
///
/// The planner holds no state between calls, so one instance may serve any
/// number of requests, concurrently if the cost source allows it.
///
/// [`MealPolicy::Required`]: crate::MealPolicy::Required
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use daytrip_core::{Category, PlanRequest, Planner};
/// use daytrip_core::test_support::{FixedMinutesCostSource, point};
/// use daytrip_planner::BranchAndBoundPlanner;
///
/// let request = PlanRequest {
///     date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
///     finish_by: NaiveTime::from_hms_opt(20, 0, 0).expect("valid time"),
///     meal_times: vec![NaiveTime::from_hms_opt(12, 0, 0).expect("valid time")],
///     start: point("A", 37.50, 127.00, Category::Lodging, 0),
///     end: point("A", 37.50, 127.00, Category::Lodging, 0),
///     stops: vec![point("F", 37.52, 127.01, Category::Food, 60)],
/// };
/// let planner = BranchAndBoundPlanner::new(FixedMinutesCostSource::uniform(30));
///
/// let result = planner.plan(&request).expect("a feasible day");
/// assert_eq!(result.visiting_order(), vec!["A", "F", "A"]);
/// assert_eq!(result.finish_time, NaiveTime::from_hms_opt(11, 0, 0).expect("valid time"));
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBoundPlanner<C> {
    source: C,
    config: PlannerConfig,
}

impl<C> BranchAndBoundPlanner<C>
where
    C: CostSource,
{
    /// Construct a planner using default configuration.
    pub fn new(source: C) -> Self {
        Self::with_config(source, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(source: C, config: PlannerConfig) -> Self {
        Self { source, config }
    }

    /// The configuration in force.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The cost source legs are priced with.
    #[must_use]
    pub const fn source(&self) -> &C {
        &self.source
    }

    /// Search for the best visiting order without rendering it.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidInput`] for a request whose finish-by time
    /// is not after its start time and [`PlanError::CostLookup`] when a leg
    /// cannot be priced. Infeasibility is reported through
    /// [`Resolution::Infeasible`], not as an error. A failed lookup still
    /// resolves any attached [`ProgressReporter`] as
    /// [`Resolution::Aborted`].
    pub fn search(&self, request: &PlanRequest) -> Result<Resolution, PlanError> {
        self.search_with(request, &ProgressReporter::new(), &CancellationToken::new())
    }

    /// Like [`Self::search`], reporting to `progress` and stopping early
    /// once `cancel` fires.
    ///
    /// # Errors
    ///
    /// As for [`Self::search`].
    pub fn search_with(
        &self,
        request: &PlanRequest,
        progress: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<Resolution, PlanError> {
        request.validate()?;
        let points = indexed_points(request);
        let mut memo = CostMemo::new(&self.source, points);
        let outcome = self.run(request, &mut memo, progress, cancel)?;
        Ok(outcome.resolution)
    }

    /// Plan `request`, reporting to `progress` and stopping early once
    /// `cancel` fires.
    ///
    /// # Errors
    ///
    /// As for [`Planner::plan`].
    pub fn plan_with(
        &self,
        request: &PlanRequest,
        progress: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<PlanResult, PlanError> {
        request.validate()?;
        let points = indexed_points(request);
        let mut memo = CostMemo::new(&self.source, points);
        let outcome = self.run(request, &mut memo, progress, cancel)?;
        match outcome.resolution {
            Resolution::Found(path) => {
                Materializer::new(&mut memo, request).render(&outcome.order, &path)
            }
            Resolution::Infeasible { exhaustive: true } => Err(PlanError::InfeasibleSchedule),
            Resolution::Infeasible { exhaustive: false } => {
                Err(PlanError::InfeasibleScheduleProvisional)
            }
            Resolution::Aborted(err) => Err(err.into()),
        }
    }

    fn run(
        &self,
        request: &PlanRequest,
        memo: &mut CostMemo<'_, C>,
        progress: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, PlanError> {
        let stop_count = memo.len().saturating_sub(2);
        log::debug!(
            "{}: planning {stop_count} stops between {} and {}",
            request.date,
            request.start_time,
            request.finish_by
        );
        let hooks = SearchHooks { progress, cancel };
        let outcome = match Search::new(request, &self.config, memo, hooks).run() {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{}: search aborted: {err}", request.date);
                progress.resolve(Resolution::Aborted(err.clone()));
                return Err(err.into());
            }
        };
        let evaluated = progress.progress();
        log::debug!(
            "{}: search evaluated {} of at most {} edges",
            request.date,
            evaluated.edges_evaluated,
            evaluated.edges_upper_bound
        );
        progress.resolve(outcome.resolution.clone());
        Ok(outcome)
    }
}

impl<C> Planner for BranchAndBoundPlanner<C>
where
    C: CostSource + Send + Sync,
{
    fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        self.plan_with(request, &ProgressReporter::new(), &CancellationToken::new())
    }
}

/// Start, distinct stops in input order, end.
fn indexed_points(request: &PlanRequest) -> Vec<&Point> {
    let stops = request.distinct_stops();
    let mut points = Vec::with_capacity(stops.len().saturating_add(2));
    points.push(&request.start);
    points.extend(stops);
    points.push(&request.end);
    points
}
