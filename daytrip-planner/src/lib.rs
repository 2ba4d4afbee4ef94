//! Exact day-itinerary planning for Daytrip.
//!
//! This crate provides [`BranchAndBoundPlanner`], the default implementation
//! of the [`Planner`](daytrip_core::Planner) trait. It searches every visiting
//! order of a day's stops depth-first, pruning branches that cannot meet the
//! finish-by time, cannot cover a required meal or cannot beat the best
//! ordering found so far. The winning order is then rendered into stays and
//! moves on a running clock.
//!
//! Travel costs come from a [`CostSource`](daytrip_core::CostSource) and are
//! cached per planning call, so each pair of points is priced at most once.
//! Long searches can be observed through a [`ProgressReporter`] and stopped
//! with a [`CancellationToken`] or a [`SearchBudget`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
mod config;
mod materialize;
mod memo;
mod planner;
mod progress;
mod search;

pub use config::{DEFAULT_MEAL_TOLERANCE, MealPolicy, PlannerConfig, SearchBudget};
pub use materialize::materialize;
pub use planner::BranchAndBoundPlanner;
pub use progress::{CancellationToken, ProgressReporter, edge_upper_bound};
