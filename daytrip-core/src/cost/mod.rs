//! Pairwise travel costs between points.
//!
//! The [`CostSource`] trait abstracts where travel durations come from. The
//! planner receives a source at construction time and never looks one up
//! globally, so deterministic fakes and real routing clients are
//! interchangeable.
//!
//! [`StraightLineCostSource`] derives durations from great-circle distance at
//! a fixed average speed. It is the default source until a routing provider
//! is wired in.

mod error;
mod source;
mod straight_line;

pub use error::{CostLookupError, StraightLineConfigError};
pub use source::{CostSource, TravelCost};
pub use straight_line::{DEFAULT_SPEED_KMH, StraightLineCostSource};
