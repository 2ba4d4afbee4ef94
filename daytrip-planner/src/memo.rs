//! Per-call cache of travel costs.
//!
//! Travel is treated as symmetric, so each unordered pair of points is
//! looked up at most once, always from the lower-indexed point to the
//! higher-indexed one. Durations are stored rounded up to whole minutes so
//! the search and the rendered itinerary run on the same clock.

use std::collections::HashMap;

use daytrip_core::{CostLookupError, CostSource, Point, TravelCost};

use crate::clock::whole_minutes;

/// Cost cache over a fixed, indexed set of points.
pub(crate) struct CostMemo<'a, C: ?Sized> {
    source: &'a C,
    points: Vec<&'a Point>,
    table: HashMap<(usize, usize), TravelCost>,
}

impl<'a, C> CostMemo<'a, C>
where
    C: CostSource + ?Sized,
{
    pub(crate) fn new(source: &'a C, points: Vec<&'a Point>) -> Self {
        Self {
            source,
            points,
            table: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn point(&self, index: usize) -> Option<&'a Point> {
        self.points.get(index).copied()
    }

    pub(crate) fn source(&self) -> &'a C {
        self.source
    }

    /// Travel cost between the points at `a` and `b`.
    pub(crate) fn cost(&mut self, a: usize, b: usize) -> Result<TravelCost, CostLookupError> {
        if a == b {
            return Ok(TravelCost::ZERO);
        }
        let key = (a.min(b), a.max(b));
        if let Some(cost) = self.table.get(&key) {
            return Ok(*cost);
        }
        let (Some(from), Some(to)) = (self.point(key.0), self.point(key.1)) else {
            return Err(CostLookupError::new(
                format!("#{a}"),
                format!("#{b}"),
                "point index out of range",
            ));
        };
        let priced = self.source.cost(from, to)?;
        let cost = TravelCost {
            duration: whole_minutes(priced.duration),
            ..priced
        };
        log::trace!("cost {} -> {}: {:?}", from.name, to.name, cost.duration);
        self.table.insert(key, cost);
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrip_core::Category;
    use daytrip_core::test_support::{CountingCostSource, FixedMinutesCostSource, point};
    use rstest::rstest;

    #[rstest]
    fn each_pair_is_looked_up_once_in_either_direction() {
        let hotel = point("Hotel", 0.0, 0.0, Category::Lodging, 0);
        let cafe = point("Cafe", 0.0, 0.1, Category::Food, 30);
        let source = CountingCostSource::new(FixedMinutesCostSource::uniform(20));
        let mut memo = CostMemo::new(&source, vec![&hotel, &cafe]);

        let forward = memo.cost(0, 1).expect("forward cost");
        let backward = memo.cost(1, 0).expect("backward cost");

        assert_eq!(forward, backward);
        assert_eq!(source.calls(), 1);
    }

    #[rstest]
    fn same_index_is_free_without_lookup() {
        let hotel = point("Hotel", 0.0, 0.0, Category::Lodging, 0);
        let source = CountingCostSource::new(FixedMinutesCostSource::uniform(20));
        let mut memo = CostMemo::new(&source, vec![&hotel]);

        assert_eq!(memo.cost(0, 0).expect("zero cost"), TravelCost::ZERO);
        assert_eq!(source.calls(), 0);
    }

    #[rstest]
    fn unknown_index_is_an_error() {
        let hotel = point("Hotel", 0.0, 0.0, Category::Lodging, 0);
        let source = FixedMinutesCostSource::uniform(20);
        let mut memo = CostMemo::new(&source, vec![&hotel]);

        assert!(memo.cost(0, 3).is_err());
    }

    #[rstest]
    fn durations_are_cached_in_whole_minutes() {
        struct Seconds;
        impl CostSource for Seconds {
            fn cost(&self, _: &Point, _: &Point) -> Result<TravelCost, CostLookupError> {
                Ok(TravelCost {
                    duration: std::time::Duration::from_secs(61),
                    expense: 1.5,
                })
            }
        }
        let hotel = point("Hotel", 0.0, 0.0, Category::Lodging, 0);
        let cafe = point("Cafe", 0.0, 0.1, Category::Food, 30);
        let mut memo = CostMemo::new(&Seconds, vec![&hotel, &cafe]);

        let cost = memo.cost(0, 1).expect("priced");

        assert_eq!(cost.duration, std::time::Duration::from_secs(120));
        assert_eq!(cost.expense, 1.5);
    }
}
