use std::fmt;
use std::hash::{Hash, Hasher};

use geo::{Coord, Distance as _, Haversine};

/// What kind of place a [`Point`] is.
///
/// Only [`Category::Food`] carries planning semantics: meal windows are
/// satisfied by arriving at a food point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Somewhere to sleep.
    Lodging,
    /// Somewhere to eat.
    Food,
    /// Somewhere to look around.
    Sightseeing,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lodging => "lodging",
            Self::Food => "food",
            Self::Sightseeing => "sightseeing",
        };
        f.write_str(label)
    }
}

/// A place on the itinerary.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// Points have no identity beyond their content. Two points are equal when
/// their name, coordinates and category match; the dwell duration does not
/// take part in equality, so a duplicated stop with a different dwell is
/// still a duplicate.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Category, Point};
///
/// let museum = Point::new("Museum", Coord { x: 126.97, y: 37.57 }, Category::Sightseeing, 60);
/// let again = Point::new("Museum", Coord { x: 126.97, y: 37.57 }, Category::Sightseeing, 30);
/// let cafe = Point::new("Museum", Coord { x: 126.97, y: 37.57 }, Category::Food, 60);
///
/// assert_eq!(museum, again);
/// assert_ne!(museum, cafe);
/// ```
#[derive(Debug, Clone)]
pub struct Point {
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Kind of place.
    pub category: Category,
    /// Required time spent at the point, in minutes.
    pub dwell_minutes: u32,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: Coord<f64>,
        category: Category,
        dwell_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            category,
            dwell_minutes,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.location.x
    }

    /// Return a copy of the point with its dwell time cleared.
    ///
    /// Start and end points never hold the traveller.
    #[must_use]
    pub fn without_dwell(&self) -> Self {
        Self {
            dwell_minutes: 0,
            ..self.clone()
        }
    }

    /// Great-circle distance to `other` in metres.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_metres(self.location, other.location)
    }

    fn identity(&self) -> (&str, u64, u64, Category) {
        (
            self.name.as_str(),
            self.location.y.to_bits(),
            self.location.x.to_bits(),
            self.category,
        )
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// A plain latitude/longitude pair for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<Coord<f64>> for LatLng {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

/// Great-circle distance between two WGS84 coordinates in metres.
///
/// Uses the haversine formula on a sphere of the GRS80 mean radius.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::haversine_metres;
///
/// let here = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(haversine_metres(here, here), 0.0);
/// ```
#[must_use]
pub fn haversine_metres(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(geo::Point::from(from), geo::Point::from(to))
}
