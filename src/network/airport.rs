//! Domain payloads for the airport network.
//!
//! [`Airport`] is the vertex payload and [`Route`] the edge payload of the
//! network graph. Their `PartialEq` impls carry the domain's duplicate
//! rules: airports are equal on case-insensitive name, routes on the
//! unordered pair of endpoint codes with distance ignored.

use core::fmt;

use crate::weight::Weighted;

/// Geographic position of an airport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in meters.
    pub altitude: f64,
}

/// An airport: name, short code, screen position, and geographic location.
#[derive(Debug, Clone)]
pub struct Airport {
    /// Full display name, unique per network (case-insensitive).
    pub name: String,
    /// Short identifier used in route records and exports.
    pub code: String,
    /// Screen coordinates used by dataset layouts.
    pub position: (i32, i32),
    /// Geographic location.
    pub location: GeoPoint,
}

impl Airport {
    /// Creates an airport at the origin with a zeroed location.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            position: (0, 0),
            location: GeoPoint::default(),
        }
    }

    /// Sets the screen position.
    #[must_use]
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    /// Sets the geographic location.
    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64, altitude: f64) -> Self {
        self.location = GeoPoint {
            latitude,
            longitude,
            altitude,
        };
        self
    }
}

/// Equality is the domain duplicate rule: case-insensitive name.
impl PartialEq for Airport {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Airport {}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// A route joining two airports, identified by their codes.
///
/// The endpoint codes are stored, not handles, so a route record stays
/// meaningful outside any particular graph (exports, events, reports).
#[derive(Debug, Clone)]
pub struct Route {
    /// Code of one endpoint.
    pub origin: String,
    /// Code of the other endpoint.
    pub destination: String,
    /// Route length; the additive cost used by the path engine.
    pub distance: u32,
}

impl Route {
    /// Creates a route between two airport codes.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, distance: u32) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance,
        }
    }

    /// Whether this route joins `a` and `b` in either orientation,
    /// case-insensitively.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.origin.eq_ignore_ascii_case(a) && self.destination.eq_ignore_ascii_case(b))
            || (self.origin.eq_ignore_ascii_case(b) && self.destination.eq_ignore_ascii_case(a))
    }
}

/// Equality is the domain duplicate rule: same unordered endpoint pair,
/// distance ignored.
impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.joins(&other.origin, &other.destination)
    }
}

impl Eq for Route {}

impl Weighted for Route {
    type Cost = u32;

    fn weight(&self) -> u32 {
        self.distance
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.origin, self.destination, self.distance)
    }
}
