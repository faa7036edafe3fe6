//! Geographic coordinate type and spherical helpers.
//!
//! `Point` uses `f64` latitude/longitude.  The animator snaps the vehicle
//! onto waypoints by exact assignment and accumulates thousands of small
//! deltas per leg, so single precision would visibly wander at city scale.
//!
//! Both helpers use a sphere of radius [`EARTH_RADIUS_M`], the WGS-84
//! equatorial radius that browser map SDKs use for their spherical geometry,
//! so distances agree with the routing provider's own numbers.

use std::fmt;

use crate::{CabError, CabResult};

/// Sphere radius in metres used by [`distance_between`].
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Like [`Point::new`] but rejects non-finite values and coordinates
    /// outside `[-90, 90] × [-180, 180]`.
    pub fn try_new(lat: f64, lon: f64) -> CabResult<Self> {
        let point = Self { lat, lon };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(CabError::InvalidCoordinate { lat, lon })
        }
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance to `other` in metres.
    #[inline]
    pub fn distance_m(self, other: Point) -> f64 {
        distance_between(self, other)
    }

    /// Initial bearing from `self` towards `other`.
    #[inline]
    pub fn heading_to(self, other: Point) -> Heading {
        heading_between(self, other)
    }

    /// Planar offset in degrees.  No wrapping at the antimeridian.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Point {
        Point::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// Compass bearing in degrees clockwise from north, always in `[0, 360)`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading(f64);

impl Heading {
    pub const NORTH: Heading = Heading(0.0);
    pub const EAST: Heading = Heading(90.0);
    pub const SOUTH: Heading = Heading(180.0);
    pub const WEST: Heading = Heading(270.0);

    /// Normalise any angle in degrees into `[0, 360)`.
    pub fn from_degrees(degrees: f64) -> Self {
        let d = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
        Heading(if d >= 360.0 { 0.0 } else { d })
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Smallest absolute angle between two headings, in `[0, 180]`.
    pub fn difference(self, other: Heading) -> f64 {
        let d = (self.0 - other.0).abs();
        d.min(360.0 - d)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

// ── Spherical helpers ─────────────────────────────────────────────────────────

/// Initial great-circle bearing from `from` to `to`.
///
/// Identical points have no defined bearing; this returns north for them.
pub fn heading_between(from: Point, to: Point) -> Heading {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    Heading::from_degrees(y.atan2(x).to_degrees())
}

/// Haversine great-circle distance in metres.
pub fn distance_between(a: Point, b: Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
