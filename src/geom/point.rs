//! Planar point / vector value type
//!
//! A `Point` doubles as a displacement vector: the table code subtracts two
//! points to get a direction and adds it back to move along it.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{GeometryError, GeometryResult};

/// A point (or displacement) on the table plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Divide both components by `scalar`
    ///
    /// Unlike `Mul`, this is fallible: a zero divisor is rejected instead of
    /// producing infinities.
    pub fn divide(self, scalar: f64) -> GeometryResult<Point> {
        if scalar == 0.0 {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Point::new(self.x / scalar, self.y / scalar))
    }

    /// Euclidean magnitude √(x² + y²)
    #[inline]
    pub fn precise_length(self) -> f64 {
        DVec2::from(self).length()
    }

    /// Magnitude rounded down to a whole number of units
    #[inline]
    pub fn truncated_length(self) -> u64 {
        self.precise_length().floor() as u64
    }

    /// Distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).precise_length()
    }

    /// True when both coordinates are within `tolerance` of `other`'s
    pub fn near(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    /// The components as an `(x, y)` pair
    #[inline]
    pub fn to_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        p.to_tuple()
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
