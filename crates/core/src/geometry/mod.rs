//! Measurement and query locations

use serde::{Deserialize, Serialize};

/// A location in a planar or geographic coordinate system.
///
/// For geographic coordinates `x` is the longitude and `y` the latitude,
/// both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An observed circular quantity (e.g. wind bearing) at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalSample {
    pub point: Point,
    /// Bearing in degrees. Any real value is accepted; results are
    /// normalized into a single rotation.
    pub value: f64,
}

impl DirectionalSample {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self {
            point: Point::new(x, y),
            value,
        }
    }
}
