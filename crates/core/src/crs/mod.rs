//! Coordinate semantics and the distance capability built on them

use geo::HaversineDistance;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Point;

/// How point coordinates should be interpreted when measuring distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Projected/planar coordinates, Euclidean distance in coordinate units
    #[default]
    Planar,
    /// Longitude/latitude in degrees (WGS84), great-circle distance in metres
    Geographic,
}

impl CoordinateSystem {
    /// Distance between two points; always `>= 0` for finite input.
    ///
    /// Identical points are at distance exactly `0.0` in both systems.
    #[inline]
    pub fn distance(&self, a: &Point, b: &Point) -> f64 {
        match self {
            CoordinateSystem::Planar => {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                (dx * dx + dy * dy).sqrt()
            }
            CoordinateSystem::Geographic => {
                let pa = geo::Point::new(a.x, a.y);
                let pb = geo::Point::new(b.x, b.y);
                pa.haversine_distance(&pb)
            }
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSystem::Planar => write!(f, "planar"),
            CoordinateSystem::Geographic => write!(f, "geographic (EPSG:4326)"),
        }
    }
}
