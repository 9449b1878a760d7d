use std::f64::consts::TAU;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;
use crate::windings::Loop;

/// Tolerance used when deciding whether a flattened loop is already closed.
const CLOSED_TOLERANCE: f64 = 1e-9;

/// A loop unwrapped from the cylinder onto the fabrication plane.
/// Index-aligned with its source `Loop`; the third coordinate is always 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct FlattenedLoop {
    points: Vec<Point>,
}
impl FlattenedLoop {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return the loop with its first point repeated at the end,
    /// unless it already ends where it starts.
    pub fn closed(&self) -> FlattenedLoop {
        let mut points = self.points.clone();
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if points.len() < 2 || !first.approx_eq(&last, CLOSED_TOLERANCE) {
                points.push(first);
            }
        }
        FlattenedLoop{points}
    }

    /// Scale the plane coordinates (e.g. 1000 for metres to millimetres).
    pub fn scaled(&self, factor: f64) -> FlattenedLoop {
        let points = self.points.iter()
            .map(|p| Point::new(p.x * factor, p.y * factor, 0.0))
            .collect();
        FlattenedLoop{points}
    }

    /// Shift the loop within the plane.
    pub fn translated(&self, dx: f64, dy: f64) -> FlattenedLoop {
        let points = self.points.iter()
            .map(|p| Point::new(p.x + dx, p.y + dy, 0.0))
            .collect();
        FlattenedLoop{points}
    }

    /// Axis-aligned bounds of the loop. `None` for an empty loop.
    pub fn bounds(&self) -> Option<Bounds> {
        let (min_x, max_x) = self.points.iter()
            .map(|p| p.x)
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()?;
        let (min_y, max_y) = self.points.iter()
            .map(|p| p.y)
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()?;
        Some(Bounds{min_x, max_x, min_y, max_y})
    }
}
impl From<Vec<Point>> for FlattenedLoop {
    /// Planarize a point list (the third coordinate is dropped to 0).
    fn from(points: Vec<Point>) -> Self {
        let points = points.into_iter()
            .map(|p| Point::new(p.x, p.y, 0.0))
            .collect();
        FlattenedLoop{points}
    }
}
impl From<FlattenedLoop> for Vec<Point> {
    fn from(flat: FlattenedLoop) -> Self {
        flat.points
    }
}

/// Axis-aligned rectangle on the fabrication plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}
impl Bounds {
    /// Check whether `other` lies entirely inside these bounds.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x && other.max_x <= self.max_x
            && other.min_y >= self.min_y && other.max_y <= self.max_y
    }

    /// Smallest bounds covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds{
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Azimuth of a point, unwrapped into [0, 2pi). The flattened seam sits on the +x axis.
fn unwrapped_azimuth(point: &Point) -> f64 {
    let theta = point.azimuth();
    if theta < 0.0 {
        theta + TAU
    } else {
        theta
    }
}

/// Unwrap a loop lying on a z-axis cylinder onto the plane.
/// Each point maps to (theta * r, z, 0): the angle is weighted by the
/// point's own radius so loops at different radii keep comparable arc lengths.
/// A point on the axis (r = 0) maps to x = 0.
pub fn flatten_loop(loop_: &Loop) -> FlattenedLoop {
    let points = loop_.points().iter()
        .map(|p| {
            let r = p.radius_xy();
            let theta = unwrapped_azimuth(p);
            Point::new(theta * r, p.z, 0.0)
        })
        .collect();
    FlattenedLoop{points}
}

/// Flatten every loop, keeping input order.
pub fn flatten_loops(loops: &[Loop]) -> Vec<FlattenedLoop> {
    loops.iter().map(flatten_loop).collect()
}
