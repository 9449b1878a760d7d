mod proc_errors;
mod cfg;
mod flatten;
mod orientation;
mod layout;
mod metrics;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;

// Re-export errors
pub use proc_errors::{
    WindingError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::{
    FlattenTarget,
    MetricsTarget,
};
pub use flatten::{
    Bounds,
    FlattenedLoop,
    flatten_loop,
    flatten_loops,
};
pub use orientation::{
    Layer,
    OrientationLabel,
    classify_loop,
    classify_loops,
    mean_normal,
    try_classify_loop,
};
pub use layout::{
    FlatLayout,
    FlatLoopEntry,
    LayerAssignment,
    assign_layers,
    load_flat_layout,
    save_flat_layout,
};
pub use metrics::{
    TraceSpec,
    WindingMetrics,
    total_length,
    trace_resistance,
};

/// A closed winding loop.
/// Ordered points of one discretized current path, closed implicitly
/// (the first point is not repeated at the end).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Loop {
    points: Vec<Point>,
}
impl Loop {
    /// Minimum number of points in a loop.
    pub const MIN_POINTS: usize = 3;

    /// Create a new loop.
    /// Points must be in order -- the loop is closed automatically.
    pub fn new(points: Vec<Point>) -> ProcResult<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(WindingError::MalformedLoop(format!(
                "loop must have at least {} points, got {}", Self::MIN_POINTS, points.len()
            )));
        }
        if let Some((idx, point)) = points.iter().find_position(|p| !p.is_finite()) {
            return Err(WindingError::MalformedLoop(format!(
                "point {} is not finite: {}", idx, point
            )));
        }
        Ok(Loop{points})
    }

    /// Create a loop from raw coordinate rows, as handed over by the contour extractor.
    /// Every row must have exactly three coordinates.
    pub fn from_coords<R: AsRef<[f64]>>(rows: &[R]) -> ProcResult<Self> {
        let mut points = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            match Point::from_slice(row) {
                Some(point) => points.push(point),
                None => return Err(WindingError::MalformedLoop(format!(
                    "point {} has {} coordinates, expected 3", idx, row.len()
                ))),
            }
        }
        Loop::new(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the loop has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of the loop vertices.
    pub fn centroid(&self) -> Point {
        Point::centroid(&self.points).unwrap_or_default()
    }

    /// Largest distance from the centroid to a vertex.
    pub fn extent(&self) -> f64 {
        let centroid = self.centroid();
        self.points.iter()
            .map(|p| p.distance(&centroid))
            .fold(0.0, f64::max)
    }

    /// Consecutive point pairs, including the closing pair (last, first).
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().copied().circular_tuple_windows()
    }

    /// Length of the closed polyline.
    pub fn length(&self) -> f64 {
        self.segments().map(|(p0, p1)| p0.distance(&p1)).sum()
    }

    /// The same loop traversed in the opposite direction.
    pub fn reversed(&self) -> Loop {
        let mut points = self.points.clone();
        points.reverse();
        Loop{points}
    }
}
impl TryFrom<Vec<Point>> for Loop {
    type Error = WindingError;

    fn try_from(points: Vec<Point>) -> ProcResult<Self> {
        Loop::new(points)
    }
}
impl From<Loop> for Vec<Point> {
    fn from(loop_: Loop) -> Self {
        loop_.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Loop {
        Loop::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(3.0, 4.0, 0.0),
        ]).unwrap()
    }

    #[test]
    fn rejects_short_loops() {
        let err = Loop::new(vec![Point::zero(), Point::new(1.0, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, WindingError::MalformedLoop(_)));
    }

    #[test]
    fn rejects_non_finite_points() {
        let err = Loop::new(vec![
            Point::zero(),
            Point::new(f64::NAN, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
        ]).unwrap_err();
        assert!(matches!(err, WindingError::MalformedLoop(_)));
    }

    #[test]
    fn rejects_wrong_dimensionality() {
        let rows = vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0, 0.0]];
        let err = Loop::from_coords(&rows).unwrap_err();
        assert!(matches!(err, WindingError::MalformedLoop(_)));

        let rows = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        assert_eq!(Loop::from_coords(&rows).unwrap().len(), 3);
    }

    #[test]
    fn segments_wrap_around() {
        let segments: Vec<_> = triangle().segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], (Point::new(3.0, 4.0, 0.0), Point::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn closed_length() {
        assert!((triangle().length() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn deserialize_validates() {
        let short = "[{\"x\":0.0,\"y\":0.0,\"z\":0.0},{\"x\":1.0,\"y\":0.0,\"z\":0.0}]";
        assert!(serde_json::from_str::<Loop>(short).is_err());

        let json = serde_json::to_string(&triangle()).unwrap();
        let back: Loop = serde_json::from_str(&json).unwrap();
        assert_eq!(back, triangle());
    }
}
