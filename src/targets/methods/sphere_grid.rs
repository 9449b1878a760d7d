use serde::{Serialize, Deserialize};
use itertools::iproduct;

use crate::geo_3d::Point;
use crate::targets::{self, methods};

/// Sphere Grid Method struct.
/// Evaluation points on a cubic grid, keeping only those strictly inside the
/// inscribed sphere. The grid is built around the origin, then shifted to `center`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Centre of the grid and sphere.
    #[serde(default = "Point::zero")]
    center: Point,
    /// Side length of the cube (the sphere diameter), in m.
    #[serde(default = "Method::default_sidelength", alias = "side")]
    sidelength: f64,
    /// Grid points per side.
    #[serde(default = "Method::default_n", alias = "points_per_side")]
    n: usize,
}
impl Method {
    pub fn default_sidelength() -> f64 {
        0.4
    }
    pub fn default_n() -> usize {
        9
    }
}
impl Default for Method {
    fn default() -> Self {
        Method{
            center: Point::zero(),
            sidelength: Self::default_sidelength(),
            n: Self::default_n(),
        }
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n).map(|i| start + (stop - start) * i as f64 / (n - 1) as f64).collect(),
    }
}

impl methods::TargetMethodTrait for Method {
    fn get_method_name(&self) -> &'static str {
        "Sphere Grid"
    }

    fn generate(&self) -> targets::ProcResult<Vec<Point>> {
        if !(self.sidelength.is_finite() && self.sidelength > 0.0) {
            targets::err_str(&format!("Sphere grid side length must be positive, got {}", self.sidelength))?;
        }
        if self.n == 0 {
            targets::err_str("Sphere grid needs at least one point per side")?;
        }
        if !self.center.is_finite() {
            targets::err_str(&format!("Sphere grid centre is not finite: {}", self.center))?;
        }

        let half = self.sidelength / 2.0;
        let values = linspace(-half, half, self.n);

        let points: Vec<Point> = iproduct!(values.iter(), values.iter(), values.iter())
            .map(|(&x, &y, &z)| Point::new(x, y, z))
            .filter(|p| p.distance(&Point::zero()) < half)
            .map(|p| Point::new(p.x + self.center.x, p.y + self.center.y, p.z + self.center.z))
            .collect();

        tracing::debug!("Sphere grid: {} points ({} per side, side {} m)", points.len(), self.n, self.sidelength);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::methods::TargetMethodTrait;

    fn grid(sidelength: f64, n: usize) -> Method {
        Method{center: Point::zero(), sidelength, n}
    }

    #[test]
    fn default_grid_count() {
        let points = Method::default().generate().unwrap();
        assert_eq!(points.len(), 251);
        assert!(points.contains(&Point::zero()));
        // Grid order is x-major
        assert!((points[0].x + 0.15).abs() < 1e-12);
        assert!((points[0].y + 0.1).abs() < 1e-12);
        assert!((points[0].z + 0.05).abs() < 1e-12);
    }

    #[test]
    fn strictly_inside_sphere() {
        let points = grid(0.1, 4).generate().unwrap();
        // Only the 8 inner corners survive
        assert_eq!(points.len(), 8);
        for p in &points {
            assert!(p.distance(&Point::zero()) < 0.05);
        }

        // A single value per side is the lower corner, outside the sphere
        let points = grid(1.0, 1).generate().unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn offset_center() {
        let center = Point::new(0.1, -0.2, 0.3);
        let method = Method{center, sidelength: 0.1, n: 4};
        let points = method.generate().unwrap();
        assert_eq!(points.len(), 8);
        for p in &points {
            assert!(p.distance(&center) < 0.05 + 1e-12);
        }
    }

    #[test]
    fn rejects_bad_args() {
        assert!(grid(0.0, 9).generate().is_err());
        assert!(grid(-1.0, 9).generate().is_err());
        assert!(grid(0.4, 0).generate().is_err());
    }

    #[test]
    fn parses_args_with_defaults() {
        let method: Method = serde_yaml::from_str("side: 0.2").unwrap();
        assert_eq!(method.sidelength, 0.2);
        assert_eq!(method.n, 9);
        assert!(serde_yaml::from_str::<Method>("radius: 0.2").is_err());
    }
}
