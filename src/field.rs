/*!
 * Interface to the external magnetic field library.
 *
 * Stream-function optimisation, contour extraction and Biot-Savart evaluation
 * are not done here. They sit behind `FieldSolver`, and this module only
 * drives them and checks what comes back.
 */
mod proc_errors;
mod metrics;

use serde::{Serialize, Deserialize};

use crate::geo_3d::{GeoVector, Point};
use crate::mesh::CoilMesh;
use crate::store::{Artifact, LoopStore};
use crate::targets::CoilAxis;
use crate::windings::Loop;

// Re-export errors
pub use proc_errors::{
    FieldError,
    FieldResult,
    err_str,
};
pub use metrics::{
    efficiency,
    evaluate,
    field_vs_current,
    homogeneity,
    mean_error,
    target_radius_cm,
    CoilScores,
    DEFAULT_ALLOWED_ERROR,
};

/// Absolute error allowed on the target field during optimisation.
pub const DEFAULT_ABS_ERROR: f64 = 0.01;

/// Field specification handed to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub points: Vec<Point>,
    /// Desired field at each point, index-aligned with `points`.
    pub target_field: Vec<GeoVector>,
    pub abs_error: f64,
}
impl TargetSpec {
    /// Field that cancels the undesired ambient field of a coil axis.
    pub fn nulling(axis: CoilAxis, points: &[Point]) -> Self {
        TargetSpec{
            points: points.to_vec(),
            target_field: axis.nulling_field(points),
            abs_error: DEFAULT_ABS_ERROR,
        }
    }
}

/// Optimised stream function, one value per mesh vertex.
/// Opaque to this crate, only passed back to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFunction(pub Vec<f64>);

/// External field solver.
pub trait FieldSolver {
    /// Optimise a stream function on the mesh that produces the target field.
    fn solve(&self, mesh: &CoilMesh, spec: &TargetSpec) -> FieldResult<StreamFunction>;

    /// Extract `n_contours` closed contours of the stream function.
    /// Each contour is an ordered point list, closed implicitly.
    fn extract_contours(&self, mesh: &CoilMesh, stream: &StreamFunction, n_contours: usize) -> FieldResult<Vec<Vec<Point>>>;

    /// Magnetic field (T) of the loops at each point, carrying `current_amps`.
    fn field_at(&self, loops: &[Loop], points: &[Point], current_amps: f64) -> FieldResult<Vec<GeoVector>>;

    /// Field (T) of the continuous stream function at each point, before discretisation.
    fn predict_field(&self, mesh: &CoilMesh, stream: &StreamFunction, points: &[Point]) -> FieldResult<Vec<GeoVector>>;

    /// Self-inductance of the coil wound with `n_loops` loops, in H.
    fn inductance(&self, mesh: &CoilMesh, stream: &StreamFunction, n_loops: usize) -> FieldResult<f64>;
}

/// Design the windings of one coil axis and persist them under the axis key.
///
/// Scales the base mesh by the axis presets, solves for the nulling field at
/// the target points, extracts the contours and validates them into loops.
/// Mesh, loops and target points are only saved once every step succeeded.
pub fn generate_windings<S: FieldSolver + ?Sized>(
    solver: &S,
    store: &LoopStore,
    axis: CoilAxis,
    base_mesh: &CoilMesh,
    target_points: &[Point],
) -> FieldResult<Vec<Loop>> {
    if target_points.is_empty() {
        err_str("No target points to design the coil for")?;
    }
    let design = axis.design();
    tracing::info!("Designing {} coil ({} contours)...", axis, design.n_contours);

    let mesh = base_mesh.scaled(design.diameter_scale, design.height_scale)?;
    let spec = TargetSpec::nulling(axis, target_points);

    let stream = solver.solve(&mesh, &spec)?;
    if stream.0.len() != mesh.vertices.len() {
        tracing::warn!(
            "Stream function has {} values for {} mesh vertices",
            stream.0.len(), mesh.vertices.len()
        );
    }

    let contours = solver.extract_contours(&mesh, &stream, design.n_contours)?;
    let loops = contours.into_iter()
        .map(Loop::new)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!("Extracted {} loops", loops.len());

    store.save_all(&[
        Artifact::Mesh(mesh),
        Artifact::Loops(loops.clone()),
        Artifact::TargetPoints(target_points.to_vec()),
    ], &axis.key())?;

    Ok(loops)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f64::consts::TAU;

    /// Solver double: rings of constant radius and a uniform field per amp.
    pub(crate) struct MockSolver {
        pub field_per_amp: GeoVector,
        /// Field of the continuous solution, before discretisation.
        pub predicted: GeoVector,
        /// Inductance per loop, in H.
        pub loop_inductance: f64,
        pub contour_points: usize,
        pub seen_spec: RefCell<Option<TargetSpec>>,
    }
    impl MockSolver {
        pub(crate) fn new(field_per_amp: GeoVector) -> Self {
            MockSolver{
                field_per_amp,
                predicted: field_per_amp,
                loop_inductance: 2e-6,
                contour_points: 8,
                seen_spec: RefCell::new(None),
            }
        }
    }
    impl FieldSolver for MockSolver {
        fn solve(&self, mesh: &CoilMesh, spec: &TargetSpec) -> FieldResult<StreamFunction> {
            *self.seen_spec.borrow_mut() = Some(spec.clone());
            Ok(StreamFunction(vec![0.0; mesh.vertices.len()]))
        }

        fn extract_contours(&self, mesh: &CoilMesh, _stream: &StreamFunction, n_contours: usize) -> FieldResult<Vec<Vec<Point>>> {
            let radius = mesh.max_radius();
            Ok((0..n_contours).map(|c| {
                let z = 0.1 * c as f64;
                (0..self.contour_points).map(|i| {
                    let theta = TAU * i as f64 / self.contour_points as f64;
                    Point::new(radius * theta.cos(), radius * theta.sin(), z)
                }).collect()
            }).collect())
        }

        fn field_at(&self, _loops: &[Loop], points: &[Point], current_amps: f64) -> FieldResult<Vec<GeoVector>> {
            Ok(vec![self.field_per_amp * current_amps; points.len()])
        }

        fn predict_field(&self, _mesh: &CoilMesh, _stream: &StreamFunction, points: &[Point]) -> FieldResult<Vec<GeoVector>> {
            Ok(vec![self.predicted; points.len()])
        }

        fn inductance(&self, _mesh: &CoilMesh, _stream: &StreamFunction, n_loops: usize) -> FieldResult<f64> {
            Ok(self.loop_inductance * n_loops as f64)
        }
    }

    struct FailingSolver;
    impl FieldSolver for FailingSolver {
        fn solve(&self, _mesh: &CoilMesh, _spec: &TargetSpec) -> FieldResult<StreamFunction> {
            Err(FieldError::Solver("infeasible".to_string()))
        }
        fn extract_contours(&self, _mesh: &CoilMesh, _stream: &StreamFunction, _n: usize) -> FieldResult<Vec<Vec<Point>>> {
            Ok(vec![vec![Point::zero(), Point::new(1.0, 0.0, 0.0)]])
        }
        fn field_at(&self, _loops: &[Loop], points: &[Point], _current_amps: f64) -> FieldResult<Vec<GeoVector>> {
            Ok(vec![GeoVector::zero(); points.len()])
        }
        fn predict_field(&self, _mesh: &CoilMesh, _stream: &StreamFunction, points: &[Point]) -> FieldResult<Vec<GeoVector>> {
            Ok(vec![GeoVector::zero(); points.len()])
        }
        fn inductance(&self, _mesh: &CoilMesh, _stream: &StreamFunction, _n_loops: usize) -> FieldResult<f64> {
            Err(FieldError::Solver("no solution".to_string()))
        }
    }

    /// Two-contour-point solver: contours are too short to be loops.
    struct ShortContourSolver;
    impl FieldSolver for ShortContourSolver {
        fn solve(&self, _mesh: &CoilMesh, _spec: &TargetSpec) -> FieldResult<StreamFunction> {
            Ok(StreamFunction(Vec::new()))
        }
        fn extract_contours(&self, _mesh: &CoilMesh, _stream: &StreamFunction, _n: usize) -> FieldResult<Vec<Vec<Point>>> {
            Ok(vec![vec![Point::zero(), Point::new(1.0, 0.0, 0.0)]])
        }
        fn field_at(&self, _loops: &[Loop], points: &[Point], _current_amps: f64) -> FieldResult<Vec<GeoVector>> {
            Ok(vec![GeoVector::zero(); points.len()])
        }
        fn predict_field(&self, _mesh: &CoilMesh, _stream: &StreamFunction, points: &[Point]) -> FieldResult<Vec<GeoVector>> {
            Ok(vec![GeoVector::zero(); points.len()])
        }
        fn inductance(&self, _mesh: &CoilMesh, _stream: &StreamFunction, _n_loops: usize) -> FieldResult<f64> {
            Err(FieldError::Solver("no solution".to_string()))
        }
    }

    pub(crate) fn unit_cylinder() -> CoilMesh {
        let mut vertices = Vec::new();
        for z in [-1.0, 1.0] {
            for i in 0..6 {
                let theta = TAU * i as f64 / 6.0;
                vertices.push(Point::new(theta.cos(), theta.sin(), z));
            }
        }
        let faces = (0..6)
            .flat_map(|i| {
                let j = (i + 1) % 6;
                [[i, j, i + 6], [j, j + 6, i + 6]]
            })
            .collect();
        CoilMesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn generates_and_persists_windings() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        let solver = MockSolver::new(GeoVector::new(0.0, 0.0, 1e-6));
        let points = vec![Point::zero(), Point::new(0.05, 0.0, 0.0)];

        let loops = generate_windings(&solver, &store, CoilAxis::Y, &unit_cylinder(), &points).unwrap();
        assert_eq!(loops.len(), 11);

        // Mesh scaled by the Y presets
        let mesh = store.load_mesh("Y").unwrap();
        assert!((mesh.max_radius() - 0.98).abs() < 1e-12);
        assert!(mesh.vertices.iter().all(|v| v.z.abs() <= 0.25 + 1e-12));

        assert_eq!(store.load_loops("Y").unwrap(), loops);
        assert_eq!(store.load_target_points("Y").unwrap(), points);

        let spec = solver.seen_spec.borrow().clone().unwrap();
        assert_eq!(spec.abs_error, 0.01);
        assert_eq!(spec.target_field, vec![GeoVector::new(0.0, 0.0, -25e-9); 2]);
    }

    #[test]
    fn solver_failure_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        let result = generate_windings(&FailingSolver, &store, CoilAxis::Z, &unit_cylinder(), &[Point::zero()]);
        assert!(matches!(result, Err(FieldError::Solver(_))));
        assert!(!store.contains(crate::store::ArtifactKind::Mesh, "Z"));
    }

    #[test]
    fn short_contours_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        let result = generate_windings(&ShortContourSolver, &store, CoilAxis::X, &unit_cylinder(), &[Point::zero()]);
        assert!(matches!(
            result,
            Err(FieldError::WindingError(crate::windings::WindingError::MalformedLoop(_)))
        ));
        assert!(!store.contains(crate::store::ArtifactKind::Loops, "X"));
    }

    #[test]
    fn blocked_store_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        std::fs::create_dir(dir.path().join("loops_Y.json")).unwrap();

        let solver = MockSolver::new(GeoVector::new(0.0, 0.0, 1e-6));
        let result = generate_windings(&solver, &store, CoilAxis::Y, &unit_cylinder(), &[Point::zero()]);

        assert!(matches!(result, Err(FieldError::StoreError(_))));
        assert!(!store.contains(crate::store::ArtifactKind::Mesh, "Y"));
        assert!(!store.contains(crate::store::ArtifactKind::TargetPoints, "Y"));
    }

    #[test]
    fn needs_target_points() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        let solver = MockSolver::new(GeoVector::zero());
        assert!(generate_windings(&solver, &store, CoilAxis::X, &unit_cylinder(), &[]).is_err());
    }
}
