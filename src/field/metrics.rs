use serde::{Serialize, Deserialize};

use crate::field::{self, FieldResult, FieldSolver, StreamFunction, TargetSpec};
use crate::geo_3d::{GeoVector, Point};
use crate::mesh::CoilMesh;
use crate::windings::{Loop, TraceSpec, WindingMetrics};

/// Relative error under which a target point counts as homogeneous.
pub const DEFAULT_ALLOWED_ERROR: f64 = 0.05;

/// Field magnitude (T) at one point for each drive current, in mA.
pub fn field_vs_current<S: FieldSolver + ?Sized>(
    solver: &S,
    loops: &[Loop],
    point: Point,
    currents_ma: &[f64],
) -> FieldResult<Vec<f64>> {
    let unit_field = solver.field_at(loops, &[point], 1.0)?;
    let magnitude = match unit_field.first() {
        Some(b) => b.norm(),
        None => return field::err_str("Solver returned no field for the evaluation point"),
    };
    Ok(currents_ma.iter().map(|ma| magnitude * ma * 1e-3).collect())
}

/// Mean field component over the points per unit current, in nT/mA.
pub fn efficiency<S: FieldSolver + ?Sized>(
    solver: &S,
    loops: &[Loop],
    points: &[Point],
    component: usize,
) -> FieldResult<f64> {
    if points.is_empty() {
        field::err_str("Efficiency needs at least one evaluation point")?;
    }
    let field = solver.field_at(loops, points, 1.0)?;
    let values = components(&field, component)?;
    Ok(values.iter().map(|b| b * 1e-3 * 1e9).sum::<f64>() / values.len() as f64)
}

/// Percentage of points whose relative error on the component is within `allowed_error`.
pub fn homogeneity(
    predicted: &[GeoVector],
    target: &[GeoVector],
    component: usize,
    allowed_error: f64,
) -> FieldResult<f64> {
    let errors = relative_errors(predicted, target, component)?;
    let count = errors.iter().filter(|e| **e <= allowed_error).count();
    Ok(count as f64 / errors.len() as f64 * 100.0)
}

/// Mean relative error on the component, in percent.
pub fn mean_error(predicted: &[GeoVector], target: &[GeoVector], component: usize) -> FieldResult<f64> {
    let errors = relative_errors(predicted, target, component)?;
    Ok(errors.iter().sum::<f64>() / errors.len() as f64 * 100.0)
}

/// Largest z of the target points, in cm.
pub fn target_radius_cm(points: &[Point]) -> FieldResult<f64> {
    match points.iter().map(|p| p.z).reduce(f64::max) {
        Some(z) => Ok(z * 100.0),
        None => field::err_str("No target points to measure"),
    }
}

/// Evaluation scores of a designed coil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilScores {
    /// Mean field of the loops per unit current, in nT/mA.
    pub efficiency: f64,
    /// Mean relative error of the continuous solution, in percent.
    pub error: f64,
    /// Share of target points within the allowed error, in percent.
    pub homogeneity: f64,
    /// Self-inductance in uH.
    pub inductance_uh: f64,
    pub target_radius_cm: f64,
    /// Length, resistance and orientation counts of the loops.
    pub windings: WindingMetrics,
}
impl std::fmt::Display for CoilScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Efficiency: {:.4} nT/mA", self.efficiency)?;
        writeln!(f, "Error: {:.2} %", self.error)?;
        writeln!(f, "Homogeneity: {:.2} %", self.homogeneity)?;
        writeln!(f, "Inductance: {:.4} uH", self.inductance_uh)?;
        writeln!(f, "Target radius: {:.2} cm", self.target_radius_cm)?;
        write!(f, "{}", self.windings)
    }
}

/// Score a coil: its loops, the stream function they came from, and the target
/// they were designed for. `component` is the field component the coil drives.
pub fn evaluate<S: FieldSolver + ?Sized>(
    solver: &S,
    mesh: &CoilMesh,
    stream: &StreamFunction,
    loops: &[Loop],
    target: &TargetSpec,
    component: usize,
    trace: TraceSpec,
) -> FieldResult<CoilScores> {
    let predicted = solver.predict_field(mesh, stream, &target.points)?;
    let inductance = solver.inductance(mesh, stream, loops.len())?;

    Ok(CoilScores{
        efficiency: efficiency(solver, loops, &target.points, component)?,
        error: mean_error(&predicted, &target.target_field, component)?,
        homogeneity: homogeneity(&predicted, &target.target_field, component, DEFAULT_ALLOWED_ERROR)?,
        inductance_uh: inductance * 1e6,
        target_radius_cm: target_radius_cm(&target.points)?,
        windings: WindingMetrics::compute(loops, Point::zero(), trace),
    })
}

fn components(field: &[GeoVector], component: usize) -> FieldResult<Vec<f64>> {
    field.iter()
        .map(|b| b.component(component)
            .ok_or_else(|| field::FieldError::StringOnly(format!("Invalid field component index {}", component))))
        .collect()
}

/// |predicted - target| / |target| per point, on one component.
fn relative_errors(predicted: &[GeoVector], target: &[GeoVector], component: usize) -> FieldResult<Vec<f64>> {
    if predicted.len() != target.len() {
        field::err_str(&format!("{} predicted field values but {} target values", predicted.len(), target.len()))?;
    }
    if target.is_empty() {
        field::err_str("No field values to compare")?;
    }
    let predicted = components(predicted, component)?;
    let target = components(target, component)?;

    predicted.iter().zip(target.iter()).enumerate()
        .map(|(idx, (p, t))| {
            if *t == 0.0 {
                return field::err_str(&format!("Target field component is zero at point {}", idx));
            }
            Ok(((p - t) / t).abs())
        })
        .collect()
}
