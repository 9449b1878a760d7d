use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;
use crate::windings::{self, Loop, OrientationLabel};

/// Copper resistivity at 25 C, in ohm-m.
const COPPER_RESISTIVITY: f64 = 1.72e-8;
/// Copper thickness per ounce per square foot, in m.
const OZ_THICKNESS: f64 = 35e-6;

/// PCB trace parameters used for the resistance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceSpec {
    /// Trace width in mm.
    #[serde(default = "TraceSpec::default_trace_width_mm", alias = "width")]
    pub trace_width_mm: f64,
    /// Copper weight in oz per square foot.
    #[serde(default = "TraceSpec::default_cu_oz", alias = "oz")]
    pub cu_oz: f64,
}
impl TraceSpec {
    pub fn default_trace_width_mm() -> f64 {
        5.0
    }
    pub fn default_cu_oz() -> f64 {
        2.0
    }

    /// Copper cross-section area in m^2.
    pub fn cross_section(&self) -> f64 {
        (self.trace_width_mm * 1e-3) * (self.cu_oz * OZ_THICKNESS)
    }
}
impl Default for TraceSpec {
    fn default() -> Self {
        TraceSpec{
            trace_width_mm: TraceSpec::default_trace_width_mm(),
            cu_oz: TraceSpec::default_cu_oz(),
        }
    }
}

/// Total wire length of all loops (each closed), in the loops' units.
pub fn total_length(loops: &[Loop]) -> f64 {
    loops.iter().map(Loop::length).sum()
}

/// DC resistance of a trace of the given length (in m), in ohms.
pub fn trace_resistance(length_m: f64, trace: &TraceSpec) -> f64 {
    COPPER_RESISTIVITY * length_m / trace.cross_section()
}

/// Solver-free summary of a winding set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingMetrics {
    pub loop_count: usize,
    pub point_count: usize,
    pub inward_count: usize,
    pub outward_count: usize,
    /// Total wire length in m.
    pub length_m: f64,
    /// Trace resistance in ohms.
    pub resistance_ohm: f64,
    pub trace: TraceSpec,
}
impl WindingMetrics {
    /// Compute metrics for loops given in metres.
    pub fn compute(loops: &[Loop], origin: Point, trace: TraceSpec) -> Self {
        let labels = windings::classify_loops(loops, origin);
        let inward_count = labels.iter().filter(|l| **l == OrientationLabel::Inward).count();
        let length_m = total_length(loops);

        WindingMetrics{
            loop_count: loops.len(),
            point_count: loops.iter().map(Loop::len).sum(),
            inward_count,
            outward_count: labels.len() - inward_count,
            length_m,
            resistance_ohm: trace_resistance(length_m, &trace),
            trace,
        }
    }
}
impl std::fmt::Display for WindingMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Loops: {} ({} points)", self.loop_count, self.point_count)?;
        writeln!(f, "Orientation: {} inward, {} outward", self.inward_count, self.outward_count)?;
        writeln!(f, "Wire length: {:.4} m", self.length_m)?;
        write!(f, "Resistance: {:.4} ohm ({} mm trace, {} oz copper)",
            self.resistance_ohm, self.trace.trace_width_mm, self.trace.cu_oz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64, z: f64) -> Loop {
        Loop::new(vec![
            Point::new(1.0, 0.0, z),
            Point::new(1.0, side, z),
            Point::new(1.0, side, z + side),
            Point::new(1.0, 0.0, z + side),
        ]).unwrap()
    }

    #[test]
    fn resistance_matches_calculator() {
        // 1 m of 5 mm, 2 oz copper: 1.72e-8 / (5e-3 * 70e-6) = 0.04914 ohm
        let r = trace_resistance(1.0, &TraceSpec::default());
        assert!((r - 0.049142857).abs() < 1e-8, "r={r}");
    }

    #[test]
    fn metrics_sum_over_loops() {
        let loops = vec![square(0.5, 0.0), square(0.25, 1.0).reversed()];
        let metrics = WindingMetrics::compute(&loops, Point::zero(), TraceSpec::default());
        assert_eq!(metrics.loop_count, 2);
        assert_eq!(metrics.point_count, 8);
        assert_eq!(metrics.inward_count + metrics.outward_count, 2);
        assert_ne!(metrics.inward_count, 2);
        assert!((metrics.length_m - 3.0).abs() < 1e-12);
        assert!((metrics.resistance_ohm - 3.0 * trace_resistance(1.0, &metrics.trace)).abs() < 1e-12);
    }

    #[test]
    fn trace_spec_defaults_from_cfg() {
        let trace: TraceSpec = serde_yaml::from_str("width: 2.5").unwrap();
        assert_eq!(trace, TraceSpec{trace_width_mm: 2.5, cu_oz: 2.0});
        assert!(serde_yaml::from_str::<TraceSpec>("bogus: 1").is_err());
    }
}
