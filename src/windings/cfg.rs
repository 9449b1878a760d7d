use serde::{Serialize, Deserialize};

use crate::args;
use crate::geo_3d::Point;
use crate::windings::{Bounds, TraceSpec};

/// Flatten stage target.
/// Loads the stored loops, flattens and labels them, and writes the flat layout.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlattenTarget {
    /// Reference origin for the orientation labels.
    #[serde(default)]
    pub origin: Point,

    /// Scale applied to flattened coordinates (1000 converts m to mm).
    #[serde(default = "FlattenTarget::default_scale")]
    pub scale: f64,

    /// Plane offset applied after scaling.
    #[serde(default)]
    pub offset: [f64; 2],

    /// Drop loops that do not fit entirely inside these bounds (after scaling and offset).
    #[serde(default)]
    pub bounds: Option<Bounds>,

    /// Repeat the first point of each loop at its end, for exporters that expect closed outlines.
    #[serde(default, alias = "close")]
    pub close_loops: bool,

    /// Output path for the flat layout file (must be json).
    #[serde(alias = "output", alias = "out", alias = "o")]
    pub output_path: String,
}
impl FlattenTarget {
    pub fn default_scale() -> f64 {
        1.0
    }

    /// Construct a flatten target from a config file.
    pub fn from_cfg_file(cfg_file: &str) -> args::ProcResult<Self> {
        let target: FlattenTarget = crate::io::read_cfg_file(cfg_file)?;

        if !(target.scale.is_finite() && target.scale > 0.0) {
            args::err_str(&format!("Flatten scale must be positive, got {}", target.scale))?;
        }
        if !target.output_path.ends_with(".json") {
            args::err_str("Flatten output path must end with .json")?;
        }

        Ok(target)
    }

    /// Example target, used for printing a config template.
    pub fn example() -> Self {
        FlattenTarget{
            origin: Point::zero(),
            scale: 1000.0,
            offset: [0.0, 0.0],
            bounds: None,
            close_loops: true,
            output_path: "PATH/TO/OUTPUT/FILE.json".to_string(),
        }
    }
}

/// Metrics stage target.
/// Computes the solver-free metrics of the stored loops.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsTarget {
    /// Reference origin for the orientation counts.
    #[serde(default)]
    pub origin: Point,

    /// PCB trace parameters.
    #[serde(default)]
    pub trace: TraceSpec,

    /// Optional output path for the metrics file (must be json).
    #[serde(default, alias = "output", alias = "out", alias = "o")]
    pub output_path: Option<String>,
}
impl MetricsTarget {
    /// Construct a metrics target from a config file.
    pub fn from_cfg_file(cfg_file: &str) -> args::ProcResult<Self> {
        let target: MetricsTarget = crate::io::read_cfg_file(cfg_file)?;

        if !(target.trace.cross_section() > 0.0) {
            args::err_str("Trace width and copper weight must be positive")?;
        }
        if let Some(output_path) = target.output_path.as_ref() {
            if !output_path.ends_with(".json") {
                args::err_str("Metrics output path must end with .json")?;
            }
        }

        Ok(target)
    }

    /// Example target, used for printing a config template.
    pub fn example() -> Self {
        MetricsTarget{
            origin: Point::zero(),
            trace: TraceSpec::default(),
            output_path: Some("OPTIONAL/PATH/TO/OUTPUT/FILE.json".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_cfg_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flatten.yaml");
        crate::io::write_to_file(&path, "output: flat.json\n").unwrap();

        let target = FlattenTarget::from_cfg_file(path.to_str().unwrap()).unwrap();
        assert_eq!(target.scale, 1.0);
        assert_eq!(target.offset, [0.0, 0.0]);
        assert_eq!(target.origin, Point::zero());
        assert!(target.bounds.is_none());
        assert!(!target.close_loops);
    }

    #[test]
    fn flatten_cfg_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flatten.toml");
        crate::io::write_to_file(&path, "output_path = \"flat.json\"\nscale = -2.0\n").unwrap();
        assert!(FlattenTarget::from_cfg_file(path.to_str().unwrap()).is_err());

        crate::io::write_to_file(&path, "output_path = \"flat.dxf\"\n").unwrap();
        assert!(FlattenTarget::from_cfg_file(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn metrics_cfg_parses_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        crate::io::write_to_file(&path, "{\"trace\": {\"trace_width_mm\": 1.0, \"cu_oz\": 1.0}}").unwrap();

        let target = MetricsTarget::from_cfg_file(path.to_str().unwrap()).unwrap();
        assert_eq!(target.trace, TraceSpec{trace_width_mm: 1.0, cu_oz: 1.0});
        assert!(target.output_path.is_none());
    }
}
