use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter, EnumString};

use crate::geo_3d::{GeoVector, Point};
use crate::windings::{Loop, ProcResult, WindingError};

/// Relative tolerance (against the squared loop extent) below which the mean normal is degenerate.
const NORMAL_TOLERANCE: f64 = 1e-12;
/// Relative tolerance (against the loop extent) below which the loop counts as centred on the origin.
const OFFSET_TOLERANCE: f64 = 1e-9;

/// Circulation sense of a loop relative to a reference origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrientationLabel {
    /// Mean normal points against the centroid offset (or the offset is zero).
    Inward,
    /// Mean normal points along the centroid offset.
    Outward,
}
impl OrientationLabel {
    /// Fabrication layer for this label.
    pub fn layer(&self) -> Layer {
        match self {
            OrientationLabel::Inward => Layer::Front,
            OrientationLabel::Outward => Layer::Back,
        }
    }

    /// Display palette colour for this label.
    pub fn color(&self) -> &'static str {
        match self {
            OrientationLabel::Inward => "r",
            OrientationLabel::Outward => "b",
        }
    }

    pub fn opposite(&self) -> OrientationLabel {
        match self {
            OrientationLabel::Inward => OrientationLabel::Outward,
            OrientationLabel::Outward => OrientationLabel::Inward,
        }
    }
}

/// Copper layer a loop is routed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum Layer {
    #[serde(rename = "F.Cu")]
    #[strum(serialize = "F.Cu")]
    Front,
    #[serde(rename = "B.Cu")]
    #[strum(serialize = "B.Cu")]
    Back,
}

/// Unit mean normal of a loop.
/// Averages `segment x vertex` over all vertices, with the closing segment
/// running from the last vertex back to the first.
pub fn mean_normal(loop_: &Loop) -> ProcResult<GeoVector> {
    let mut sum = GeoVector::zero();
    for (p0, p1) in loop_.segments() {
        let segment = p1 - p0;
        sum += segment.cross(&p0.into());
    }
    let mean = sum / loop_.len() as f64;

    let extent = loop_.extent();
    mean.try_normalize(NORMAL_TOLERANCE * extent * extent)
        .ok_or_else(|| WindingError::DegenerateGeometry(format!(
            "mean normal {:e} is too small for a loop of extent {:e}", mean.norm(), extent
        )))
}

/// Classify one loop, reporting degenerate normals as errors.
/// Loops centred on the origin are judged against the cylinder axis (+z) instead of the centroid offset.
pub fn try_classify_loop(loop_: &Loop, origin: Point) -> ProcResult<OrientationLabel> {
    let normal = mean_normal(loop_)?;

    let offset = loop_.centroid() - origin;
    let reference = if offset.norm() <= OFFSET_TOLERANCE * loop_.extent() {
        GeoVector::zhat()
    } else {
        offset
    };

    if normal.dot(&reference) > 0.0 {
        Ok(OrientationLabel::Outward)
    } else {
        Ok(OrientationLabel::Inward)
    }
}

/// Classify one loop, falling back to `Inward` when the normal is degenerate.
pub fn classify_loop(loop_: &Loop, origin: Point) -> OrientationLabel {
    match try_classify_loop(loop_, origin) {
        Ok(label) => label,
        Err(error) => {
            tracing::warn!("Falling back to {} for degenerate loop:\n{}", OrientationLabel::Inward, error);
            OrientationLabel::Inward
        },
    }
}

/// Classify every loop against the origin, keeping input order.
pub fn classify_loops(loops: &[Loop], origin: Point) -> Vec<OrientationLabel> {
    loops.iter().map(|loop_| classify_loop(loop_, origin)).collect()
}
