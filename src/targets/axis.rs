use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter, EnumString};

use crate::geo_3d::{GeoVector, Point};

/// Ambient field magnitude each coil is designed to null, in T.
pub const UNDESIRED_FIELD_T: f64 = 25e-9;

/// Coil axis, in the shielded room's frame.
/// The label doubles as the store key for the coil's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CoilAxis {
    X,
    Y,
    Z,
}

/// Per-axis design presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoilDesign {
    /// Number of contour loops extracted from the stream function.
    pub n_contours: usize,
    /// Scale applied to the unit mesh x and y coordinates.
    pub diameter_scale: f64,
    /// Scale applied to the unit mesh z coordinate.
    pub height_scale: f64,
}

impl CoilAxis {
    /// Store key for this axis.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Design presets for this axis.
    pub fn design(&self) -> CoilDesign {
        let (n_contours, diameter_scale) = match self {
            CoilAxis::X => (3, 1.0),
            CoilAxis::Y => (11, 0.98),
            CoilAxis::Z => (3, 0.96),
        };
        CoilDesign{n_contours, diameter_scale, height_scale: 0.50 / 2.0}
    }

    /// Component index (0 = x, 1 = y, 2 = z) of the mesh-frame field this coil nulls.
    /// The cylinder's frame is rotated against the room's, hence the shuffle.
    pub fn field_component(&self) -> usize {
        match self {
            CoilAxis::X => 1,
            CoilAxis::Y => 2,
            CoilAxis::Z => 0,
        }
    }

    /// Undesired ambient field at each point.
    pub fn undesired_field(&self, points: &[Point], magnitude: f64) -> Vec<GeoVector> {
        let mut field = GeoVector::zero();
        match self.field_component() {
            0 => field.x = magnitude,
            1 => field.y = magnitude,
            _ => field.z = magnitude,
        }
        vec![field; points.len()]
    }

    /// Target field that cancels the undesired field at each point.
    pub fn nulling_field(&self, points: &[Point]) -> Vec<GeoVector> {
        self.undesired_field(points, UNDESIRED_FIELD_T)
            .into_iter()
            .map(|b| -b)
            .collect()
    }
}
