mod proc_errors;

use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;

// Re-export errors
pub use proc_errors::{
    MeshError,
    ProcResult,
    err_str,
};

/// Triangle mesh of the coil former, companion to the loops extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoilMesh")]
pub struct CoilMesh {
    pub vertices: Vec<Point>,
    pub faces: Vec<[usize; 3]>,
}

/// Unchecked mesh, as read from a stored artifact.
#[derive(Deserialize)]
struct RawCoilMesh {
    vertices: Vec<Point>,
    faces: Vec<[usize; 3]>,
}

impl CoilMesh {
    /// Create a new mesh, checking that every face index refers to a vertex.
    pub fn new(vertices: Vec<Point>, faces: Vec<[usize; 3]>) -> ProcResult<Self> {
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(vertex) = face.iter().find(|v| **v >= vertices.len()) {
                return Err(MeshError::InvalidFace{
                    face: face_idx,
                    vertex: *vertex,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(CoilMesh{vertices, faces})
    }

    /// Scale the mesh: x and y by `radial`, z by `axial`.
    /// Used to size the unit cylinder to a coil diameter and height.
    pub fn scaled(&self, radial: f64, axial: f64) -> ProcResult<CoilMesh> {
        if !(radial.is_finite() && axial.is_finite() && radial > 0.0 && axial > 0.0) {
            return err_str(&format!("Mesh scale factors must be positive, got radial={} axial={}", radial, axial));
        }
        let vertices = self.vertices.iter()
            .map(|v| Point::new(v.x * radial, v.y * radial, v.z * axial))
            .collect();
        Ok(CoilMesh{vertices, faces: self.faces.clone()})
    }

    /// Largest distance of a vertex from the z-axis.
    pub fn max_radius(&self) -> f64 {
        self.vertices.iter().map(Point::radius_xy).fold(0.0, f64::max)
    }
}
impl TryFrom<RawCoilMesh> for CoilMesh {
    type Error = MeshError;

    fn try_from(raw: RawCoilMesh) -> ProcResult<Self> {
        CoilMesh::new(raw.vertices, raw.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> CoilMesh {
        CoilMesh::new(
            vec![
                Point::new(1.0, 0.0, -1.0),
                Point::new(0.0, 1.0, -1.0),
                Point::new(0.0, 1.0, 1.0),
                Point::new(1.0, 0.0, 1.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        ).unwrap()
    }

    #[test]
    fn rejects_out_of_range_faces() {
        let err = CoilMesh::new(vec![Point::zero(); 3], vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidFace{face: 0, vertex: 3, vertex_count: 3}));
    }

    #[test]
    fn scales_radially_and_axially() {
        let scaled = quad().scaled(0.48, 0.25).unwrap();
        assert!((scaled.max_radius() - 0.48).abs() < 1e-12);
        assert_eq!(scaled.vertices[2].z, 0.25);
        assert_eq!(scaled.faces, quad().faces);
        assert!(quad().scaled(0.0, 1.0).is_err());
    }

    #[test]
    fn deserialize_validates_faces() {
        let bad = r#"{"vertices": [{"x":0.0,"y":0.0,"z":0.0}], "faces": [[0, 0, 1]]}"#;
        assert!(serde_json::from_str::<CoilMesh>(bad).is_err());
        let json = serde_json::to_string(&quad()).unwrap();
        assert_eq!(serde_json::from_str::<CoilMesh>(&json).unwrap(), quad());
    }
}
