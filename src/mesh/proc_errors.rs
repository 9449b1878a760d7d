/// Coil mesh error type.
#[derive(Debug)]
pub enum MeshError {
    /// A face references a vertex that does not exist.
    InvalidFace {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::InvalidFace{face, vertex, vertex_count} => write!(f,
                "- Face {} references vertex {}, but the mesh has {} vertices", face, vertex, vertex_count),
            MeshError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<String> for MeshError {
    fn from(error: String) -> Self {
        MeshError::StringOnly(error)
    }
}

/// Result type for the `mesh` module.
pub type ProcResult<T> = std::result::Result<T, MeshError>;

/// Create a `MeshError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(MeshError::StringOnly(error_str.to_string()))
}
