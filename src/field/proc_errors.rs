/// Field solver and field metric error type.
#[derive(Debug)]
pub enum FieldError {
    /// Error reported by the field solver.
    Solver(String),
    /// Winding geometry error (contours that are not valid loops).
    WindingError(crate::windings::WindingError),
    /// Coil mesh error.
    MeshError(crate::mesh::MeshError),
    /// Store error while persisting the generated artifacts.
    StoreError(crate::store::StoreError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Solver(error) => write!(f, "- Solver Error: {}", error),
            FieldError::WindingError(error) => write!(f, "- Winding Error:\n{}", error),
            FieldError::MeshError(error) => write!(f, "- Mesh Error:\n{}", error),
            FieldError::StoreError(error) => write!(f, "- Store Error:\n{}", error),
            FieldError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::windings::WindingError> for FieldError {
    fn from(error: crate::windings::WindingError) -> Self {
        FieldError::WindingError(error)
    }
}
impl From<crate::mesh::MeshError> for FieldError {
    fn from(error: crate::mesh::MeshError) -> Self {
        FieldError::MeshError(error)
    }
}
impl From<crate::store::StoreError> for FieldError {
    fn from(error: crate::store::StoreError) -> Self {
        FieldError::StoreError(error)
    }
}
impl From<String> for FieldError {
    fn from(error: String) -> Self {
        FieldError::StringOnly(error)
    }
}

/// Result type for the `field` module.
pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// Create a `FieldError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> FieldResult<T> {
    Err(FieldError::StringOnly(error_str.to_string()))
}
