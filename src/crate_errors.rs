use crate::{
    args,
    field,
    io,
    mesh,
    store,
    targets,
    windings,
};

/// Error-type enum for the `opmcoil` crate.
/// Wraps the error of each module, so the binary can report any of them.
#[derive(Debug)]
pub enum OpmCoilError {
    ArgError(args::ArgError),
    IoError(io::IoError),
    WindingError(windings::WindingError),
    MeshError(mesh::MeshError),
    StoreError(store::StoreError),
    TargetError(targets::TargetError),
    FieldError(field::FieldError),
    StringOnly(String),
}
impl std::fmt::Display for OpmCoilError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpmCoilError::ArgError(error) => write!(f, "! ARGUMENT ERROR:\n{}", error),
            OpmCoilError::IoError(error) => write!(f, "! IO ERROR:\n{}", error),
            OpmCoilError::WindingError(error) => write!(f, "! WINDING ERROR:\n{}", error),
            OpmCoilError::MeshError(error) => write!(f, "! MESH ERROR:\n{}", error),
            OpmCoilError::StoreError(error) => write!(f, "! STORE ERROR:\n{}", error),
            OpmCoilError::TargetError(error) => write!(f, "! TARGETS ERROR:\n{}", error),
            OpmCoilError::FieldError(error) => write!(f, "! FIELD ERROR:\n{}", error),
            OpmCoilError::StringOnly(error) => write!(f, "! OPMCOIL ERROR:\n- {}", error),
        }
    }
}
impl From<String> for OpmCoilError {
    fn from(error: String) -> Self {
        OpmCoilError::StringOnly(error)
    }
}
impl From<args::ArgError> for OpmCoilError {
    fn from(error: args::ArgError) -> Self {
        OpmCoilError::ArgError(error)
    }
}
impl From<io::IoError> for OpmCoilError {
    fn from(error: io::IoError) -> Self {
        OpmCoilError::IoError(error)
    }
}
impl From<windings::WindingError> for OpmCoilError {
    fn from(error: windings::WindingError) -> Self {
        OpmCoilError::WindingError(error)
    }
}
impl From<mesh::MeshError> for OpmCoilError {
    fn from(error: mesh::MeshError) -> Self {
        OpmCoilError::MeshError(error)
    }
}
impl From<store::StoreError> for OpmCoilError {
    fn from(error: store::StoreError) -> Self {
        OpmCoilError::StoreError(error)
    }
}
impl From<targets::TargetError> for OpmCoilError {
    fn from(error: targets::TargetError) -> Self {
        OpmCoilError::TargetError(error)
    }
}
impl From<field::FieldError> for OpmCoilError {
    fn from(error: field::FieldError) -> Self {
        OpmCoilError::FieldError(error)
    }
}

/// Result type for the `opmcoil` crate.
pub type OpmCoilResult<T> = std::result::Result<T, OpmCoilError>;

/// Create an `OpmCoilResult` with an `Err` from a string.
/// Shorthand to avoid writing `Err(crate::OpmCoilError::StringOnly(error_str))`.
pub fn err_str<T>(error_str: &str) -> OpmCoilResult<T> {
    Err(OpmCoilError::StringOnly(error_str.to_string()))
}
