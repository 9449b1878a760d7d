/// Winding geometry error type.
#[derive(Debug)]
pub enum WindingError {
    /// Loop has too few points or points with the wrong dimensionality.
    MalformedLoop(String),
    /// Loop normal cannot be determined (self-cancelling or collapsed loop).
    DegenerateGeometry(String),
    /// Parallel sequences that must be index-aligned have different lengths.
    LengthMismatch {
        loops: usize,
        labels: usize,
    },
    /// IO error.
    IoError(crate::io::IoError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for WindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindingError::MalformedLoop(error) => write!(f, "- Malformed loop: {}", error),
            WindingError::DegenerateGeometry(error) => write!(f, "- Degenerate geometry: {}", error),
            WindingError::LengthMismatch{loops, labels} => write!(f, "- {} loops but {} labels", loops, labels),
            WindingError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            WindingError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::io::IoError> for WindingError {
    fn from(error: crate::io::IoError) -> Self {
        WindingError::IoError(error)
    }
}
impl From<String> for WindingError {
    fn from(error: String) -> Self {
        WindingError::StringOnly(error)
    }
}

/// Result type for the `windings` module.
pub type ProcResult<T> = std::result::Result<T, WindingError>;

/// Create a `WindingError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(WindingError::StringOnly(error_str.to_string()))
}
