/// Target point generation error type.
#[derive(Debug)]
pub enum TargetError {
    /// Store error while saving the generated points.
    StoreError(crate::store::StoreError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for TargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetError::StoreError(error) => write!(f, "- Store Error:\n{}", error),
            TargetError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::store::StoreError> for TargetError {
    fn from(error: crate::store::StoreError) -> Self {
        TargetError::StoreError(error)
    }
}
impl From<String> for TargetError {
    fn from(error: String) -> Self {
        TargetError::StringOnly(error)
    }
}

/// Result type for the `targets` module.
pub type ProcResult<T> = std::result::Result<T, TargetError>;

/// Create a `TargetError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(TargetError::StringOnly(error_str.to_string()))
}
