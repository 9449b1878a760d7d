use crate::store::ArtifactKind;

/// Loop store error type.
#[derive(Debug)]
pub enum StoreError {
    /// No artifact of this kind is stored under the key.
    NotFound {
        kind: ArtifactKind,
        key: String,
        path: String,
    },
    /// The stored bytes do not decode as the expected artifact.
    CorruptData {
        kind: ArtifactKind,
        path: String,
        cause: serde_json::Error,
    },
    /// The key cannot be used as part of a file name.
    InvalidKey(String),
    /// IO error.
    IoError(crate::io::IoError),
}
impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound{kind, key, path} => write!(f, "- No {} stored under key \"{}\" ({})", kind, key, path),
            StoreError::CorruptData{kind, path, cause} => write!(f, "- Stored {} at {} is unreadable:\n{}", kind, path, cause),
            StoreError::InvalidKey(key) => write!(f, "- Invalid store key \"{}\" (use ASCII letters, digits, '-' or '_')", key),
            StoreError::IoError(error) => write!(f, "- IO Error:\n{}", error),
        }
    }
}
impl From<crate::io::IoError> for StoreError {
    fn from(error: crate::io::IoError) -> Self {
        StoreError::IoError(error)
    }
}

/// Result type for the `store` module.
pub type ProcResult<T> = std::result::Result<T, StoreError>;
