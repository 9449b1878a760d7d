use std::io::Write;
use std::path::Path;

#[derive(Debug)]
pub enum IoErrorType {
    File(std::io::Error),
    SerdeJson(serde_json::Error),
    SerdeYaml(serde_yaml::Error),
    TomlSer(toml::ser::Error),
    TomlDe(toml::de::Error),
    StringOnly(String),
}
impl std::fmt::Display for IoErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoErrorType::File(error) => write!(f, "- File IO Error:\n{}", error),
            IoErrorType::SerdeJson(error) => write!(f, "- JSON Serialization/Deserialization Error:\n{}", error),
            IoErrorType::SerdeYaml(error) => write!(f, "- YAML Serialization/Deserialization Error:\n{}", error),
            IoErrorType::TomlSer(error) => write!(f, "- TOML Serialization Error:\n{}", error),
            IoErrorType::TomlDe(error) => write!(f, "- TOML Deserialization Error:\n{}", error),
            IoErrorType::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}

/// Custom verbose IO error struct.
#[derive(Debug)]
pub struct IoError {
    /// Filepath facing an error.
    pub file: Option<String>,
    /// Error cause.
    pub cause: IoErrorType,
}
impl IoError {
    fn with_file(path: &Path, cause: IoErrorType) -> Self {
        IoError{file: Some(path.display().to_string()), cause}
    }

    /// Whether the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(&self.cause, IoErrorType::File(error) if error.kind() == std::io::ErrorKind::NotFound)
    }
}
impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "- Error with file: {}\n- {}", file, self.cause),
            None => write!(f, "- {}", self.cause),
        }
    }
}

pub type IoResult<T> = std::result::Result<T, IoError>;

/// Open a file with verbose errors.
pub fn open<P: AsRef<Path>>(path: P) -> IoResult<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::open(path).map_err(|error| IoError::with_file(path, IoErrorType::File(error)))
}

/// Create a file with verbose errors.
pub fn create<P: AsRef<Path>>(path: P) -> IoResult<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).map_err(|error| IoError::with_file(path, IoErrorType::File(error)))
}

/// Create a directory (and its parents) with verbose errors.
pub fn create_dir_all<P: AsRef<Path>>(path: P) -> IoResult<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|error| IoError::with_file(path, IoErrorType::File(error)))
}

/// Rename a file with verbose errors.
pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> IoResult<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    std::fs::rename(from, to).map_err(|error| IoError::with_file(to, IoErrorType::File(error)))
}

/// Remove a file with verbose errors.
pub fn remove_file<P: AsRef<Path>>(path: P) -> IoResult<()> {
    let path = path.as_ref();
    std::fs::remove_file(path).map_err(|error| IoError::with_file(path, IoErrorType::File(error)))
}

/// Read from string with verbose errors
pub fn read_to_string<P: AsRef<Path>>(path: P) -> IoResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|error| IoError::with_file(path, IoErrorType::File(error)))
}

/// Write string to file with verbose errors.
pub fn write_to_file<P: AsRef<Path>>(path: P, buffer: &str) -> IoResult<()> {
    let path = path.as_ref();
    let mut f = create(path)?;
    f.write_all(buffer.as_bytes())
        .map_err(|error| IoError::with_file(path, IoErrorType::File(error)))
}

/// Write a value as pretty JSON.
pub fn write_json<P, T>(path: P, value: &T) -> IoResult<()>
where
    P: AsRef<Path>,
    T: serde::Serialize + ?Sized,
{
    let path = path.as_ref();
    let buffer = serde_json::to_string_pretty(value)
        .map_err(|error| IoError::with_file(path, IoErrorType::SerdeJson(error)))?;
    write_to_file(path, &buffer)
}

/// Read in cfg files from the supported filetypes.
pub fn read_cfg_file<P, T>(path: P) -> IoResult<T>
where
    P: AsRef<Path>,
    T: serde::de::DeserializeOwned,
{
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            serde_json::from_reader(open(path)?)
                .map_err(|error| IoError::with_file(path, IoErrorType::SerdeJson(error)))
        },
        Some("toml") => {
            toml::from_str(&read_to_string(path)?)
                .map_err(|error| IoError::with_file(path, IoErrorType::TomlDe(error)))
        },
        Some("yaml") | Some("yml") => {
            serde_yaml::from_reader(open(path)?)
                .map_err(|error| IoError::with_file(path, IoErrorType::SerdeYaml(error)))
        },
        _ => {
            let supported_filetypes = vec!["json", "toml", "yaml", "yml"];
            let error_string = format!("Unsupported filetype for config file: {}\nSupported filetypes: {:?}", path.display(), supported_filetypes);
            Err(IoError::with_file(path, IoErrorType::StringOnly(error_string)))
        },
    }
}

/// Serialize a config value to a string in the requested format.
pub fn cfg_to_string<T>(value: &T, format: crate::args::Format) -> IoResult<String>
where
    T: serde::Serialize,
{
    use crate::args::Format;
    let err = |cause| IoError{file: None, cause};
    match format {
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| err(IoErrorType::SerdeYaml(e))),
        Format::Json => serde_json::to_string_pretty(value).map_err(|e| err(IoErrorType::SerdeJson(e))),
        Format::Toml => toml::to_string_pretty(value).map_err(|e| err(IoErrorType::TomlSer(e))),
    }
}
