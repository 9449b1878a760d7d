/*!
 * Persistence for the artifacts of the (external) winding optimisation.
 *
 * One JSON file per (artifact kind, key) pair, named `<kind>_<key>.json`
 * inside the store root. Keys are usually the coil axis label ("X", "Y", "Z").
 * Single writer, no locking.
 */
mod proc_errors;

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use strum::{Display, EnumIter, EnumString};

use crate::geo_3d::Point;
use crate::mesh::CoilMesh;
use crate::windings::Loop;

// Re-export errors
pub use proc_errors::{
    StoreError,
    ProcResult,
};

/// Key used when the caller has no coil axis label.
pub const DEFAULT_KEY: &str = "default";

/// Kinds of persisted artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ArtifactKind {
    /// Coil mesh vertices and faces.
    #[strum(serialize = "coilmesh")]
    Mesh,
    /// Winding loops.
    Loops,
    /// Field evaluation points.
    TargetPoints,
}

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Mesh(CoilMesh),
    Loops(Vec<Loop>),
    TargetPoints(Vec<Point>),
}
impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Mesh(_) => ArtifactKind::Mesh,
            Artifact::Loops(_) => ArtifactKind::Loops,
            Artifact::TargetPoints(_) => ArtifactKind::TargetPoints,
        }
    }
}

/// Check that a key is usable as part of a file name.
fn validate_key(key: &str) -> ProcResult<()> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Directory-backed artifact store.
#[derive(Debug, Clone)]
pub struct LoopStore {
    root: PathBuf,
}
impl LoopStore {
    /// Create a store rooted at a directory. The directory is created on first save.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        LoopStore{root: root.into()}
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of an artifact.
    pub fn path_for(&self, kind: ArtifactKind, key: &str) -> ProcResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}_{}.json", kind, key)))
    }

    /// Check whether an artifact is stored under the key.
    pub fn contains(&self, kind: ArtifactKind, key: &str) -> bool {
        self.path_for(kind, key).map_or(false, |path| path.is_file())
    }

    /// Save an artifact under the key, overwriting any previous one.
    /// Returns the written path.
    pub fn save(&self, artifact: &Artifact, key: &str) -> ProcResult<PathBuf> {
        match artifact {
            Artifact::Mesh(mesh) => self.write(ArtifactKind::Mesh, key, mesh),
            Artifact::Loops(loops) => self.write(ArtifactKind::Loops, key, loops),
            Artifact::TargetPoints(points) => self.write(ArtifactKind::TargetPoints, key, points),
        }
    }

    /// Save several artifacts under the key, all or nothing.
    ///
    /// Each artifact is first written next to its target as `<file>.tmp`, then
    /// moved into place. On failure the artifacts already moved are restored
    /// to their previous contents and no staged file is left behind.
    pub fn save_all(&self, artifacts: &[Artifact], key: &str) -> ProcResult<Vec<PathBuf>> {
        validate_key(key)?;
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(artifacts.len());
        for artifact in artifacts.iter() {
            let path = self.path_for(artifact.kind(), key)?;
            let tmp = with_suffix(&path, "tmp");
            if let Err(error) = self.write_artifact(artifact, &tmp) {
                discard(staged.iter().map(|(tmp, _)| tmp.as_path()).chain(std::iter::once(tmp.as_path())));
                return Err(error);
            }
            staged.push((tmp, path));
        }

        // (written path, backup of the previous file)
        let mut committed: Vec<(PathBuf, Option<PathBuf>)> = Vec::with_capacity(staged.len());
        for (idx, (tmp, path)) in staged.iter().enumerate() {
            match commit(tmp, path) {
                Ok(backup) => committed.push((path.clone(), backup)),
                Err(error) => {
                    tracing::warn!("Saving {} failed, rolling back {} artifacts", path.display(), committed.len());
                    rollback(&committed);
                    discard(staged[idx..].iter().map(|(tmp, _)| tmp.as_path()));
                    return Err(error);
                },
            }
        }

        discard(committed.iter().filter_map(|(_, backup)| backup.as_deref()));
        for (path, _) in committed.iter() {
            tracing::debug!("Saved {}", path.display());
        }
        Ok(committed.into_iter().map(|(path, _)| path).collect())
    }

    /// Load the artifact of the given kind stored under the key.
    pub fn load(&self, kind: ArtifactKind, key: &str) -> ProcResult<Artifact> {
        Ok(match kind {
            ArtifactKind::Mesh => Artifact::Mesh(self.read(kind, key)?),
            ArtifactKind::Loops => Artifact::Loops(self.read(kind, key)?),
            ArtifactKind::TargetPoints => Artifact::TargetPoints(self.read(kind, key)?),
        })
    }

    pub fn save_loops(&self, loops: &[Loop], key: &str) -> ProcResult<PathBuf> {
        self.write(ArtifactKind::Loops, key, &loops)
    }

    pub fn load_loops(&self, key: &str) -> ProcResult<Vec<Loop>> {
        self.read(ArtifactKind::Loops, key)
    }

    pub fn save_mesh(&self, mesh: &CoilMesh, key: &str) -> ProcResult<PathBuf> {
        self.write(ArtifactKind::Mesh, key, mesh)
    }

    pub fn load_mesh(&self, key: &str) -> ProcResult<CoilMesh> {
        self.read(ArtifactKind::Mesh, key)
    }

    pub fn save_target_points(&self, points: &[Point], key: &str) -> ProcResult<PathBuf> {
        self.write(ArtifactKind::TargetPoints, key, &points)
    }

    pub fn load_target_points(&self, key: &str) -> ProcResult<Vec<Point>> {
        self.read(ArtifactKind::TargetPoints, key)
    }

    fn write<T: Serialize + ?Sized>(&self, kind: ArtifactKind, key: &str, value: &T) -> ProcResult<PathBuf> {
        let path = self.path_for(kind, key)?;
        self.write_to(&path, value)?;
        tracing::debug!("Saved {} to {}", kind, path.display());
        Ok(path)
    }

    fn write_artifact(&self, artifact: &Artifact, path: &Path) -> ProcResult<()> {
        match artifact {
            Artifact::Mesh(mesh) => self.write_to(path, mesh),
            Artifact::Loops(loops) => self.write_to(path, loops),
            Artifact::TargetPoints(points) => self.write_to(path, points),
        }
    }

    fn write_to<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> ProcResult<()> {
        crate::io::create_dir_all(&self.root)?;
        crate::io::write_json(path, value)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, kind: ArtifactKind, key: &str) -> ProcResult<T> {
        let path = self.path_for(kind, key)?;
        let buffer = match crate::io::read_to_string(&path) {
            Ok(buffer) => buffer,
            Err(error) if error.is_not_found() => {
                return Err(StoreError::NotFound{
                    kind,
                    key: key.to_string(),
                    path: path.display().to_string(),
                });
            },
            Err(error) => return Err(error.into()),
        };
        tracing::debug!("Loaded {} from {}", kind, path.display());
        serde_json::from_str(&buffer).map_err(|cause| StoreError::CorruptData{
            kind,
            path: path.display().to_string(),
            cause,
        })
    }
}

/// `path` with an extra extension appended, e.g. `loops_X.json.tmp`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Move a staged file into place, keeping the previous file as a backup.
fn commit(tmp: &Path, path: &Path) -> ProcResult<Option<PathBuf>> {
    let backup = if path.is_file() {
        let backup = with_suffix(path, "bak");
        crate::io::rename(path, &backup)?;
        Some(backup)
    } else {
        None
    };
    if let Err(error) = crate::io::rename(tmp, path) {
        if let Some(ref backup) = backup {
            restore(backup, path);
        }
        return Err(error.into());
    }
    Ok(backup)
}

/// Undo committed files, newest first.
fn rollback(committed: &[(PathBuf, Option<PathBuf>)]) {
    for (path, backup) in committed.iter().rev() {
        match backup {
            Some(backup) => restore(backup, path),
            None => discard(std::iter::once(path.as_path())),
        }
    }
}

fn restore(backup: &Path, path: &Path) {
    if let Err(error) = crate::io::rename(backup, path) {
        tracing::warn!("Could not restore {}:\n{}", path.display(), error);
    }
}

fn discard<'a, I: Iterator<Item = &'a Path>>(paths: I) {
    for path in paths {
        if path.is_file() {
            if let Err(error) = crate::io::remove_file(path) {
                tracing::warn!("Could not remove {}:\n{}", path.display(), error);
            }
        }
    }
}
