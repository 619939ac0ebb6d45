//! Storage root and safe path resolution
//!
//! Requested segments are untrusted. They are normalized lexically first, so that
//! `..` can never climb above the root, and then the canonical path is checked
//! component-wise against the canonical root, which also catches symlinks that
//! point outside of it.

use super::error::StreamError;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Canonical base directory that every served file must live under
#[derive(Debug, Clone)]
pub struct StorageRoot {
    canonical: PathBuf,
}

impl StorageRoot {
    /// Canonicalize `path` once at startup. Fails if it does not name a directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path)?;
        if !canonical.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("storage root '{}' is not a directory", path.display()),
            ));
        }
        Ok(Self { canonical })
    }

    pub fn path(&self) -> &Path {
        &self.canonical
    }

    /// Resolve segments to a canonical path strictly inside the root
    pub async fn resolve<S: AsRef<str>>(
        &self,
        segments: &[S],
    ) -> Result<ResolvedPath, StreamError> {
        let requested = normalize_segments(segments)?;
        let joined = self.canonical.join(&requested);

        let canonical = tokio::fs::canonicalize(&joined)
            .await
            .map_err(map_lookup_error)?;

        if !self.contains(&canonical) {
            return Err(StreamError::Forbidden);
        }
        Ok(ResolvedPath {
            requested,
            canonical,
        })
    }

    /// Component-wise strict descendant check (`/uploads-evil` is not under `/uploads`)
    pub fn contains(&self, candidate: &Path) -> bool {
        candidate != self.canonical && candidate.starts_with(&self.canonical)
    }
}

/// Result of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized path relative to the root, as the client named it
    pub requested: PathBuf,
    /// Canonical absolute path, symlinks resolved
    pub canonical: PathBuf,
}

/// Normalize untrusted segments into a relative path without `.` or `..`
pub fn normalize_segments<S: AsRef<str>>(segments: &[S]) -> Result<PathBuf, StreamError> {
    if segments.is_empty() {
        return Err(StreamError::BadRequest("empty file path".to_string()));
    }

    let mut stack: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in segments {
        let segment = segment.as_ref();

        if segment.contains('\0') {
            return Err(StreamError::BadRequest(
                "path segment contains a NUL byte".to_string(),
            ));
        }

        match segment {
            "" | "." => {}
            ".." => {
                // Climbing above the root
                if stack.pop().is_none() {
                    return Err(StreamError::Forbidden);
                }
            }
            s if is_override(s) => return Err(StreamError::Forbidden),
            s => stack.push(s),
        }
    }

    if stack.is_empty() {
        return Err(StreamError::Forbidden);
    }
    Ok(stack.into_iter().collect())
}

/// A segment that would replace or extend the joined path instead of naming one entry
fn is_override(segment: &str) -> bool {
    segment.contains(['/', '\\'])
        || Path::new(segment)
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
}

fn map_lookup_error(err: io::Error) -> StreamError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => StreamError::NotFound,
        _ => StreamError::Internal(err),
    }
}
