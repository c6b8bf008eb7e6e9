//! Local saving of fetched artifacts.
//!
//! Filenames are deterministic, derived from the preset identifier the
//! service assigned (`preset_<id>.xmp` / `preview_<id>.jpg`, matching the
//! names the service itself stores). Existing files are never overwritten;
//! a ` (n)` suffix is appended instead so repeated downloads all succeed.

use crate::{Error, Result};
use prism_types::ArtifactKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deterministic local filename for an artifact.
#[must_use]
pub fn artifact_file_name(kind: ArtifactKind, preset_id: &str) -> String {
    match kind {
        ArtifactKind::Xmp => format!("preset_{preset_id}.xmp"),
        ArtifactKind::Preview => format!("preview_{preset_id}.jpg"),
    }
}

/// Save fetched artifact bytes into `dir`, returning the written path.
///
/// # Errors
///
/// Returns [`Error::Download`] when the directory cannot be created or the
/// file cannot be written.
pub fn save_artifact(
    dir: &Path,
    kind: ArtifactKind,
    preset_id: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Download(format!("cannot create {}: {e}", dir.display())))?;

    let path = available_path(dir, &artifact_file_name(kind, preset_id));
    std::fs::write(&path, bytes)
        .map_err(|e| Error::Download(format!("cannot write {}: {e}", path.display())))?;

    debug!("Saved {} artifact to {:?} ({} bytes)", kind.label(), path, bytes.len());
    Ok(path)
}

/// Directory downloads land in: the XDG download dir, falling back to the
/// home directory.
#[must_use]
pub fn download_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| {
            dirs.download_dir()
                .map(Path::to_path_buf)
                .or_else(|| Some(dirs.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// First non-existing path for `file_name` in `dir`, suffixing ` (n)`
/// before the extension on collision.
fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (file_name, ""),
    };

    for n in 1.. {
        let name = if ext.is_empty() {
            format!("{stem} ({n})")
        } else {
            format!("{stem} ({n}).{ext}")
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("exhausted collision suffixes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(artifact_file_name(ArtifactKind::Xmp, "p1"), "preset_p1.xmp");
        assert_eq!(
            artifact_file_name(ArtifactKind::Preview, "p1"),
            "preview_p1.jpg"
        );
    }

    #[test]
    fn test_save_artifact_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_artifact(dir.path(), ArtifactKind::Xmp, "abc", b"<xmp/>").unwrap();
        assert_eq!(path.file_name().unwrap(), "preset_abc.xmp");
        assert_eq!(std::fs::read(&path).unwrap(), b"<xmp/>");
    }

    #[test]
    fn test_save_artifact_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_artifact(dir.path(), ArtifactKind::Preview, "p1", b"one").unwrap();
        let second = save_artifact(dir.path(), ArtifactKind::Preview, "p1", b"two").unwrap();
        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "preview_p1 (1).jpg");
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn test_save_artifact_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested/downloads");
        let path = save_artifact(&nested, ArtifactKind::Xmp, "p2", b"x").unwrap();
        assert!(path.starts_with(&nested));
    }
}
