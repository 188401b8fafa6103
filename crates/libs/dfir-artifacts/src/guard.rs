//! Traversal-safe path resolution.
//!
//! The results and data roots sit on a multi-tenant shared volume, so every
//! client-supplied path segment must be proven to stay inside its root
//! before the filesystem is touched. This module is the sole traversal
//! defense: callers never join client input onto a root themselves.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use percent_encoding::percent_decode_str;
use tracing::warn;

use crate::prelude::*;

/// Percent-decode a client-supplied path segment to a fixed point.
///
/// Decoding repeats until the string stops changing, so a double-encoded
/// `..%252F` cannot slip past the containment check by surviving one decode
/// round. Segments that do not decode to valid UTF-8 are rejected outright.
pub fn decode_segment(raw: &str) -> Result<String> {
    let mut current = raw.to_owned();
    loop {
        let decoded = percent_decode_str(&current)
            .decode_utf8()
            .map_err(|_| Error::Forbidden)?
            .into_owned();
        if decoded == current {
            return Ok(current);
        }
        current = decoded;
    }
}

/// Validate a client string destined to become a single file-name segment
/// (a log file name, or a search keyword embedded into an output name).
pub fn sanitize_component(raw: &str) -> Result<&str> {
    if raw.is_empty()
        || raw.contains("..")
        || raw.contains('/')
        || raw.contains('\\')
        || raw.contains('\0')
    {
        warn!("rejected unsafe path component: {raw:?}");
        return Err(Error::Forbidden);
    }
    Ok(raw)
}

/// Resolve `relative` against `root` and require the canonical result to be
/// a strict descendant of the canonical root.
///
/// `relative` is percent-decoded first and may itself be absolute (the
/// aggregator accepts a full report path); an absolute input is held to the
/// same containment requirement. Returns [`Error::Forbidden`] on any escape,
/// including via symlink, and [`Error::NotFound`] when the path stays inside
/// the root but does not exist. The root itself is never a valid target.
pub fn resolve_under(root: &Path, relative: &str) -> Result<PathBuf> {
    let decoded = decode_segment(relative)?;
    let requested = Path::new(&decoded);
    let root = root.canonicalize()?;
    let joined = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        root.join(requested)
    };

    match joined.canonicalize() {
        Ok(resolved) => {
            if resolved == root || !resolved.starts_with(&root) {
                warn!("directory traversal attempt blocked: {relative:?}");
                return Err(Error::Forbidden);
            }
            Ok(resolved)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // The target is absent; decide missing-inside vs escape from
            // the lexically normalized form.
            let normalized = normalize_lexically(&joined);
            if normalized != root && normalized.starts_with(&root) {
                Err(Error::NotFound(decoded))
            } else {
                warn!("directory traversal attempt blocked: {relative:?}");
                Err(Error::Forbidden)
            }
        }
        Err(err) => Err(Error::IO(err)),
    }
}

/// [`resolve_under`], additionally requiring a regular file.
pub fn resolve_existing_file(root: &Path, relative: &str) -> Result<PathBuf> {
    let path = resolve_under(root, relative)?;
    if !path.is_file() {
        return Err(Error::NotFound(relative.to_owned()));
    }
    Ok(path)
}

/// [`resolve_under`], additionally requiring a directory.
pub fn resolve_existing_dir(root: &Path, relative: &str) -> Result<PathBuf> {
    let path = resolve_under(root, relative)?;
    if !path.is_dir() {
        return Err(Error::NotFound(relative.to_owned()));
    }
    Ok(path)
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn root_with_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("results");
        fs::create_dir_all(root.join("evtx1.evtx-takajo-analysis")).unwrap();
        fs::write(root.join("report.jsonl"), "{}\n").unwrap();
        fs::write(
            root.join("evtx1.evtx-takajo-analysis/summary.csv"),
            "a,b\n",
        )
        .unwrap();
        (dir, root)
    }

    #[test]
    fn resolves_a_file_inside_the_root() {
        let (_dir, root) = root_with_file();
        let path = resolve_existing_file(&root, "report.jsonl").unwrap();
        assert!(path.ends_with("report.jsonl"));
    }

    #[test]
    fn resolves_nested_segments() {
        let (_dir, root) = root_with_file();
        let analysis = resolve_existing_dir(&root, "evtx1.evtx-takajo-analysis").unwrap();
        let file = resolve_existing_file(&analysis, "summary.csv").unwrap();
        assert!(file.ends_with("summary.csv"));
    }

    #[test]
    fn parent_traversal_is_forbidden_even_when_target_exists() {
        let (dir, root) = root_with_file();
        fs::write(dir.path().join("outside.txt"), "secret").unwrap();

        let err = resolve_under(&root, "../outside.txt").unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn parent_traversal_is_forbidden_when_target_is_missing() {
        let (_dir, root) = root_with_file();
        let err = resolve_under(&root, "../../etc/foo").unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn encoded_traversal_is_forbidden() {
        let (_dir, root) = root_with_file();
        // One decode round already applied by the HTTP layer; this is what
        // a double-encoded ..%252F..%252Fetc arrives as.
        let err = resolve_under(&root, "..%2F..%2Fetc%2Fpasswd").unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn absolute_path_outside_the_root_is_forbidden() {
        let (_dir, root) = root_with_file();
        let err = resolve_under(&root, "/etc/hostname").unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn absolute_path_inside_the_root_is_allowed() {
        let (_dir, root) = root_with_file();
        let absolute = root.join("report.jsonl");
        let path = resolve_existing_file(&root, &absolute.to_string_lossy()).unwrap();
        assert!(path.ends_with("report.jsonl"));
    }

    #[test]
    fn the_root_itself_is_not_a_valid_target() {
        let (_dir, root) = root_with_file();
        let err = resolve_under(&root, ".").unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn missing_file_inside_the_root_is_not_found() {
        let (_dir, root) = root_with_file();
        let err = resolve_existing_file(&root, "absent.jsonl").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn directory_where_a_file_is_required_is_not_found() {
        let (_dir, root) = root_with_file();
        let err = resolve_existing_file(&root, "evtx1.evtx-takajo-analysis").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escaping_the_root_is_forbidden() {
        let (dir, root) = root_with_file();
        let secret = dir.path().join("secret.txt");
        fs::write(&secret, "outside").unwrap();
        std::os::unix::fs::symlink(&secret, root.join("inside.txt")).unwrap();

        let err = resolve_under(&root, "inside.txt").unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn sanitize_rejects_traversal_and_separators() {
        assert!(sanitize_component("evtx1.evtx").is_ok());
        assert!(sanitize_component("mimikatz").is_ok());
        assert!(sanitize_component("").is_err());
        assert!(sanitize_component("..").is_err());
        assert!(sanitize_component("a/../b").is_err());
        assert!(sanitize_component("a/b").is_err());
        assert!(sanitize_component("a\\b").is_err());
    }
}
