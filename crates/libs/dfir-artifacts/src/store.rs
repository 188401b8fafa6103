//! On-disk artifact enumeration, decoding, and cleanup.

use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::Path,
};

use serde_json::Value;
use tracing::{error, info};

use crate::prelude::*;

/// Placeholder committed so empty volume directories survive checkout;
/// never reported as an artifact.
const KEEP_MARKER: &str = ".gitkeep";

/// List the regular files directly under `root`, sorted by name.
///
/// An absent or unreadable root yields an empty list rather than an error:
/// the volume is provisioned externally and may simply not be mounted yet.
pub fn list_flat(root: &Path) -> Vec<String> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            error!("cannot read {}: {err}", root.display());
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name != KEEP_MARKER)
        .collect();
    names.sort();
    names
}

/// Decode a JSON-Lines file into its ordered sequence of values.
///
/// The file must carry a `.jsonl` extension (compared case-insensitively).
/// Blank lines are skipped; every remaining line must decode as exactly one
/// JSON value. A single malformed line fails the whole read; no partial
/// result is ever returned.
pub fn read_json_lines(path: &Path) -> Result<Vec<Value>> {
    let is_jsonl = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));
    if !is_jsonl {
        return Err(Error::NotJsonl(path.display().to_string()));
    }

    let file = fs::File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        _ => Error::IO(err),
    })?;

    let reader = BufReader::new(file);
    let mut values = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&line).map_err(|source| Error::JsonLine {
            line: index + 1,
            source,
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Recursively list every regular file under `directory`, as sorted paths
/// relative to it with `/` separators. An absent directory yields an empty
/// list: a tool run may legitimately have produced nothing.
pub fn list_tree(directory: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    if directory.is_dir() {
        walk(directory, directory, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(base, &path, out)?;
        } else if file_type.is_file() {
            if let Ok(relative) = path.strip_prefix(base) {
                let rendered = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push(rendered);
            }
        }
    }
    Ok(())
}

/// Remove the file or directory subtree at `path`, if present.
///
/// Idempotent: an already-absent path is success. A removal failure is a
/// hard [`Error::Cleanup`]: silently keeping a stale artifact would let a
/// re-run be observed as a merge of old and new output.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(Error::Cleanup {
                path: path.display().to_string(),
                source,
            });
        }
    };

    info!("removing stale artifact: {}", path.display());
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|source| Error::Cleanup {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_flat_skips_directories_and_keep_marker() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("evtx1.evtx"), b"x").unwrap();
        fs::write(dir.path().join("evtx2.evtx"), b"x").unwrap();
        fs::write(dir.path().join(KEEP_MARKER), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        assert_eq!(list_flat(dir.path()), vec!["evtx1.evtx", "evtx2.evtx"]);
    }

    #[test]
    fn list_flat_on_an_absent_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_flat(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn json_lines_decode_in_order_and_skip_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.jsonl");
        fs::write(
            &path,
            "{\"n\":1}\n\n   \n{\"n\":2}\n{\"n\":3}\n",
        )
        .unwrap();

        let values = read_json_lines(&path).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0]["n"], 1);
        assert_eq!(values[2]["n"], 3);
    }

    #[test]
    fn one_malformed_line_fails_the_whole_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.jsonl");
        fs::write(&path, "{\"n\":1}\nnot json\n{\"n\":3}\n").unwrap();

        let err = read_json_lines(&path).unwrap_err();
        match err {
            Error::JsonLine { line, .. } => assert_eq!(line, 2),
            other => panic!("expected JsonLine, got {other:?}"),
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let upper = dir.path().join("report.JSONL");
        fs::write(&upper, "{}\n").unwrap();
        assert_eq!(read_json_lines(&upper).unwrap().len(), 1);

        let csv = dir.path().join("report.csv");
        fs::write(&csv, "{}\n").unwrap();
        assert!(matches!(
            read_json_lines(&csv).unwrap_err(),
            Error::NotJsonl(_)
        ));
    }

    #[test]
    fn list_tree_returns_sorted_relative_forward_slash_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("top.csv"), b"x").unwrap();
        fs::write(dir.path().join("b/inner.csv"), b"x").unwrap();
        fs::write(dir.path().join("b/nested/deep.txt"), b"x").unwrap();

        let files = list_tree(dir.path()).unwrap();
        assert_eq!(files, vec!["b/inner.csv", "b/nested/deep.txt", "top.csv"]);
    }

    #[test]
    fn list_tree_of_a_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_tree(&dir.path().join("gone")).unwrap().is_empty());
    }

    #[test]
    fn remove_if_exists_is_idempotent_for_files_and_trees() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.jsonl");
        fs::write(&file, b"x").unwrap();
        remove_if_exists(&file).unwrap();
        assert!(!file.exists());
        remove_if_exists(&file).unwrap();

        let tree = dir.path().join("analysis");
        fs::create_dir_all(tree.join("sub")).unwrap();
        fs::write(tree.join("sub/a.csv"), b"x").unwrap();
        remove_if_exists(&tree).unwrap();
        assert!(!tree.exists());
        remove_if_exists(&tree).unwrap();
    }
}
