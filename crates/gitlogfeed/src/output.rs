// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Atomic file output
//!
//! Files are written to a temporary file in the destination directory and
//! renamed over the target, so readers never see a partial document.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::AppError;

/// Write `contents` to `dir/name`, replacing any existing file
///
/// # Errors
///
/// Returns `AppError::Write` if the temporary file cannot be created,
/// written or renamed into place.
pub fn write_atomic(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf, AppError> {
    let path = dir.join(name);
    let write_error = |source| AppError::Write {
        path: path.clone(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    file.persist(&path).map_err(|e| write_error(e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_atomic(dir.path(), "a.html", b"hello").expect("Should write");

        assert_eq!(path, dir.path().join("a.html"));
        assert_eq!(std::fs::read(&path).expect("read"), b"hello");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().expect("temp dir");
        write_atomic(dir.path(), "atom.xml", b"old contents").expect("Should write");
        write_atomic(dir.path(), "atom.xml", b"new").expect("Should write");

        let contents = std::fs::read(dir.path().join("atom.xml")).expect("read");
        assert_eq!(contents, b"new");
        assert_eq!(std::fs::read_dir(dir.path()).expect("list").count(), 1);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("missing");
        let result = write_atomic(&missing, "a.html", b"x");

        match result {
            Err(AppError::Write { path, .. }) => assert_eq!(path, missing.join("a.html")),
            other => panic!("Expected Write error, got {other:?}"),
        }
    }
}
