use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Check whether anything exists at `path`.
///
/// I/O errors (permissions, broken symlinks) collapse to `false`.
#[must_use]
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Normalize a path by removing `.` and resolving `..` components.
///
/// Purely lexical: the filesystem is never consulted, and `..` at the root
/// stays at the root.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other),
        }
    }
    result
}

/// Resolve `path` against `base` unless it is already absolute.
///
/// Absolute inputs are returned unchanged.
#[must_use]
pub fn resolve_if_relative(base: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        normalize_path(&base.join(candidate))
    }
}
