//! Manifest and declaration file I/O.
//!
//! The only place in the core that touches the filesystem. Absence is
//! reported as a typed error so callers can tell it apart from unreadable or
//! malformed files.

use crate::error::{ManifestError, ReadError};
use crate::manifest::Manifest;
use std::io;
use std::path::Path;

pub use typeprobe_util::fs::file_exists;

/// Read and parse a package.json.
///
/// # Errors
/// `NotFound` if nothing exists at `path`, `Read` for other I/O failures,
/// `Parse` if the content is not JSON or its root is not an object.
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    // Repeated keys keep the last value, as JSON.parse does; the derived
    // struct deserializer would reject them.
    serde_json::from_str::<serde_json::Value>(&content)
        .and_then(Manifest::from_value)
        .map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a text file, replacing invalid UTF-8.
///
/// # Errors
/// `NotFound` if nothing exists at `path`, `Read` for other I/O failures.
pub fn read_text(path: &Path) -> Result<String, ReadError> {
    typeprobe_util::fs::read_to_string_lossy(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ReadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "demo", "types": "./index.d.ts"}"#).unwrap();

        let manifest = read_manifest(&path).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert_eq!(manifest.types.as_deref(), Some("./index.d.ts"));
    }

    #[test]
    fn test_read_manifest_duplicate_keys_keep_last() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{
  "types": "./a.d.ts",
  "exports": { "types": "./x.d.ts", "types": "./y.d.ts" },
  "dependencies": { "left-pad": "1.0.0" },
  "types": "./b.d.ts"
}"#,
        )
        .unwrap();

        let manifest = read_manifest(&path).unwrap();
        assert_eq!(manifest.types.as_deref(), Some("./b.d.ts"));
        let exports = manifest.exports.as_ref().unwrap();
        assert_eq!(exports.get("types").and_then(crate::manifest::ExportNode::as_str), Some("./y.d.ts"));
        assert_eq!(manifest.dependency_names(false), vec!["left-pad".to_string()]);
    }

    #[test]
    fn test_read_manifest_missing() {
        let dir = tempdir().unwrap();
        let err = read_manifest(&dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_read_manifest_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_read_manifest_non_object_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "[]").unwrap();

        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_read_manifest_directory_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::create_dir(&path).unwrap();

        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[test]
    fn test_read_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.d.ts");
        fs::write(&path, "export {};\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "export {};\n");
        assert!(file_exists(&path));
    }

    #[test]
    fn test_read_text_missing() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("index.d.ts")).unwrap_err();
        assert!(matches!(err, ReadError::NotFound { .. }));
    }
}
