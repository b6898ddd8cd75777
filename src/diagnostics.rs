//! Boundary errors raised while reading and writing documents.
//!
//! The analysis core never fails; everything here originates at the file
//! boundary and is reported to the operator before exiting non-zero.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("unexpected failure on {}: {source}", path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InputError {
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Classify an I/O failure on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Self::Unexpected {
                path: path.to_path_buf(),
                source: Box::new(err),
            },
        }
    }

    pub fn unexpected(
        path: &Path,
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Unexpected {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_file_not_found() {
        let err = InputError::from_io(
            Path::new("missing.json"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, InputError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "file not found: missing.json");
    }

    #[test]
    fn other_io_maps_to_unexpected() {
        let err = InputError::from_io(
            Path::new("locked.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, InputError::Unexpected { .. }));
        assert!(err.to_string().contains("denied"));
    }
}
