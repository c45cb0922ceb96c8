//! Error types for file and directory entities.

use std::io;
use std::path::{Path, PathBuf};

/// Error type returned by every entity operation.
///
/// Every failed OS call surfaces as [`FsError::Io`], carrying the path of the
/// entity being operated on and the `io::Error` the OS reported. Usage errors
/// that can be detected without touching the filesystem surface as
/// [`FsError::InvalidInput`].
///
/// # Examples
///
/// ```rust
/// use localfs_entity::FsError;
/// use std::io;
/// use std::path::PathBuf;
///
/// let err = FsError::Io {
///     operation: "read",
///     path: PathBuf::from("/missing"),
///     source: io::Error::from(io::ErrorKind::NotFound),
/// };
/// assert!(err.to_string().starts_with("read failed for /missing"));
/// assert!(err.is_not_found());
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// An OS-level I/O call failed.
    #[error("{operation} failed for {}: {source}", path.display())]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// Full path of the entity being operated on.
        path: PathBuf,
        /// The error reported by the OS.
        #[source]
        source: io::Error,
    },

    /// The call was invalid given the in-memory state of its arguments.
    ///
    /// Raised before any OS call is made.
    #[error("{operation}: invalid input: {reason}")]
    InvalidInput {
        /// The operation that rejected its input.
        operation: &'static str,
        /// Why the input was rejected.
        reason: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl FsError {
    /// Wraps an `io::Error` for the entity at `path`.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        FsError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Builds an [`FsError::InvalidInput`].
    pub fn invalid_input(operation: &'static str, reason: impl Into<String>) -> Self {
        FsError::InvalidInput {
            operation,
            reason: reason.into(),
        }
    }

    /// Returns `true` for I/O-class failures.
    pub fn is_io(&self) -> bool {
        matches!(self, FsError::Io { .. })
    }

    /// Returns `true` for usage errors detected without an OS call.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FsError::InvalidInput { .. })
    }

    /// Returns `true` if the underlying OS error was "not found".
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(io::ErrorKind::NotFound)
    }

    /// The `io::ErrorKind` of the underlying OS error, if any.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Path of the entity the failing operation was acting on.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsError::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The message reported by the OS.
    pub fn os_message(&self) -> Option<String> {
        match self {
            FsError::Io { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// The raw OS error code (`errno` on Unix).
    ///
    /// `None` when the failure was not reported by the OS itself, such as a
    /// short write or a path that is not under the requested base.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            FsError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Translates `io::Result` values into [`FsError`] at the failing call site.
///
/// ```rust
/// use localfs_entity::{FsError, IoResultExt};
/// use std::path::Path;
///
/// fn size(path: &Path) -> Result<u64, FsError> {
///     let meta = std::fs::metadata(path).or_fs_err("size", path)?;
///     Ok(meta.len())
/// }
///
/// let err = size(Path::new("/definitely/not/here")).unwrap_err();
/// assert_eq!(err.path(), Some(Path::new("/definitely/not/here")));
/// ```
pub trait IoResultExt<T> {
    /// Attaches the operation name and entity path to an I/O failure.
    fn or_fs_err(self, operation: &'static str, path: &Path) -> Result<T, FsError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn or_fs_err(self, operation: &'static str, path: &Path) -> Result<T, FsError> {
        self.map_err(|source| FsError::io(operation, path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_includes_path_and_operation() {
        let err = FsError::io(
            "delete",
            "/tmp/x",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "delete failed for /tmp/x: denied");
    }

    #[test]
    fn invalid_input_display() {
        let err = FsError::invalid_input("relative_path", "base is not a local directory");
        assert_eq!(
            err.to_string(),
            "relative_path: invalid input: base is not a local directory"
        );
        assert!(err.is_invalid_input());
        assert!(!err.is_io());
        assert_eq!(err.path(), None);
    }

    #[test]
    fn os_code_comes_from_raw_os_error() {
        let err = FsError::io("read", "/a", io::Error::from_raw_os_error(2));
        assert_eq!(err.os_code(), Some(2));
        assert!(err.is_not_found());
        assert!(err.os_message().is_some());
    }

    #[test]
    fn synthesized_errors_have_no_os_code() {
        let err = FsError::io(
            "write",
            "/a",
            io::Error::new(io::ErrorKind::WriteZero, "short write"),
        );
        assert_eq!(err.os_code(), None);
        assert_eq!(err.kind(), Some(io::ErrorKind::WriteZero));
    }

    #[test]
    fn or_fs_err_captures_path() {
        let result: io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = result.or_fs_err("size", Path::new("/x/y")).unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.path(), Some(Path::new("/x/y")));
    }
}
