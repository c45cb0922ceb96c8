//! # Entity Paths
//!
//! The decomposed path shared by every entity.
//!
//! An [`EntityPath`] splits a path into its parent directory and its final
//! segment when it is constructed. Trailing separators are dropped, so
//! `/home/test/` and `/home/test` produce equal values.
//!
//! ```rust
//! use localfs_entity::EntityPath;
//! use std::path::Path;
//!
//! let path = EntityPath::new("/home/test/");
//! assert_eq!(path.dirname(), Path::new("/home"));
//! assert_eq!(path.basename(), "test");
//! assert_eq!(path.path(), Path::new("/home/test"));
//! ```
//!
//! No method in this module touches the filesystem.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A path decomposed into parent directory and base name.
///
/// Paths without a final segment (`/`, `..`) keep the whole path as the
/// directory part and an empty base name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "PathBuf", into = "PathBuf")
)]
pub struct EntityPath {
    dirname: PathBuf,
    basename: OsString,
}

impl EntityPath {
    /// Decomposes `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => Self {
                dirname: normalize_separators(parent),
                basename: name.to_os_string(),
            },
            _ => Self {
                dirname: normalize_separators(path),
                basename: OsString::new(),
            },
        }
    }

    /// The full path, `dirname/basename`.
    pub fn path(&self) -> PathBuf {
        if self.basename.is_empty() {
            self.dirname.clone()
        } else {
            self.dirname.join(&self.basename)
        }
    }

    /// The final path segment.
    pub fn basename(&self) -> &OsStr {
        &self.basename
    }

    /// The directory part, without a trailing separator.
    pub fn dirname(&self) -> &Path {
        &self.dirname
    }

    /// Path of a child named `name`.
    ///
    /// The result is always below `self`: a root or drive prefix at the
    /// start of `name` is dropped instead of replacing the base.
    pub fn join(&self, name: impl AsRef<Path>) -> Self {
        let relative: PathBuf = name
            .as_ref()
            .components()
            .filter(|component| !matches!(component, Component::Prefix(_) | Component::RootDir))
            .collect();
        Self::new(self.path().join(relative))
    }

    /// Path of the parent directory.
    pub fn parent(&self) -> Self {
        Self::new(&self.dirname)
    }

    /// Path of a sibling named `name`, in the same directory.
    pub fn with_basename(&self, name: impl Into<OsString>) -> Self {
        Self {
            dirname: self.dirname.clone(),
            basename: name.into(),
        }
    }

    /// This path relative to `base`.
    ///
    /// Returns `None` unless `base` is a strict ancestor. Prefixes are
    /// compared component by component, so `/home2` is not an ancestor of
    /// `/home/test`.
    pub fn relative_to(&self, base: &EntityPath) -> Option<PathBuf> {
        let path = self.path();
        let relative = path.strip_prefix(base.path()).ok()?;
        if relative.as_os_str().is_empty() {
            None
        } else {
            Some(relative.to_path_buf())
        }
    }
}

/// Rebuilds `path` from its components, dropping repeated and trailing separators.
fn normalize_separators(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Returns `true` if `name` is usable as a single path segment.
pub(crate) fn is_single_segment(name: &OsStr) -> bool {
    let path = Path::new(name);
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(segment)), None) if segment == name
    )
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

impl From<PathBuf> for EntityPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for EntityPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for EntityPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<EntityPath> for PathBuf {
    fn from(path: EntityPath) -> Self {
        path.path()
    }
}
