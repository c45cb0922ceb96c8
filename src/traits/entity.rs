//! The contract shared by every entity.

use std::any::Any;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::EntityPath;

/// A filesystem path plus the operations valid on it.
///
/// Entities are cheap values: they hold a decomposed path and nothing else.
/// Every operation re-queries the backing store.
///
/// # Families
///
/// Each concrete implementation is an entity *family*. Operations that can
/// take a shortcut when both sides belong to the same family detect it with
/// [`as_any`](Self::as_any) and a downcast.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Entity`.
pub trait Entity: Send + Sync + fmt::Debug {
    /// The decomposed path of this entity.
    fn entity_path(&self) -> &EntityPath;

    /// Returns `true` if the path resolves to this kind of entity.
    ///
    /// Never fails: an unreachable path is reported as `false`.
    fn exists(&self) -> bool;

    /// Upcast used for same-family detection.
    fn as_any(&self) -> &dyn Any;

    /// The full path.
    fn path(&self) -> PathBuf {
        self.entity_path().path()
    }

    /// The final path segment.
    fn basename(&self) -> &OsStr {
        self.entity_path().basename()
    }

    /// The parent directory part of the path.
    fn dirname(&self) -> &Path {
        self.entity_path().dirname()
    }
}
