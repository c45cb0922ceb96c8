//! # Local Filesystem Family
//!
//! [`LocalFile`] and [`LocalDirectory`] map every entity operation onto a
//! `std::fs` call. Failures are translated with
//! [`IoResultExt::or_fs_err`](crate::IoResultExt::or_fs_err) right at the
//! failing call, so each error names the entity it happened to.
//!
//! | Operation | Primitive |
//! |-----------|-----------|
//! | `LocalFile::write` / `append` | `OpenOptions::append` + `write_all` |
//! | `LocalFile::move_to` (local) | `fs::rename` |
//! | `LocalFile::copy_to` (local) | `fs::copy` |
//! | `LocalFile::touch` | `File::set_times` |
//! | `LocalDirectory::make` | `DirBuilder` |
//! | `LocalDirectory::files` / `directories` / `items` | `fs::read_dir`, via [`Walk`] |
//! | `real_path` | `fs::canonicalize` |

mod directory;
mod file;
mod walk;

pub use directory::LocalDirectory;
pub use file::LocalFile;
pub use walk::{Directories, Files, Item, Items, Walk, WalkEntry};

use std::io;
use std::path::PathBuf;

use crate::{DirectoryEntity, Entity, EntityPath, FsError};

/// Path of `entity` relative to a local `base` directory.
pub(crate) fn relative_path(
    entity: &EntityPath,
    base: &dyn DirectoryEntity,
) -> Result<PathBuf, FsError> {
    let Some(base) = Entity::as_any(base).downcast_ref::<LocalDirectory>() else {
        return Err(FsError::invalid_input(
            "relative_path",
            "base is not a local directory",
        ));
    };
    entity.relative_to(base.entity_path()).ok_or_else(|| {
        FsError::io(
            "relative_path",
            entity.path(),
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not under {}", base.path().display()),
            ),
        )
    })
}
