//! # localfs-entity
//!
//! File and Directory **entities** for the local filesystem.
//!
//! An entity is a small value holding a path, plus the operations that make
//! sense for that kind of path. Every operation is a direct, blocking call
//! into `std::fs`, and every failure comes back as one error type that names
//! the entity and carries the OS error.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use localfs_entity::{FsError, LocalDirectory};
//!
//! # fn main() -> Result<(), FsError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! # let root = tmp.path().join("project");
//! let project = LocalDirectory::new(&root);
//! project.make_all()?;
//!
//! let notes = project.file("notes.txt");
//! notes.write(b"test")?;
//! assert_eq!(notes.read(None)?, b"test");
//! assert_eq!(project.size(true)?, 4);
//!
//! for file in project.files(true)? {
//!     println!("{}", file?.md5(false)?);
//! }
//!
//! project.delete()?;
//! project.delete()?; // already gone: still Ok
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`LocalFile`] | A regular file: content I/O, hashing, timestamps, copy/move/rename/delete |
//! | [`LocalDirectory`] | A directory: traversal, aggregate size, make/move/rename/delete |
//! | [`EntityPath`] | A path decomposed into `dirname` and `basename` |
//! | [`FsError`] | The error type, carrying the failing entity's path and OS error |
//! | [`Walk`] | Lazy pre-order traversal behind `files`/`directories`/`items` |
//!
//! ---
//!
//! ## Entity Families
//!
//! [`Entity`], [`FileEntity`] and [`DirectoryEntity`] describe what any
//! family of entities offers. The local family is the only one in this
//! crate; other families (archives, remote stores) implement the same traits.
//! Copies between families use [`FileEntity::copy_from`] and
//! [`FileEntity::copy_to`] as a double dispatch.
//!
//! ---
//!
//! ## Error Handling
//!
//! ```rust
//! use localfs_entity::LocalFile;
//!
//! let err = LocalFile::new("/no/such/dir/file").read(None).unwrap_err();
//! assert!(err.is_io());
//! assert!(err.is_not_found());
//! assert_eq!(err.path().unwrap().to_str(), Some("/no/such/dir/file"));
//! ```
//!
//! Two operations never fail for a missing path: `exists()` returns `false`
//! and `delete()` does nothing.
//!
//! ---
//!
//! ## Value Semantics
//!
//! Entities never change after construction. `rename` and
//! [`LocalDirectory::move_into`] return a new entity for the new location;
//! the old value still describes the old path.
//!
//! ---
//!
//! ## Logging
//!
//! Mutating operations emit `tracing` events at `debug` level; traversal
//! emits `trace` events. The crate never installs a subscriber.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | yes | Serialize entities as their path; JSON helpers in [`FileEntityJson`] |

// Private modules
mod error;
mod ext;
mod local;
mod path;
mod traits;
mod types;

// Public re-exports - error types
pub use error::{FsError, IoResultExt};

// Public re-exports - core types
pub use path::EntityPath;
pub use types::{Digest, FileType, Permissions, DEFAULT_DIR_MODE, HASH_BUFFER_SIZE};

// Public re-exports - entity contracts
pub use traits::{DirectoryEntity, Entity, FileEntity};

// Public re-exports - local family
pub use local::{Directories, Files, Item, Items, LocalDirectory, LocalFile, Walk, WalkEntry};

// Public re-exports - extensions
pub use ext::FileEntityExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FileEntityJson;
