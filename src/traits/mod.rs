//! # Entity Traits
//!
//! The contracts every entity family satisfies.
//!
//! ```text
//!                Entity            (path, basename, dirname, exists)
//!               ↙      ↘
//!     FileEntity        DirectoryEntity
//!  (read, write, copy)  (make, delete)
//! ```
//!
//! | Trait | Implemented by | Purpose |
//! |-------|----------------|---------|
//! | [`Entity`] | every entity | Path accessors and existence |
//! | [`FileEntity`] | [`LocalFile`](crate::LocalFile) | Content I/O and cross-family copy/move |
//! | [`DirectoryEntity`] | [`LocalDirectory`](crate::LocalDirectory) | Creation and removal |
//!
//! A second family (an archive, a remote store) implements the same traits.
//! [`FileEntity::copy_from`] and [`FileEntity::copy_to`] let a local file
//! and a foreign file exchange content without either knowing the other.
//!
//! ## Object Safety
//!
//! All traits are object-safe:
//!
//! ```rust
//! use localfs_entity::{Entity, FileEntity, LocalFile};
//!
//! fn describe(file: &dyn FileEntity) -> String {
//!     format!("{} ({})", file.path().display(), file.exists())
//! }
//!
//! let file = LocalFile::new("/tmp/does-not-matter");
//! assert!(describe(&file).starts_with("/tmp/does-not-matter"));
//! ```

mod directory_entity;
mod entity;
mod file_entity;

pub use directory_entity::DirectoryEntity;
pub use entity::Entity;
pub use file_entity::FileEntity;
