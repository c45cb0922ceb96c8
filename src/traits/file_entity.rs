//! Operations on file entities.

use crate::{Entity, FsError};

/// A file entity of any family.
///
/// # Cross-family copies
///
/// Copying between two families is a double dispatch. The source's
/// [`copy_to`](Self::copy_to) takes the direct route when the destination
/// belongs to its own family and otherwise calls the destination's
/// [`copy_from`](Self::copy_from). Whichever side understands the other
/// performs the copy, so neither family needs to know the other's internals.
///
/// ```rust
/// use localfs_entity::{FileEntity, FsError};
///
/// fn backup(src: &dyn FileEntity, dst: &dyn FileEntity) -> Result<(), FsError> {
///     src.copy_to(dst)
/// }
/// ```
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FileEntity`.
pub trait FileEntity: Entity {
    /// Reads the whole file, or at most `length` bytes from the start.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the file is missing or cannot be read
    fn read(&self, length: Option<usize>) -> Result<Vec<u8>, FsError>;

    /// Appends `data`, creating the file if it does not exist.
    ///
    /// Existing content is kept. Use [`truncate`](Self::truncate) first to
    /// replace it.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the file cannot be opened or fewer bytes than
    ///   requested were written
    fn write(&self, data: &[u8]) -> Result<(), FsError>;

    /// Creates the file, or empties it if it exists.
    fn truncate(&self) -> Result<(), FsError>;

    /// Size in bytes.
    fn size(&self) -> Result<u64, FsError>;

    /// Removes the file. Removing a missing file succeeds.
    fn delete(&self) -> Result<(), FsError>;

    /// Replaces this file's content with the content of `source`.
    fn copy_from(&self, source: &dyn FileEntity) -> Result<(), FsError>;

    /// Copies this file's content into `dest`.
    fn copy_to(&self, dest: &dyn FileEntity) -> Result<(), FsError>;

    /// Moves this file to `dest`.
    ///
    /// Within one family this should be a single rename. Across families it
    /// is a copy followed by a delete; if the delete fails both copies remain.
    fn move_to(&self, dest: &dyn FileEntity) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entity_is_object_safe() {
        fn _check(_: &dyn FileEntity) {}
    }

    #[test]
    fn file_entity_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_send_sync::<dyn FileEntity>();
    }
}
