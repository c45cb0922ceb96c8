//! Operations on directory entities.

use crate::{Entity, FsError, Permissions};

/// A directory entity of any family.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn DirectoryEntity`.
pub trait DirectoryEntity: Entity {
    /// Creates the directory, and its ancestors if `recursive`.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the parent is missing and `recursive` is false
    /// - [`FsError::Io`] if the directory exists and `recursive` is false
    fn make(&self, recursive: bool, mode: Permissions) -> Result<(), FsError>;

    /// Removes the directory and everything below it.
    ///
    /// Removing a missing directory succeeds.
    fn delete(&self) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_entity_is_object_safe() {
        fn _check(_: &dyn DirectoryEntity) {}
    }
}
