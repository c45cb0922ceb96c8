//! # Extension Traits
//!
//! Convenience methods for file entities of any family.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read_all`](FileEntityExt::read_all) | Read the whole file |
//! | [`is_empty`](FileEntityExt::is_empty) | Check for a zero-length file |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled (the default):
//!
//! | Method | Description |
//! |--------|-------------|
//! | `read_json` | Read and deserialize a JSON file |
//! | `replace_json` | Replace the file's content with serialized JSON |

use crate::{FileEntity, FsError};

/// Extension methods for any file entity.
///
/// ```rust
/// use localfs_entity::{FileEntity, FileEntityExt, FsError};
///
/// fn load(file: &dyn FileEntity) -> Result<Option<Vec<u8>>, FsError> {
///     if file.is_empty()? {
///         return Ok(None);
///     }
///     file.read_all().map(Some)
/// }
/// ```
pub trait FileEntityExt: FileEntity {
    /// Reads the whole file.
    fn read_all(&self) -> Result<Vec<u8>, FsError> {
        self.read(None)
    }

    /// Returns `true` if the file exists and has no content.
    fn is_empty(&self) -> Result<bool, FsError> {
        Ok(self.size()? == 0)
    }
}

impl<F: FileEntity + ?Sized> FileEntityExt for F {}

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON helpers for file entities.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait FileEntityJson: FileEntity {
        /// Reads the file and deserializes it as JSON.
        ///
        /// # Errors
        ///
        /// - [`FsError::Io`] if the file cannot be read
        /// - [`FsError::Deserialization`] if the content is not valid JSON for `T`
        fn read_json<T: DeserializeOwned>(&self) -> Result<T, FsError> {
            let data = self.read(None)?;
            serde_json::from_slice(&data).map_err(|e| FsError::Deserialization(e.to_string()))
        }

        /// Replaces the file's content with `value` as pretty-printed JSON.
        ///
        /// The file is truncated first, so this does not append like
        /// [`FileEntity::write`].
        ///
        /// # Errors
        ///
        /// - [`FsError::Serialization`] if `value` cannot be serialized
        /// - [`FsError::Io`] if the file cannot be written
        fn replace_json<T: Serialize>(&self, value: &T) -> Result<(), FsError> {
            let json = serde_json::to_vec_pretty(value)
                .map_err(|e| FsError::Serialization(e.to_string()))?;
            self.truncate()?;
            self.write(&json)
        }
    }

    impl<F: FileEntity + ?Sized> FileEntityJson for F {}
}

#[cfg(feature = "serde")]
pub use json::FileEntityJson;
