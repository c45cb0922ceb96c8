//! Core value types shared by file and directory entities.

use std::fmt;

/// Default creation mode for directories (`0o755`, `rwxr-xr-x`).
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Buffer size used when streaming a file through a hasher.
pub const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Kind of a filesystem node as seen by traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Unix-style permissions stored as a mode bitmask.
///
/// Only used as the creation mode of new directories. On platforms without
/// Unix mode bits the value is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permissions(u32);

impl Permissions {
    /// Create permissions from a Unix mode (e.g., 0o755).
    #[inline]
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & 0o7777)
    }

    /// Get the raw mode value.
    #[inline]
    pub const fn mode(&self) -> u32 {
        self.0
    }

    /// Default permissions for a new directory (0o755 = rwxr-xr-x).
    #[inline]
    pub const fn default_dir() -> Self {
        Self(DEFAULT_DIR_MODE)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::default_dir()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// A content digest, either raw bytes or lowercase hex text.
///
/// Returned by [`LocalFile::md5`](crate::LocalFile::md5) and
/// [`LocalFile::sha1`](crate::LocalFile::sha1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Digest {
    /// The binary digest.
    Raw(Vec<u8>),
    /// The digest encoded as lowercase hexadecimal.
    Hex(String),
}

impl Digest {
    pub(crate) fn from_output(bytes: &[u8], raw: bool) -> Self {
        if raw {
            Digest::Raw(bytes.to_vec())
        } else {
            Digest::Hex(hex::encode(bytes))
        }
    }

    /// The digest as bytes: binary for [`Digest::Raw`], ASCII hex for [`Digest::Hex`].
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Digest::Raw(bytes) => bytes,
            Digest::Hex(text) => text.as_bytes(),
        }
    }

    /// Consumes the digest, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Digest::Raw(bytes) => bytes,
            Digest::Hex(text) => text.into_bytes(),
        }
    }

    /// The hex text, if this is an encoded digest.
    pub fn as_hex(&self) -> Option<&str> {
        match self {
            Digest::Hex(text) => Some(text),
            Digest::Raw(_) => None,
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Digest::Raw(bytes) => f.write_str(&hex::encode(bytes)),
            Digest::Hex(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissions_masks_high_bits() {
        assert_eq!(Permissions::from_mode(0o170755).mode(), 0o755);
    }

    #[test]
    fn permissions_default_is_dir_mode() {
        assert_eq!(Permissions::default().mode(), DEFAULT_DIR_MODE);
        assert_eq!(Permissions::default().to_string(), "0755");
    }

    #[test]
    fn digest_hex_and_raw_agree_on_display() {
        let raw = Digest::from_output(&[0xde, 0xad, 0xbe, 0xef], true);
        let hex = Digest::from_output(&[0xde, 0xad, 0xbe, 0xef], false);
        assert_eq!(raw.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(hex.as_hex(), Some("deadbeef"));
        assert_eq!(raw.to_string(), hex.to_string());
    }
}
