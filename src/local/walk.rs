//! # Directory Traversal
//!
//! Lazy, pre-order, depth-first iteration over a local directory tree.
//!
//! [`Walk`] keeps an explicit stack of open OS directory listings. Each call
//! to `next` reads one entry from the innermost listing. When a directory is
//! yielded its listing is opened on the *following* call, so its contents
//! come before its later siblings (pre-order). A consumer that stops early
//! never opens directories it did not reach.
//!
//! ```text
//! root/                 yields, recursive:
//! ├── a.txt             a.txt
//! └── sub/              sub
//!     ├── b.txt         sub/b.txt
//!     └── empty/        sub/empty
//! ```
//!
//! Sibling order is whatever the OS listing returns. The root itself and the
//! `.`/`..` pseudo-entries are never yielded. Only real directories are
//! descended into; a symlink to a directory is yielded as a directory but not
//! entered. Entries that are neither files nor directories (sockets, dangling
//! symlinks) are skipped.
//!
//! Dropping the iterator closes every listing it holds open. There is no
//! snapshot: changes made to the tree while iterating may or may not be seen.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::{FileType, FsError, IoResultExt, LocalDirectory, LocalFile};

/// One node found during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: PathBuf,
    file_type: FileType,
    depth: usize,
}

impl WalkEntry {
    /// Full path of the node.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the node is a file or a directory.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Depth below the walk root; direct children are at depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

struct Frame {
    dir: PathBuf,
    listing: ReadDir,
}

/// Pre-order depth-first iterator over the nodes below a directory.
///
/// The outer `Result` from [`Walk::new`] reports whether the root could be
/// opened; each item's `Result` reports whether that entry, or a directory
/// being entered, could be read. A failure does not end the walk.
pub struct Walk {
    stack: Vec<Frame>,
    pending: Option<PathBuf>,
    max_depth: usize,
}

impl Walk {
    /// Opens `root` for an unbounded walk.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if `root` cannot be listed
    pub fn new(root: impl AsRef<Path>) -> Result<Self, FsError> {
        let root = root.as_ref();
        let listing = fs::read_dir(root).or_fs_err("read_dir", root)?;
        Ok(Self {
            stack: vec![Frame {
                dir: root.to_path_buf(),
                listing,
            }],
            pending: None,
            max_depth: usize::MAX,
        })
    }

    /// Limits how deep the walk descends. `1` lists only direct children.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    fn enter_pending(&mut self) -> Option<Result<(), FsError>> {
        let dir = self.pending.take()?;
        trace!(path = %dir.display(), "entering directory");
        Some(fs::read_dir(&dir).or_fs_err("read_dir", &dir).map(|listing| {
            self.stack.push(Frame { dir, listing });
        }))
    }
}

impl Iterator for Walk {
    type Item = Result<WalkEntry, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(Err(err)) = self.enter_pending() {
            return Some(Err(err));
        }

        loop {
            let depth = self.stack.len();
            let frame = self.stack.last_mut()?;
            let entry = match frame.listing.next() {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(err)) => return Some(Err(FsError::io("read_dir", &frame.dir, err))),
                Some(Ok(entry)) => entry,
            };

            let path = entry.path();
            let link_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => return Some(Err(FsError::io("read_dir", path, err))),
            };

            let file_type = if link_type.is_dir() {
                FileType::Directory
            } else if link_type.is_file() {
                FileType::File
            } else {
                match fs::metadata(&path) {
                    Ok(meta) if meta.is_dir() => FileType::Directory,
                    Ok(meta) if meta.is_file() => FileType::File,
                    _ => {
                        trace!(path = %path.display(), "skipping entry");
                        continue;
                    }
                }
            };

            if link_type.is_dir() && depth < self.max_depth {
                self.pending = Some(path.clone());
            }

            return Some(Ok(WalkEntry {
                path,
                file_type,
                depth,
            }));
        }
    }
}

/// Files below a directory, from [`LocalDirectory::files`].
pub struct Files {
    walk: Walk,
}

impl Files {
    pub(crate) fn new(walk: Walk) -> Self {
        Self { walk }
    }
}

impl Iterator for Files {
    type Item = Result<LocalFile, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walk.next()? {
                Ok(entry) if entry.file_type == FileType::File => {
                    return Some(Ok(LocalFile::new(entry.path)));
                }
                Ok(_) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Directories below a directory, from [`LocalDirectory::directories`].
pub struct Directories {
    walk: Walk,
}

impl Directories {
    pub(crate) fn new(walk: Walk) -> Self {
        Self { walk }
    }
}

impl Iterator for Directories {
    type Item = Result<LocalDirectory, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walk.next()? {
                Ok(entry) if entry.file_type == FileType::Directory => {
                    return Some(Ok(LocalDirectory::new(entry.path)));
                }
                Ok(_) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// A file or a directory found by [`LocalDirectory::items`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    /// A regular file.
    File(LocalFile),
    /// A directory.
    Directory(LocalDirectory),
}

impl Item {
    /// Full path of the item.
    pub fn path(&self) -> PathBuf {
        match self {
            Item::File(file) => file.path(),
            Item::Directory(dir) => dir.path(),
        }
    }

    /// Returns `true` for [`Item::File`].
    pub fn is_file(&self) -> bool {
        matches!(self, Item::File(_))
    }

    /// Returns `true` for [`Item::Directory`].
    pub fn is_dir(&self) -> bool {
        matches!(self, Item::Directory(_))
    }
}

/// Files and directories below a directory, from [`LocalDirectory::items`].
pub struct Items {
    walk: Walk,
}

impl Items {
    pub(crate) fn new(walk: Walk) -> Self {
        Self { walk }
    }
}

impl Iterator for Items {
    type Item = Result<Item, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.walk.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        Some(Ok(match entry.file_type {
            FileType::File => Item::File(LocalFile::new(entry.path)),
            FileType::Directory => Item::Directory(LocalDirectory::new(entry.path)),
        }))
    }
}
