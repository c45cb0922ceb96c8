//! Directories on the local filesystem.

use std::any::Any;
use std::ffi::OsStr;
use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::walk::{Directories, Files, Item, Items, Walk};
use crate::path::is_single_segment;
use crate::{DirectoryEntity, Entity, EntityPath, FsError, IoResultExt, LocalFile, Permissions};

/// A directory on the local filesystem.
///
/// Besides its own operations it is a factory for child entities:
/// [`file`](Self::file) and [`directory`](Self::directory) compose paths
/// without touching the filesystem.
///
/// ```rust,no_run
/// use localfs_entity::LocalDirectory;
///
/// # fn main() -> Result<(), localfs_entity::FsError> {
/// let project = LocalDirectory::new("/srv/project");
/// project.make_all()?;
/// project.file("README").write(b"hello\n")?;
///
/// for file in project.files(true)? {
///     let file = file?;
///     println!("{} {}", file.path().display(), file.size()?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct LocalDirectory {
    path: EntityPath,
}

impl LocalDirectory {
    /// Creates a directory entity for `path`. Does not touch the filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: EntityPath::new(path),
        }
    }

    /// Creates a directory entity from an already decomposed path.
    pub fn from_entity_path(path: EntityPath) -> Self {
        Self { path }
    }

    /// The decomposed path.
    pub fn entity_path(&self) -> &EntityPath {
        &self.path
    }

    /// The full path.
    pub fn path(&self) -> PathBuf {
        self.path.path()
    }

    /// The directory name.
    pub fn basename(&self) -> &OsStr {
        self.path.basename()
    }

    /// The parent directory part of the path.
    pub fn dirname(&self) -> &Path {
        self.path.dirname()
    }

    /// Returns `true` if the path resolves to a directory.
    pub fn exists(&self) -> bool {
        self.path().is_dir()
    }

    /// Creates the directory with the given mode.
    ///
    /// With `recursive`, missing ancestors are created too and an existing
    /// directory is accepted. Without it, the parent must exist and the
    /// directory must not. `mode` is applied on Unix and ignored elsewhere.
    pub fn make(&self, recursive: bool, mode: Permissions) -> Result<(), FsError> {
        let path = self.path();
        debug!(path = %path.display(), recursive, mode = %mode, "creating directory");
        let mut builder = DirBuilder::new();
        builder.recursive(recursive);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode.mode());
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(&path).or_fs_err("make", &path)
    }

    /// Creates the directory and its ancestors with mode `0o755`.
    pub fn make_all(&self) -> Result<(), FsError> {
        self.make(true, Permissions::default_dir())
    }

    /// Returns `true` if the directory has no entries.
    pub fn is_empty(&self) -> Result<bool, FsError> {
        let path = self.path();
        let mut listing = fs::read_dir(&path).or_fs_err("is_empty", &path)?;
        Ok(listing.next().is_none())
    }

    /// Total size in bytes of the files yielded by [`files`](Self::files).
    pub fn size(&self, recursive: bool) -> Result<u64, FsError> {
        let mut total = 0;
        for file in self.files(recursive)? {
            total += file?.size()?;
        }
        Ok(total)
    }

    /// A walk over everything below this directory.
    pub fn walk(&self) -> Result<Walk, FsError> {
        Walk::new(self.path())
    }

    fn walk_with(&self, recursive: bool) -> Result<Walk, FsError> {
        let walk = self.walk()?;
        Ok(if recursive { walk } else { walk.max_depth(1) })
    }

    /// Regular files directly inside this directory, or at any depth if
    /// `recursive`.
    pub fn files(&self, recursive: bool) -> Result<Files, FsError> {
        Ok(Files::new(self.walk_with(recursive)?))
    }

    /// Subdirectories directly inside this directory, or at any depth if
    /// `recursive`. The directory itself is not included.
    pub fn directories(&self, recursive: bool) -> Result<Directories, FsError> {
        Ok(Directories::new(self.walk_with(recursive)?))
    }

    /// Files and subdirectories in one pre-order pass.
    pub fn items(&self, recursive: bool) -> Result<Items, FsError> {
        Ok(Items::new(self.walk_with(recursive)?))
    }

    /// Moves this directory into `dest`, creating `dest` if needed.
    ///
    /// Returns the entity at `dest/<basename>`.
    pub fn move_into(&self, dest: &LocalDirectory) -> Result<LocalDirectory, FsError> {
        if !dest.exists() {
            dest.make_all()?;
        }
        let path = self.path();
        let target = dest.path.join(self.basename());
        debug!(from = %path.display(), to = %target, "moving directory");
        fs::rename(&path, target.path()).or_fs_err("move", &path)?;
        Ok(LocalDirectory::from_entity_path(target))
    }

    /// Renames the directory within its parent.
    ///
    /// Returns the entity for the new name. `self` keeps describing the old
    /// path.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidInput`] if `new_name` is not a single path segment
    /// - [`FsError::Io`] if the rename fails
    pub fn rename(&self, new_name: impl AsRef<OsStr>) -> Result<LocalDirectory, FsError> {
        let new_name = new_name.as_ref();
        if !is_single_segment(new_name) {
            return Err(FsError::invalid_input(
                "rename",
                format!("{} is not a plain directory name", Path::new(new_name).display()),
            ));
        }
        let path = self.path();
        let target = self.path.with_basename(new_name);
        debug!(from = %path.display(), to = %target, "renaming directory");
        fs::rename(&path, target.path()).or_fs_err("rename", &path)?;
        Ok(LocalDirectory::from_entity_path(target))
    }

    /// Removes the directory and everything below it.
    ///
    /// Succeeds without doing anything when there is no directory at the
    /// path. Symlinks are unlinked, never followed; a path that is itself a
    /// symlink to a directory only loses the link. A failure part-way leaves
    /// whatever was not yet removed.
    pub fn delete(&self) -> Result<(), FsError> {
        if !self.exists() {
            return Ok(());
        }
        let path = self.path();
        debug!(path = %path.display(), "deleting directory");

        let link = fs::symlink_metadata(&path).or_fs_err("delete", &path)?;
        if link.file_type().is_symlink() {
            return fs::remove_file(&path).or_fs_err("delete", &path);
        }
        fs::remove_dir_all(&path).or_fs_err("delete", &path)
    }

    /// Copies the contents of this directory into `dest`.
    ///
    /// `dest` is created if needed; existing files in it are overwritten.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidInput`] if `dest` is this directory or below it
    /// - [`FsError::Io`] if any part of the tree cannot be read or written
    pub fn copy_to(&self, dest: &LocalDirectory) -> Result<(), FsError> {
        if resolve_lenient(&dest.path())?.starts_with(self.real_path()?) {
            return Err(FsError::invalid_input(
                "copy",
                format!(
                    "{} is inside {}",
                    dest.path().display(),
                    self.path().display()
                ),
            ));
        }
        debug!(from = %self.path, to = %dest.path, "copying directory");
        dest.make_all()?;

        for item in self.items(true)? {
            let item = item?;
            let relative = super::relative_path(item_path(&item), self)?;
            match item {
                Item::Directory(_) => dest.directory(&relative).make_all()?,
                Item::File(file) => file.copy_to(&dest.file(&relative))?,
            }
        }
        Ok(())
    }

    /// Canonical absolute path with all symlinks resolved.
    pub fn real_path(&self) -> Result<PathBuf, FsError> {
        let path = self.path();
        fs::canonicalize(&path).or_fs_err("real_path", &path)
    }

    /// A file named `name` inside this directory. Does not touch the filesystem.
    pub fn file(&self, name: impl AsRef<Path>) -> LocalFile {
        LocalFile::from_entity_path(self.path.join(name))
    }

    /// A directory named `name` inside this directory. Does not touch the filesystem.
    pub fn directory(&self, name: impl AsRef<Path>) -> LocalDirectory {
        LocalDirectory::from_entity_path(self.path.join(name))
    }

    /// The parent directory.
    pub fn parent(&self) -> LocalDirectory {
        LocalDirectory::from_entity_path(self.path.parent())
    }

    /// This directory's path relative to `base`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidInput`] if `base` is not a [`LocalDirectory`]
    /// - [`FsError::Io`] if this directory is not below `base`
    pub fn relative_path(&self, base: &dyn DirectoryEntity) -> Result<PathBuf, FsError> {
        super::relative_path(&self.path, base)
    }
}

/// Canonical form of `path` even when its tail does not exist yet: the
/// deepest existing ancestor is canonicalized and the missing names are
/// appended to it.
fn resolve_lenient(path: &Path) -> Result<PathBuf, FsError> {
    let absolute = std::path::absolute(path).or_fs_err("copy", path)?;
    let mut missing = Vec::new();
    let mut current = absolute.as_path();
    loop {
        match fs::canonicalize(current) {
            Ok(real) => return Ok(missing.iter().rev().fold(real, |acc, name| acc.join(name))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match (current.file_name(), current.parent()) {
                    (Some(name), Some(parent)) => {
                        missing.push(name.to_os_string());
                        current = parent;
                    }
                    _ => return Err(FsError::io("copy", path, err)),
                }
            }
            Err(err) => return Err(FsError::io("copy", path, err)),
        }
    }
}

fn item_path(item: &Item) -> &EntityPath {
    match item {
        Item::File(file) => file.entity_path(),
        Item::Directory(dir) => dir.entity_path(),
    }
}

impl Entity for LocalDirectory {
    fn entity_path(&self) -> &EntityPath {
        &self.path
    }

    fn exists(&self) -> bool {
        LocalDirectory::exists(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl DirectoryEntity for LocalDirectory {
    fn make(&self, recursive: bool, mode: Permissions) -> Result<(), FsError> {
        LocalDirectory::make(self, recursive, mode)
    }

    fn delete(&self) -> Result<(), FsError> {
        LocalDirectory::delete(self)
    }
}

impl From<&str> for LocalDirectory {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for LocalDirectory {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}
