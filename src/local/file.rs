//! Regular files on the local filesystem.

use std::any::Any;
use std::ffi::OsStr;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::path::is_single_segment;
use crate::{
    Digest, DirectoryEntity, Entity, EntityPath, FileEntity, FsError, IoResultExt, LocalDirectory,
    HASH_BUFFER_SIZE,
};

/// A regular file on the local filesystem.
///
/// Holds a path and nothing else; every method queries the OS.
///
/// ```rust,no_run
/// use localfs_entity::LocalFile;
///
/// # fn main() -> Result<(), localfs_entity::FsError> {
/// let log = LocalFile::new("/tmp/app.log");
/// log.write(b"started\n")?;
/// log.append(b"ready\n")?;
/// assert_eq!(log.read(Some(7))?, b"started");
/// println!("{}", log.sha1(false)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct LocalFile {
    path: EntityPath,
}

impl LocalFile {
    /// Creates a file entity for `path`. Does not touch the filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: EntityPath::new(path),
        }
    }

    /// Creates a file entity from an already decomposed path.
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

    /// The file name.
    pub fn basename(&self) -> &OsStr {
        self.path.basename()
    }

    /// The directory containing the file.
    pub fn dirname(&self) -> &Path {
        self.path.dirname()
    }

    /// Returns `true` if the path resolves to a regular file.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Appends `data`, creating the file if it does not exist.
    ///
    /// This never replaces existing content.
    pub fn write(&self, data: &[u8]) -> Result<(), FsError> {
        let path = self.path();
        debug!(path = %path.display(), bytes = data.len(), "appending to file");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .or_fs_err("write", &path)?;
        file.write_all(data).or_fs_err("write", &path)
    }

    /// Same as [`write`](Self::write).
    pub fn append(&self, data: &[u8]) -> Result<(), FsError> {
        self.write(data)
    }

    /// Reads the whole file, or at most `length` bytes from the start.
    pub fn read(&self, length: Option<usize>) -> Result<Vec<u8>, FsError> {
        let path = self.path();
        match length {
            None => fs::read(&path).or_fs_err("read", &path),
            Some(length) => {
                let file = File::open(&path).or_fs_err("read", &path)?;
                let mut buf = Vec::new();
                file.take(length as u64)
                    .read_to_end(&mut buf)
                    .or_fs_err("read", &path)?;
                Ok(buf)
            }
        }
    }

    /// Reads the whole file as UTF-8.
    ///
    /// Invalid UTF-8 is reported as an I/O error of kind `InvalidData`.
    pub fn read_to_string(&self) -> Result<String, FsError> {
        let path = self.path();
        fs::read_to_string(&path).or_fs_err("read", &path)
    }

    /// Creates the file, or empties it if it exists.
    pub fn truncate(&self) -> Result<(), FsError> {
        let path = self.path();
        debug!(path = %path.display(), "truncating file");
        File::create(&path).or_fs_err("truncate", &path)?;
        Ok(())
    }

    /// Size in bytes.
    pub fn size(&self) -> Result<u64, FsError> {
        let path = self.path();
        let meta = fs::metadata(&path).or_fs_err("size", &path)?;
        Ok(meta.len())
    }

    /// Moves the file to `dest`.
    ///
    /// A local destination is reached with a single rename. Any other family
    /// gets a copy followed by deleting this file; if that delete fails, both
    /// copies are left in place and the error is returned.
    pub fn move_to(&self, dest: &dyn FileEntity) -> Result<(), FsError> {
        let path = self.path();
        if let Some(local) = dest.as_any().downcast_ref::<LocalFile>() {
            debug!(from = %path.display(), to = %local.path().display(), "renaming file");
            return fs::rename(&path, local.path()).or_fs_err("move", &path);
        }

        self.copy_to(dest)?;
        self.delete().inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "file copied but source was not removed");
        })
    }

    /// Copies the file to `dest`.
    ///
    /// A local destination is copied directly. Any other family is asked to
    /// [`copy_from`](FileEntity::copy_from) this file.
    pub fn copy_to(&self, dest: &dyn FileEntity) -> Result<(), FsError> {
        let Some(local) = dest.as_any().downcast_ref::<LocalFile>() else {
            return dest.copy_from(self);
        };
        copy_local(&self.path(), &local.path())
    }

    /// Replaces this file's content with the content of `source`.
    pub fn copy_from(&self, source: &dyn FileEntity) -> Result<(), FsError> {
        if let Some(local) = source.as_any().downcast_ref::<LocalFile>() {
            return copy_local(&local.path(), &self.path());
        }

        let data = source.read(None)?;
        self.truncate()?;
        self.write(&data)
    }

    /// Renames the file within its directory.
    ///
    /// Returns the entity for the new name. `self` keeps describing the old
    /// path.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidInput`] if `new_name` is not a single path segment
    /// - [`FsError::Io`] if the rename fails, e.g. the file does not exist
    pub fn rename(&self, new_name: impl AsRef<OsStr>) -> Result<LocalFile, FsError> {
        let new_name = new_name.as_ref();
        if !is_single_segment(new_name) {
            return Err(FsError::invalid_input(
                "rename",
                format!("{} is not a plain file name", Path::new(new_name).display()),
            ));
        }
        let path = self.path();
        let target = self.path.with_basename(new_name);
        debug!(from = %path.display(), to = %target, "renaming file");
        fs::rename(&path, target.path()).or_fs_err("rename", &path)?;
        Ok(LocalFile::from_entity_path(target))
    }

    /// Removes the file.
    ///
    /// Succeeds without doing anything when there is no regular file at the
    /// path.
    pub fn delete(&self) -> Result<(), FsError> {
        if !self.exists() {
            return Ok(());
        }
        let path = self.path();
        debug!(path = %path.display(), "deleting file");
        fs::remove_file(&path).or_fs_err("delete", &path)
    }

    /// MD5 of the file content, binary if `raw`, otherwise lowercase hex.
    pub fn md5(&self, raw: bool) -> Result<Digest, FsError> {
        let bytes = self.hash_with::<md5::Md5>("md5")?;
        Ok(Digest::from_output(&bytes, raw))
    }

    /// SHA-1 of the file content, binary if `raw`, otherwise lowercase hex.
    pub fn sha1(&self, raw: bool) -> Result<Digest, FsError> {
        let bytes = self.hash_with::<sha1::Sha1>("sha1")?;
        Ok(Digest::from_output(&bytes, raw))
    }

    fn hash_with<H: sha1::Digest>(&self, operation: &'static str) -> Result<Vec<u8>, FsError> {
        let path = self.path();
        let mut file = File::open(&path).or_fs_err(operation, &path)?;
        let mut hasher = H::new();
        let mut buf = vec![0u8; HASH_BUFFER_SIZE];
        loop {
            match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => hasher.update(&buf[..n]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(FsError::io(operation, path, err)),
            }
        }
        Ok(hasher.finalize().to_vec())
    }

    /// Sets the modification and access times, creating the file if needed.
    ///
    /// `modified` defaults to now and `accessed` defaults to `modified`.
    pub fn touch(
        &self,
        modified: Option<SystemTime>,
        accessed: Option<SystemTime>,
    ) -> Result<(), FsError> {
        let modified = modified.unwrap_or_else(SystemTime::now);
        let accessed = accessed.unwrap_or(modified);
        let path = self.path();
        debug!(path = %path.display(), "touching file");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .or_fs_err("touch", &path)?;
        let times = FileTimes::new()
            .set_modified(modified)
            .set_accessed(accessed);
        file.set_times(times).or_fs_err("touch", &path)
    }

    /// Last modification time.
    pub fn modified_time(&self) -> Result<SystemTime, FsError> {
        let path = self.path();
        fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .or_fs_err("modified_time", &path)
    }

    /// Last access time.
    pub fn accessed_time(&self) -> Result<SystemTime, FsError> {
        let path = self.path();
        fs::metadata(&path)
            .and_then(|meta| meta.accessed())
            .or_fs_err("accessed_time", &path)
    }

    /// Canonical absolute path with all symlinks resolved.
    pub fn real_path(&self) -> Result<PathBuf, FsError> {
        let path = self.path();
        fs::canonicalize(&path).or_fs_err("real_path", &path)
    }

    /// The directory containing this file.
    pub fn directory(&self) -> LocalDirectory {
        LocalDirectory::from_entity_path(self.path.parent())
    }

    /// This file's path relative to `base`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidInput`] if `base` is not a [`LocalDirectory`]
    /// - [`FsError::Io`] if the file is not below `base`
    pub fn relative_path(&self, base: &dyn DirectoryEntity) -> Result<PathBuf, FsError> {
        super::relative_path(&self.path, base)
    }
}

/// `fs::copy` opens `to` with truncation, so copying a file onto itself
/// would empty it. That case is refused before any data is touched.
fn copy_local(from: &Path, to: &Path) -> Result<(), FsError> {
    if same_file(from, to) {
        return Err(FsError::io(
            "copy",
            from,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} and {} are the same file", from.display(), to.display()),
            ),
        ));
    }
    debug!(from = %from.display(), to = %to.display(), "copying file");
    fs::copy(from, to).or_fs_err("copy", from)?;
    Ok(())
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Entity for LocalFile {
    fn entity_path(&self) -> &EntityPath {
        &self.path
    }

    fn exists(&self) -> bool {
        LocalFile::exists(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FileEntity for LocalFile {
    fn read(&self, length: Option<usize>) -> Result<Vec<u8>, FsError> {
        LocalFile::read(self, length)
    }

    fn write(&self, data: &[u8]) -> Result<(), FsError> {
        LocalFile::write(self, data)
    }

    fn truncate(&self) -> Result<(), FsError> {
        LocalFile::truncate(self)
    }

    fn size(&self) -> Result<u64, FsError> {
        LocalFile::size(self)
    }

    fn delete(&self) -> Result<(), FsError> {
        LocalFile::delete(self)
    }

    fn copy_from(&self, source: &dyn FileEntity) -> Result<(), FsError> {
        LocalFile::copy_from(self, source)
    }

    fn copy_to(&self, dest: &dyn FileEntity) -> Result<(), FsError> {
        LocalFile::copy_to(self, dest)
    }

    fn move_to(&self, dest: &dyn FileEntity) -> Result<(), FsError> {
        LocalFile::move_to(self, dest)
    }
}

impl From<&str> for LocalFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for LocalFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::TempDir;

    fn scratch() -> TempDir {
        tempfile::tempdir().expect("should create temp dir")
    }

    #[test]
    fn constructor_decomposes_path() {
        let file = LocalFile::new("/home/test");
        assert_eq!(file.basename(), "test");
        assert_eq!(file.dirname(), Path::new("/home"));
    }

    #[test]
    fn trailing_separator_is_ignored() {
        assert_eq!(LocalFile::new("/home/test/").path(), PathBuf::from("/home/test"));
        assert_eq!(LocalFile::new("/home/test/"), LocalFile::new("/home/test"));
    }

    #[test]
    fn directory_is_parent() {
        let parent = LocalFile::new("/home/test").directory();
        assert_eq!(parent.path(), PathBuf::from("/home"));
    }

    #[test]
    fn write_appends() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("log"));
        file.write(b"one").unwrap();
        file.write(b"two").unwrap();
        file.append(b"three").unwrap();
        assert_eq!(file.read(None).unwrap(), b"onetwothree");
        assert_eq!(file.size().unwrap(), 11);
    }

    #[test]
    fn read_with_length_returns_prefix() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("data"));
        file.write(b"test").unwrap();
        assert_eq!(file.read(Some(2)).unwrap(), b"te");
        assert_eq!(file.read(Some(100)).unwrap(), b"test");
        assert_eq!(file.read(Some(0)).unwrap(), b"");
    }

    #[test]
    fn read_with_huge_length_returns_whole_file() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("data"));
        file.write(b"test").unwrap();
        assert_eq!(file.read(Some(usize::MAX)).unwrap(), b"test");
        assert_eq!(file.read(Some(1 << 40)).unwrap(), b"test");
    }

    #[test]
    fn read_missing_file_fails_with_path() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("missing"));
        let err = file.read(None).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some(file.path().as_path()));
        assert!(file.read(Some(3)).unwrap_err().is_io());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("nope/file"));
        assert!(file.write(b"x").unwrap_err().is_io());
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("bin"));
        file.write(&[0xff, 0xfe]).unwrap();
        let err = file.read_to_string().unwrap_err();
        assert_eq!(err.kind(), Some(io::ErrorKind::InvalidData));
    }

    #[test]
    fn truncate_empties_file() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("t"));
        file.write(b"abc").unwrap();
        file.truncate().unwrap();
        assert_eq!(file.size().unwrap(), 0);
    }

    #[test]
    fn exists_only_for_regular_files() {
        let dir = scratch();
        assert!(!LocalFile::new(dir.path()).exists());
        assert!(!LocalFile::new(dir.path().join("missing")).exists());
        let file = LocalFile::new(dir.path().join("f"));
        file.write(b"").unwrap();
        assert!(file.exists());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("f"));
        file.write(b"x").unwrap();
        file.delete().unwrap();
        assert!(!file.exists());
        file.delete().unwrap();
    }

    #[test]
    fn rename_returns_entity_at_new_path() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("old"));
        file.write(b"x").unwrap();
        let renamed = file.rename("new").unwrap();
        assert_eq!(renamed.basename(), "new");
        assert_eq!(renamed.path(), dir.path().join("new"));
        assert!(renamed.exists());
        assert!(!file.exists());

        let err = file.rename("new").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn rename_rejects_paths() {
        let file = LocalFile::new("/tmp/whatever");
        assert!(file.rename("a/b").unwrap_err().is_invalid_input());
        assert!(file.rename("..").unwrap_err().is_invalid_input());
    }

    #[test]
    fn move_and_copy_between_local_files() {
        let dir = scratch();
        let src = LocalFile::new(dir.path().join("src"));
        let copy = LocalFile::new(dir.path().join("copy"));
        let moved = LocalFile::new(dir.path().join("moved"));
        src.write(b"payload").unwrap();

        src.copy_to(&copy).unwrap();
        assert_eq!(copy.read(None).unwrap(), b"payload");

        src.move_to(&moved).unwrap();
        assert!(!src.exists());
        assert_eq!(moved.read(None).unwrap(), b"payload");
    }

    #[test]
    fn copy_from_local_replaces_content() {
        let dir = scratch();
        let src = LocalFile::new(dir.path().join("src"));
        let dst = LocalFile::new(dir.path().join("dst"));
        src.write(b"new").unwrap();
        dst.write(b"old content").unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst.read(None).unwrap(), b"new");
    }

    #[test]
    fn copy_onto_itself_is_refused_and_keeps_content() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("precious"));
        file.write(b"precious").unwrap();

        let err = file.copy_to(&LocalFile::new(file.path())).unwrap_err();
        assert_eq!(err.kind(), Some(io::ErrorKind::InvalidInput));
        let err = file.copy_from(&LocalFile::new(file.path())).unwrap_err();
        assert!(err.is_io());
        assert_eq!(file.read(None).unwrap(), b"precious");
    }

    #[cfg(unix)]
    #[test]
    fn copy_through_links_to_same_file_is_refused() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("precious"));
        file.write(b"precious").unwrap();
        let soft = dir.path().join("soft");
        let hard = dir.path().join("hard");
        std::os::unix::fs::symlink(file.path(), &soft).unwrap();
        fs::hard_link(file.path(), &hard).unwrap();

        assert!(file.copy_to(&LocalFile::new(&soft)).unwrap_err().is_io());
        assert!(LocalFile::new(&hard).copy_to(&file).unwrap_err().is_io());
        assert_eq!(file.read(None).unwrap(), b"precious");
    }

    #[test]
    fn hashes_match_known_digests() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("h"));
        file.write(b"test").unwrap();

        assert_eq!(
            file.md5(false).unwrap(),
            Digest::Hex("098f6bcd4621d373cade4e832627b4f6".into())
        );
        assert_eq!(
            file.sha1(false).unwrap(),
            Digest::Hex("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3".into())
        );
        assert_eq!(
            file.md5(true).unwrap().into_bytes(),
            hex::decode("098f6bcd4621d373cade4e832627b4f6").unwrap()
        );
        assert_eq!(file.sha1(true).unwrap().as_bytes().len(), 20);
    }

    #[test]
    fn hashing_missing_file_fails() {
        let file = LocalFile::new("/non-existing-directory/non-existing-file");
        assert!(file.md5(false).unwrap_err().is_io());
        assert!(file.sha1(true).unwrap_err().is_io());
    }

    #[test]
    fn touch_sets_both_times() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("touched"));
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        file.touch(Some(when), None).unwrap();
        assert!(file.exists());
        assert_eq!(file.modified_time().unwrap(), when);
        assert_eq!(file.accessed_time().unwrap(), when);

        let later = when + Duration::from_secs(60);
        file.touch(Some(when), Some(later)).unwrap();
        assert_eq!(file.modified_time().unwrap(), when);
        assert_eq!(file.accessed_time().unwrap(), later);
    }

    #[test]
    fn touch_defaults_to_now() {
        let dir = scratch();
        let file = LocalFile::new(dir.path().join("now"));
        let before = SystemTime::now() - Duration::from_secs(5);
        file.touch(None, None).unwrap();
        assert!(file.modified_time().unwrap() >= before);
    }

    #[cfg(unix)]
    #[test]
    fn real_path_resolves_symlinks() {
        let dir = scratch();
        let target = LocalFile::new(dir.path().join("target"));
        target.write(b"x").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(target.path(), &link).unwrap();

        let expected = fs::canonicalize(target.path()).unwrap();
        assert_eq!(LocalFile::new(&link).real_path().unwrap(), expected);
        assert!(LocalFile::new(dir.path().join("missing")).real_path().unwrap_err().is_io());
    }

    #[test]
    fn relative_path_against_local_directory() {
        let base = LocalDirectory::new("/home");
        assert_eq!(
            LocalFile::new("/home/test").relative_path(&base).unwrap(),
            PathBuf::from("test")
        );
        let err = LocalFile::new("/home/test")
            .relative_path(&LocalDirectory::new("/home2"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
