//! Filesystem port for file I/O operations.

use std::io;
use std::path::{Path, PathBuf};

/// Outcome of walking a directory tree.
///
/// Entries that could not be visited do not abort the walk; they are
/// collected alongside the files that were found.
#[derive(Debug, Default)]
pub struct TreeListing {
    /// Regular files under the root, sorted by name at each level.
    pub files: Vec<PathBuf>,
    /// Entries that could not be visited, with the reason.
    pub unreadable: Vec<(PathBuf, io::Error)>,
}

/// Provides filesystem access for reading, writing and walking files.
///
/// Abstracting the filesystem lets every pass run against an in-memory tree
/// in tests without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the raw bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes the given contents to a file, replacing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Returns `true` if the path exists, as a file or a directory.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively lists regular files under `root` in a deterministic order.
    fn walk_files(&self, root: &Path) -> TreeListing;

    /// Reads a file and decodes it as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidData` error if the bytes are not valid UTF-8, or
    /// the underlying read error.
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
