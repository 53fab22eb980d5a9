//! In-memory filesystem adapter.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::paths::normalize;
use crate::ports::filesystem::{FileSystem, TreeListing};

/// Filesystem held entirely in memory.
///
/// Paths are normalized on the way in, so `docs/./a.md` and `docs/a.md` name
/// the same file. Directories exist implicitly whenever a file lives under
/// them. Individual paths can be marked read-only to exercise write failures.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    read_only: Mutex<BTreeSet<PathBuf>>,
    writes: Mutex<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given contents, replacing any previous one.
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        lock(&self.files).insert(normalize(path.as_ref()), contents.into());
    }

    /// Makes every subsequent write to `path` fail with `PermissionDenied`.
    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        lock(&self.read_only).insert(normalize(path.as_ref()));
    }

    /// Returns the stored contents of `path` as text, if present.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files)
            .get(&normalize(path.as_ref()))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Returns every path written so far, in write order.
    #[must_use]
    pub fn writes(&self) -> Vec<PathBuf> {
        lock(&self.writes).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn is_under(path: &Path, root: &Path) -> bool {
    (root == Path::new(".") && path.is_relative()) || path.starts_with(root)
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        lock(&self.files).get(&normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("file not found: {}", path.display()))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let path = normalize(path);
        if lock(&self.read_only).contains(&path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path.display()),
            ));
        }
        lock(&self.writes).push(path.clone());
        lock(&self.files).insert(path, contents.as_bytes().to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        lock(&self.files).keys().any(|k| is_under(k, &path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = normalize(path);
        lock(&self.files).keys().any(|k| *k != path && is_under(k, &path))
    }

    fn walk_files(&self, root: &Path) -> TreeListing {
        let root = normalize(root);
        let files = lock(&self.files).keys().filter(|k| is_under(k, &root)).cloned().collect();
        TreeListing { files, unreadable: Vec::new() }
    }
}
