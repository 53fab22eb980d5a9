//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ports::filesystem::{FileSystem, TreeListing};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk_files(&self, root: &Path) -> TreeListing {
        let mut listing = TreeListing::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                // Symlinked files are listed; symlinked directories are not descended.
                Ok(entry)
                    if entry.file_type().is_file()
                        || (entry.path_is_symlink() && entry.path().is_file()) =>
                {
                    listing.files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => {
                    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    listing.unreadable.push((path, io::Error::from(err)));
                }
            }
        }
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_files_is_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("b")).unwrap();
        std::fs::write(root.join("c.md"), "c").unwrap();
        std::fs::write(root.join("a.md"), "a").unwrap();
        std::fs::write(root.join("b/inner.md"), "inner").unwrap();

        let listing = LiveFileSystem.walk_files(root);
        let names: Vec<PathBuf> =
            listing.files.iter().map(|p| p.strip_prefix(root).unwrap().to_path_buf()).collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a.md"), PathBuf::from("b/inner.md"), PathBuf::from("c.md")]
        );
        assert!(listing.unreadable.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn walk_files_lists_symlinked_files_but_not_symlinked_dirs() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("real.md"), "[x](./gone.md)\n").unwrap();
        std::fs::write(root.join("sub/inner.md"), "inner").unwrap();
        symlink(root.join("real.md"), root.join("link.md")).unwrap();
        symlink(root.join("sub"), root.join("loop")).unwrap();

        let listing = LiveFileSystem.walk_files(root);
        let names: Vec<PathBuf> =
            listing.files.iter().map(|p| p.strip_prefix(root).unwrap().to_path_buf()).collect();
        assert_eq!(
            names,
            vec![PathBuf::from("link.md"), PathBuf::from("real.md"), PathBuf::from("sub/inner.md")]
        );
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.md");
        std::fs::write(&path, [0x66, 0xff, 0x6f]).unwrap();

        let err = LiveFileSystem.read_to_string(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(LiveFileSystem.read(&path).unwrap(), vec![0x66, 0xff, 0x6f]);
    }

    #[test]
    fn write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.md");
        LiveFileSystem.write(&path, "first\n").unwrap();
        LiveFileSystem.write(&path, "second\n").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "second\n");
        assert!(LiveFileSystem.exists(&path));
        assert!(LiveFileSystem.is_dir(dir.path()));
    }
}
