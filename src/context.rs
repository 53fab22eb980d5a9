//! Service context bundling the port trait objects.

use std::sync::Arc;

use crate::adapters::live::LiveFileSystem;
use crate::ports::filesystem::FileSystem;

/// Bundles the ports every pass runs against.
///
/// Constructors wire up different adapter implementations: the live disk for
/// the binary, an in-memory tree for tests.
#[derive(Clone)]
pub struct ServiceContext {
    /// Filesystem for reading, writing and walking the documentation tree.
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Arc::new(LiveFileSystem) }
    }

    /// Creates a context around an arbitrary filesystem adapter.
    #[must_use]
    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}
