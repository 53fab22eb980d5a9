//! Port traits defining external boundaries.
//!
//! The only boundary the maintenance passes cross is the filesystem.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{FileSystem, TreeListing};
