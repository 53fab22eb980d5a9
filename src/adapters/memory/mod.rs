//! In-memory adapters for tests and dry experiments.

pub mod filesystem;

pub use filesystem::MemoryFileSystem;
