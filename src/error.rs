//! Error types shared by every maintenance pass.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, LoreError>;

/// Fatal errors that stop a run.
///
/// Problems confined to a single file (unreadable, undecodable, failed write)
/// are not represented here; passes log and count them and keep walking.
#[derive(Debug, Error)]
pub enum LoreError {
    /// An I/O operation on a specific path failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The JSON report could not be rendered.
    #[error("failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line arguments were rejected.
    #[error("{0}")]
    Usage(String),
}

impl LoreError {
    /// Wraps an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_carries_path_and_cause() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoreError::io("docs/a.md", source);
        let text = err.to_string();
        assert!(text.contains("docs/a.md"));
        assert!(text.contains("denied"));
    }
}
