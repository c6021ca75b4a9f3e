use std::path::PathBuf;

use thiserror::Error;

/// Errors from document preprocessing
///
/// A missing file is distinguished from a file that exists but cannot be
/// read or decoded; callers skip the downstream gateway call either way.
#[derive(Debug, Error)]
pub enum DocError {
    /// File does not exist
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path
        path: PathBuf,
    },

    /// Source exists but could not be read or decoded
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
}
