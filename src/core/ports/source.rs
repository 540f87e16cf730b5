//! Namespace source port
//!
//! Defines where changed namespace files come from: paths handed to the CLI
//! and read from the checkout, or the pull request's file list fetched
//! from the hosting API.

use thiserror::Error;

use super::ApiError;

/// Errors reading a single candidate file
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local file could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Remote file could not be fetched
    #[error("{0}")]
    Api(#[from] ApiError),
}

/// Provider of changed namespace files
#[cfg_attr(test, mockall::automock)]
pub trait NamespaceSource {
    /// Paths of the changed files, in input order
    fn changed_files(&self) -> Result<Vec<String>, ApiError>;

    /// Raw bytes of one changed file
    fn read(&self, path: &str) -> Result<Vec<u8>, SourceError>;
}
