//! Source-code repository references
//!
//! A `source-code` annotation names a repository either as a bare
//! `owner/repo` pair or as a URL such as `https://github.com/owner/repo`.
//!
//! # Examples
//!
//! ```
//! use nsguard::core::models::RepositoryRef;
//!
//! let r = RepositoryRef::parse("https://github.com/acme/widgets").unwrap();
//! assert_eq!(r.owner(), "acme");
//! assert_eq!(r.name(), "widgets");
//!
//! assert!(RepositoryRef::parse("widgets").is_err());
//! ```

use thiserror::Error;

/// Errors that can occur when parsing a repository reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Reference was empty
    #[error("empty repository reference")]
    Empty,

    /// Fewer than two path segments after removing the host
    #[error("'{0}' does not name an owner and a repository")]
    TooFewSegments(String),
}

/// A repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Create a reference from its parts
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `owner/repo` pair or a repository URL
    ///
    /// The owner and name are the last two path segments once any
    /// `scheme://host` prefix is removed. A trailing `/` or `.git` is ignored.
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Empty);
        }

        // `scheme://host/path` keeps only the path
        let path = match trimmed.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
            None => trimmed,
        };
        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [.., owner, name] => Ok(Self::new(*owner, *name)),
            _ => Err(ReferenceError::TooFewSegments(trimmed.to_string())),
        }
    }

    /// Repository owner (user or organization)
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository metadata returned by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// `owner/name` as reported by the API
    pub full_name: String,
    /// Whether the repository is private
    pub private: bool,
}

/// Existence and visibility of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryStatus {
    /// Lookup returned 404
    NotFound,
    /// Exists but is private
    Private,
    /// Exists and is public - the only passing state
    Public,
}

impl RepositoryStatus {
    /// Derive the status from an optional lookup result
    #[must_use]
    pub const fn from_lookup(info: Option<&RepositoryInfo>) -> Self {
        match info {
            None => Self::NotFound,
            Some(info) if info.private => Self::Private,
            Some(_) => Self::Public,
        }
    }
}
