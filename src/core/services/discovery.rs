//! Candidate file selection
//!
//! Only YAML documents are namespace declarations. When a namespace glob is
//! configured, candidates must also match it.

use glob::{MatchOptions, Pattern};

use crate::core::ports::{ApiError, NamespaceSource};

/// Recognized namespace document extensions
pub const YAML_EXTENSIONS: &[&str] = &[".yaml", ".yml"];

/// Decides which changed files are namespace declarations
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    pattern: Option<Pattern>,
}

impl FileFilter {
    /// Accept any YAML file
    #[must_use]
    pub const fn yaml_only() -> Self {
        Self { pattern: None }
    }

    /// Accept YAML files matching `pattern` (e.g. `namespaces/**/*.yaml`)
    pub fn with_glob(pattern: &str) -> Result<Self, glob::PatternError> {
        Ok(Self {
            pattern: Some(Pattern::new(pattern)?),
        })
    }

    /// Whether `path` is a candidate namespace file
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        let is_yaml = YAML_EXTENSIONS.iter().any(|ext| path.ends_with(ext));
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        is_yaml
            && self
                .pattern
                .as_ref()
                .is_none_or(|p| p.matches_with(path, options))
    }
}

/// Changed files from `source` that pass `filter`, in input order
pub fn discover(source: &dyn NamespaceSource, filter: &FileFilter) -> Result<Vec<String>, ApiError> {
    let files = source
        .changed_files()?
        .into_iter()
        .filter(|path| {
            let accepted = filter.accepts(path);
            if !accepted {
                log::info!("Skipping non-namespace file: {path}");
            }
            accepted
        })
        .collect();
    Ok(files)
}
