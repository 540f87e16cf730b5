//! Annotation extraction
//!
//! Pulls the `team` and `source-code` annotations out of a namespace
//! declaration. Two strategies exist:
//!
//! - [`StructuredExtractor`] parses the document as YAML (default).
//! - [`LineScanExtractor`] scans lines for `team:` / `source-code:` prefixes.
//!   It never fails, but it ignores nesting: any line starting with one of
//!   those prefixes matches, wherever it sits in the document.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{
    Annotations, NamespaceDeclaration, SOURCE_CODE_ANNOTATION, TEAM_ANNOTATION,
};

/// Errors that can occur when extracting annotations
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document is not well-formed
    #[error("{0}")]
    Malformed(#[from] serde_yaml::Error),
}

/// Reads ownership annotations from raw document bytes
pub trait AnnotationExtractor {
    /// Extract annotations; absent keys come back as empty strings
    fn extract(&self, raw: &[u8]) -> Result<Annotations, ExtractError>;
}

/// Which extractor to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// YAML parser
    #[default]
    Structured,
    /// Prefix line scan (legacy)
    LineScan,
}

impl ExtractorKind {
    /// The extractor implementing this strategy
    #[must_use]
    pub fn extractor(self) -> &'static dyn AnnotationExtractor {
        match self {
            Self::Structured => &StructuredExtractor,
            Self::LineScan => &LineScanExtractor,
        }
    }
}

impl std::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::LineScan => write!(f, "line-scan"),
        }
    }
}

impl std::str::FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" | "yaml" => Ok(Self::Structured),
            "line-scan" | "linescan" | "text" => Ok(Self::LineScan),
            _ => Err(format!("Invalid extractor: {s}. Use: structured, line-scan")),
        }
    }
}

/// YAML-backed extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredExtractor;

impl AnnotationExtractor for StructuredExtractor {
    fn extract(&self, raw: &[u8]) -> Result<Annotations, ExtractError> {
        let declaration: NamespaceDeclaration = serde_yaml::from_slice(raw)?;
        Ok(declaration.into_annotations())
    }
}

/// Line-scanning extractor
///
/// First matching line wins. Values are taken verbatim after the colon,
/// trimmed; quotes are not removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScanExtractor;

impl AnnotationExtractor for LineScanExtractor {
    fn extract(&self, raw: &[u8]) -> Result<Annotations, ExtractError> {
        let text = String::from_utf8_lossy(raw);
        let team_prefix = format!("{TEAM_ANNOTATION}:");
        let source_prefix = format!("{SOURCE_CODE_ANNOTATION}:");

        let mut annotations = Annotations::default();
        for line in text.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix(&team_prefix) {
                if annotations.team.is_empty() {
                    annotations.team = rest.trim().to_string();
                }
            } else if let Some(rest) = line.strip_prefix(&source_prefix) {
                if annotations.source_code.is_empty() {
                    annotations.source_code = rest.trim().to_string();
                }
            }
        }
        Ok(annotations)
    }
}
