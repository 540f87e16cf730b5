//! Namespace declaration documents
//!
//! A namespace declaration carries its ownership metadata as annotations:
//!
//! ```yaml
//! metadata:
//!   name: billing
//!   annotations:
//!     team: platform
//!     source-code: https://github.com/acme/billing
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

/// Annotation key naming the owning team
pub const TEAM_ANNOTATION: &str = "team";

/// Annotation key naming the source-code repository
pub const SOURCE_CODE_ANNOTATION: &str = "source-code";

/// The parts of a namespace document this tool reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamespaceDeclaration {
    /// Document metadata (absent or null is treated as empty)
    #[serde(default)]
    pub metadata: Option<NamespaceMetadata>,
}

/// The `metadata` block of a namespace declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamespaceMetadata {
    /// Optional namespace name
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form annotations; unrelated keys are ignored
    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl NamespaceDeclaration {
    /// Collapse the document into the annotations this tool consumes
    #[must_use]
    pub fn into_annotations(self) -> Annotations {
        let metadata = self.metadata.unwrap_or_default();
        let mut annotations = metadata.annotations.unwrap_or_default();

        Annotations {
            name: metadata.name,
            team: annotations.remove(TEAM_ANNOTATION).unwrap_or_default(),
            source_code: annotations.remove(SOURCE_CODE_ANNOTATION).unwrap_or_default(),
        }
    }
}

/// Ownership annotations extracted from a namespace declaration
///
/// Missing keys are represented as empty strings; use [`Annotations::team`]
/// and [`Annotations::source_code`] to get trimmed, non-empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// `metadata.name`, when the extractor could see it
    pub name: Option<String>,
    /// Raw `team` value
    pub team: String,
    /// Raw `source-code` value
    pub source_code: String,
}

impl Annotations {
    /// The team slug, if present and not blank
    #[must_use]
    pub fn team(&self) -> Option<&str> {
        non_blank(&self.team)
    }

    /// The repository reference, if present and not blank
    #[must_use]
    pub fn source_code(&self) -> Option<&str> {
        non_blank(&self.source_code)
    }
}

/// Whether `team` can be used as a team slug
///
/// Slugs are placed in API paths, so only letters, digits, `-`, `_` and `.`
/// are accepted, and a slug made only of dots is rejected.
#[must_use]
pub fn is_team_slug(team: &str) -> bool {
    !team.is_empty()
        && team
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !team.chars().all(|c| c == '.')
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
