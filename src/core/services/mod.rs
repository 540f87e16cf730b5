//! Business logic services
//!
//! Validation logic that operates on domain models and talks to the outside
//! world only through the port traits.
//!
//! - [`extractor`] - Read ownership annotations from a namespace document
//! - [`membership`] - Team membership lookups
//! - [`repository`] - Repository existence and visibility
//! - [`approval`] - LGTM fallback for non-members
//! - [`discovery`] - Select candidate namespace files
//! - [`validator`] - Per-file validation pipeline
//! - [`reporter`] - Pull request comments for a run

pub mod approval;
pub mod discovery;
pub mod extractor;
pub mod membership;
pub mod reporter;
pub mod repository;
pub mod validator;

pub use approval::find_approval;
pub use discovery::{FileFilter, discover};
pub use extractor::{
    AnnotationExtractor, ExtractError, ExtractorKind, LineScanExtractor, StructuredExtractor,
};
pub use membership::check_membership;
pub use reporter::{PublishSummary, Reporter, SUCCESS_COMMENT, comments_for, failure_comment};
pub use repository::{check_repository, parse_reference};
pub use validator::{DEFAULT_APPROVAL_TOKEN, Validator};
