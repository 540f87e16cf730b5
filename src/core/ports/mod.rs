//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (the hosting API, the local checkout).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core validation logic depends only on these traits, never on concrete
//! implementations, so unit tests drive it with mock implementations.

mod hosting;
mod source;

#[cfg(test)]
pub use hosting::MockHostingApi;
pub use hosting::{ApiError, HostingApi};
#[cfg(test)]
pub use source::MockNamespaceSource;
pub use source::{NamespaceSource, SourceError};
