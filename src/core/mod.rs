//! Core domain logic for nsguard
//!
//! This module contains the validation rules with no direct I/O.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Annotations, `TeamMembership`, `RepositoryRef`, Failure)
//! - `services/` - Validation pipeline and reporting
//! - `ports/` - Trait definitions for the hosting API and file sources

pub mod models;
pub mod ports;
pub mod services;
