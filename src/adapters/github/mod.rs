//! GitHub implementation of the hosting API port
//!
//! - [`client`] - Blocking REST client implementing `HostingApi`
//! - `wire` - Response and request bodies

pub mod client;
mod wire;

pub use client::{DEFAULT_API_URL, GitHubClient, PAGE_SIZE};
