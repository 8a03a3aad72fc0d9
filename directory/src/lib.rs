//! User directory facade over pluggable identity providers.
//!
//! [`domain::DirectoryService`] answers lookups by identifier, by email, and
//! list-all on top of any [`domain::ports::IdentityProvider`]. Provider
//! "not found" signals are normalised into [`domain::ErrorKind::NotFound`];
//! every other provider failure is wrapped with the failing operation and
//! propagated untouched.

pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::{DirectoryError, DirectoryService, ErrorKind, RequestContext, User};
