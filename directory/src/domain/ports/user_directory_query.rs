//! Driving port for directory lookups.
//!
//! Inbound adapters (HTTP handlers, job runners, other services) depend on
//! this trait rather than on a concrete identity provider, so they can be
//! tested against a deterministic double.

use async_trait::async_trait;

use crate::domain::{DirectoryError, RequestContext, User};

/// Domain use-case port for resolving users.
#[async_trait]
pub trait UserDirectoryQuery: Send + Sync {
    /// Resolve a user by provider identifier.
    async fn user_by_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<User, DirectoryError>;

    /// Return every user, in provider order.
    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, DirectoryError>;

    /// Resolve the first user, in provider order, whose email equals `email`
    /// exactly.
    async fn user_by_email(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<User, DirectoryError>;
}
