//! Directory facade over an injected identity provider.
//!
//! The service forwards every call to the provider with the caller's context
//! untouched. Its own logic is limited to normalising the provider's
//! "user not found" signal and resolving emails by scanning the full listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{IdentityProvider, IdentityProviderError, UserDirectoryQuery};
use crate::domain::{DirectoryError, DirectoryOperation, RequestContext, User};

/// Directory service implementing [`UserDirectoryQuery`].
///
/// Holds no state besides the provider handle, so clones are cheap and one
/// instance can serve concurrent callers. `P` may be `dyn IdentityProvider`
/// when the backing provider is chosen at runtime.
#[derive(Debug)]
pub struct DirectoryService<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> Clone for DirectoryService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: ?Sized> DirectoryService<P> {
    /// Create a new service backed by `provider`.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P> DirectoryService<P>
where
    P: IdentityProvider + ?Sized,
{
    fn map_fetch_error(ctx: &RequestContext, error: IdentityProviderError) -> DirectoryError {
        match error {
            IdentityProviderError::UserNotFound { user_id } => {
                debug!(
                    trace_id = %ctx.trace_id(),
                    user_id = %user_id,
                    "identity provider reported unknown user"
                );
                DirectoryError::not_found(DirectoryOperation::UserById)
            }
            other => Self::upstream(ctx, DirectoryOperation::UserById, other),
        }
    }

    fn upstream(
        ctx: &RequestContext,
        operation: DirectoryOperation,
        error: IdentityProviderError,
    ) -> DirectoryError {
        warn!(
            trace_id = %ctx.trace_id(),
            operation = %operation,
            error = %error,
            "identity provider call failed"
        );
        DirectoryError::upstream_failure(operation, error)
    }
}

#[async_trait]
impl<P> UserDirectoryQuery for DirectoryService<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn user_by_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<User, DirectoryError> {
        self.provider
            .fetch_user(ctx, user_id)
            .await
            .map_err(|err| Self::map_fetch_error(ctx, err))
    }

    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, DirectoryError> {
        let users = self
            .provider
            .list_users(ctx)
            .await
            .map_err(|err| Self::upstream(ctx, DirectoryOperation::ListUsers, err))?;
        debug!(
            trace_id = %ctx.trace_id(),
            user_count = users.len(),
            "listed directory users"
        );
        Ok(users)
    }

    async fn user_by_email(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<User, DirectoryError> {
        let users = self
            .list_users(ctx)
            .await
            .map_err(|err| err.during(DirectoryOperation::UserByEmail))?;

        users
            .into_iter()
            .find(|user| user.email().matches(email))
            .ok_or_else(|| {
                debug!(
                    trace_id = %ctx.trace_id(),
                    "no directory user matches email"
                );
                DirectoryError::not_found(DirectoryOperation::UserByEmail)
            })
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
