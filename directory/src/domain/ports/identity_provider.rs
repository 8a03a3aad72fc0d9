//! Driven port for the identity provider behind the directory.
//!
//! Adapters wrap whatever directory actually stores users (LDAP, SCIM, an
//! in-memory roster). The directory service only needs two capabilities:
//! fetch one user by identifier and list every user.

use async_trait::async_trait;

use crate::domain::{RequestContext, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// No user carries the requested identifier.
        UserNotFound { user_id: String } => "user {user_id} is not found",
        /// The provider refused the request as malformed.
        InvalidRequest { message: String } =>
            "identity provider rejected request: {message}",
        /// The provider could not be reached.
        Connection { message: String } => "identity provider connection failed: {message}",
        /// The provider failed while answering.
        Query { message: String } => "identity provider query failed: {message}",
        /// The caller cancelled the request before the provider answered.
        Cancelled => "identity provider call cancelled",
    }
}

/// Capability the directory needs from an identity provider.
///
/// Implementations receive the caller's [`RequestContext`] unchanged and
/// should honour its cancellation token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch a user by identifier.
    ///
    /// Returns [`IdentityProviderError::UserNotFound`] when no user carries
    /// `user_id`.
    async fn fetch_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<User, IdentityProviderError>;

    /// List every user, in provider-defined order.
    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, IdentityProviderError>;
}

const FIXTURE_USERS: [(&str, &str, &str); 2] = [
    (
        "2ef33f49-4832-4866-a754-2602c0e67417",
        "John Doe",
        "john@doe.com",
    ),
    (
        "e2091e80-6e31-4824-b5bc-301ec166b357",
        "Jane Smith",
        "jane@smith.com",
    ),
];

/// Deterministic in-memory provider with two well-known users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    fn users() -> Result<Vec<User>, IdentityProviderError> {
        // Constants; surface invalid data as a query failure so tests catch
        // accidental regressions.
        FIXTURE_USERS
            .iter()
            .map(|(id, display_name, email)| {
                User::try_from_strings(*id, *display_name, *email).map_err(|err| {
                    IdentityProviderError::query(format!("invalid fixture user: {err}"))
                })
            })
            .collect()
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn fetch_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<User, IdentityProviderError> {
        if ctx.is_cancelled() {
            return Err(IdentityProviderError::cancelled());
        }
        if user_id.is_empty() {
            return Err(IdentityProviderError::invalid_request(
                "user id must not be empty",
            ));
        }

        Self::users()?
            .into_iter()
            .find(|user| user.id().as_ref() == user_id)
            .ok_or_else(|| IdentityProviderError::user_not_found(user_id))
    }

    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, IdentityProviderError> {
        if ctx.is_cancelled() {
            return Err(IdentityProviderError::cancelled());
        }
        Self::users()
    }
}
