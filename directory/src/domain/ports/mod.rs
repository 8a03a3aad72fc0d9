//! Domain ports for the hexagonal boundary.
//!
//! - [`IdentityProvider`] is driven: adapters implement it to expose a user
//!   store.
//! - [`UserDirectoryQuery`] is driving: callers use it to resolve users.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod user_directory_query;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
pub use user_directory_query::UserDirectoryQuery;

#[cfg(test)]
mod tests;
