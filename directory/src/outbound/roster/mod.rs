//! Roster-backed identity provider.
//!
//! Serves users from a [`Roster`] held in memory. The roster is loaded once,
//! typically from the file named by
//! [`DirectorySettings`](crate::config::DirectorySettings), and never
//! mutated afterwards.

mod document;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

pub use self::document::{Roster, RosterError};
use crate::config::DirectorySettings;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{RequestContext, User};

/// Errors returned while loading a roster from disk.
#[derive(Debug, Error)]
pub enum RosterLoadError {
    /// Roster file could not be read.
    #[error("failed to read roster at {path}: {source}")]
    Read {
        /// Path to the roster file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Roster content is invalid.
    #[error("invalid roster at {path}: {source}")]
    Parse {
        /// Path to the roster file.
        path: PathBuf,
        /// Parsing or validation failure.
        #[source]
        source: RosterError,
    },
}

/// In-memory identity provider over a validated roster.
///
/// # Examples
/// ```
/// use iam_directory::domain::{RequestContext, User};
/// use iam_directory::domain::ports::IdentityProvider;
/// use iam_directory::outbound::roster::{Roster, RosterIdentityProvider};
///
/// # futures::executor::block_on(async {
/// let roster = Roster::from_users(vec![User::from_strings("A", "John Doe", "john@doe.com")])
///     .expect("valid roster");
/// let provider = RosterIdentityProvider::new(roster);
/// let user = provider
///     .fetch_user(&RequestContext::new(), "A")
///     .await
///     .expect("known user");
/// assert_eq!(user.email().as_ref(), "john@doe.com");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct RosterIdentityProvider {
    roster: Arc<Roster>,
}

impl RosterIdentityProvider {
    /// Serve users from `roster`.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Arc::new(roster),
        }
    }

    /// The roster being served.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[async_trait]
impl IdentityProvider for RosterIdentityProvider {
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

        self.roster
            .users()
            .iter()
            .find(|user| user.id().as_ref() == user_id)
            .cloned()
            .ok_or_else(|| IdentityProviderError::user_not_found(user_id))
    }

    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, IdentityProviderError> {
        if ctx.is_cancelled() {
            return Err(IdentityProviderError::cancelled());
        }
        Ok(self.roster.users().to_vec())
    }
}

/// Build a [`RosterIdentityProvider`] from the configured roster file.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use iam_directory::config::DirectorySettings;
/// use iam_directory::outbound::roster::load_roster_provider;
///
/// let settings = DirectorySettings {
///     roster_path: Some(PathBuf::from("fixtures/directory/roster.json")),
/// };
/// let provider = load_roster_provider(&settings)?;
/// assert!(!provider.roster().is_empty());
/// # Ok::<(), iam_directory::outbound::roster::RosterLoadError>(())
/// ```
pub fn load_roster_provider(
    settings: &DirectorySettings,
) -> Result<RosterIdentityProvider, RosterLoadError> {
    let path = settings.roster_path();
    let roster = load_roster(&path)?;
    info!(
        path = %path.display(),
        user_count = roster.len(),
        "directory roster loaded"
    );
    Ok(RosterIdentityProvider::new(roster))
}

/// Read and validate a roster file through `cap_std`.
pub fn load_roster(path: &Path) -> Result<Roster, RosterLoadError> {
    let read_error = |source| RosterLoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "roster path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;

    Roster::from_json(&contents).map_err(|source| RosterLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> RosterIdentityProvider {
        let roster = Roster::from_users(vec![
            User::from_strings("A", "John Doe", "john@doe.com"),
            User::from_strings("B", "Jane Smith", "jane@smith.com"),
        ])
        .expect("valid roster");
        RosterIdentityProvider::new(roster)
    }

    #[rstest]
    #[tokio::test]
    async fn fetches_by_exact_id(provider: RosterIdentityProvider) {
        let ctx = RequestContext::new();
        let user = provider.fetch_user(&ctx, "B").await.expect("known user");
        assert_eq!(user.display_name().as_ref(), "Jane Smith");

        let err = provider.fetch_user(&ctx, "b").await.expect_err("ids are exact");
        assert_eq!(err, IdentityProviderError::user_not_found("b"));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_empty_ids(provider: RosterIdentityProvider) {
        let err = provider
            .fetch_user(&RequestContext::new(), "")
            .await
            .expect_err("empty id");
        assert!(matches!(err, IdentityProviderError::InvalidRequest { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn lists_in_roster_order(provider: RosterIdentityProvider) {
        let users = provider
            .list_users(&RequestContext::new())
            .await
            .expect("list");
        assert_eq!(users, provider.roster().users());
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_context_short_circuits(provider: RosterIdentityProvider) {
        let ctx = RequestContext::new();
        ctx.cancellation_token().cancel();

        assert_eq!(
            provider.list_users(&ctx).await,
            Err(IdentityProviderError::Cancelled)
        );
        assert_eq!(
            provider.fetch_user(&ctx, "A").await,
            Err(IdentityProviderError::Cancelled)
        );
    }

    #[rstest]
    fn load_roster_reports_missing_file() {
        let path = std::env::temp_dir().join("iam-directory-missing-roster.json");
        let err = load_roster(&path).expect_err("missing file");
        assert!(matches!(err, RosterLoadError::Read { .. }));
        assert!(err.to_string().contains("iam-directory-missing-roster.json"));
    }

    #[rstest]
    fn bundled_roster_loads() {
        let settings = DirectorySettings { roster_path: None };
        let provider = load_roster_provider(&settings).expect("bundled roster");
        assert_eq!(provider.roster().len(), 2);
    }
}
