//! Directory-level error types.
//!
//! These errors are provider agnostic. Callers branch on [`ErrorKind`]
//! rather than on messages, so the context added while wrapping never
//! changes how an error is classified.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ports::IdentityProviderError;

/// Stable machine-readable classification of a [`DirectoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No record matches the requested key.
    NotFound,
    /// The identity provider failed for any other reason.
    Upstream,
}

/// Directory operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryOperation {
    /// Lookup by provider identifier.
    UserById,
    /// Listing of every user.
    ListUsers,
    /// Lookup by email address.
    UserByEmail,
}

impl fmt::Display for DirectoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserById => f.write_str("user by ID"),
            Self::ListUsers => f.write_str("list users"),
            Self::UserByEmail => f.write_str("user by email"),
        }
    }
}

/// Error returned by every directory operation.
///
/// # Examples
/// ```
/// use iam_directory::domain::{DirectoryError, DirectoryOperation, ErrorKind};
/// use iam_directory::domain::ports::IdentityProviderError;
///
/// let cause = IdentityProviderError::connection("connection refused");
/// let err = DirectoryError::upstream_failure(DirectoryOperation::ListUsers, cause.clone());
/// assert_eq!(err.kind(), ErrorKind::Upstream);
/// assert_eq!(err.upstream(), Some(&cause));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No record matches the requested key.
    #[error("{operation}: user not found")]
    NotFound {
        /// Operation that came up empty.
        operation: DirectoryOperation,
    },
    /// The identity provider failed; `source` is its error untouched.
    #[error("{operation}: {}{source}", stage_prefix(.stage))]
    Upstream {
        /// Operation during which the provider failed.
        operation: DirectoryOperation,
        /// Inner step that called the provider, when `operation` is composite.
        stage: Option<DirectoryOperation>,
        /// Provider error exactly as reported.
        #[source]
        source: IdentityProviderError,
    },
}

impl DirectoryError {
    /// Convenience constructor for [`DirectoryError::NotFound`].
    pub fn not_found(operation: DirectoryOperation) -> Self {
        Self::NotFound { operation }
    }

    /// Convenience constructor for [`DirectoryError::Upstream`].
    pub fn upstream_failure(operation: DirectoryOperation, source: IdentityProviderError) -> Self {
        Self::Upstream {
            operation,
            stage: None,
            source,
        }
    }

    /// Stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Upstream { .. } => ErrorKind::Upstream,
        }
    }

    /// Operation that failed.
    pub fn operation(&self) -> DirectoryOperation {
        match self {
            Self::NotFound { operation } | Self::Upstream { operation, .. } => *operation,
        }
    }

    /// Inner step that hit the provider, for upstream failures of composite
    /// operations such as [`DirectoryOperation::UserByEmail`].
    pub fn stage(&self) -> Option<DirectoryOperation> {
        match self {
            Self::Upstream { stage, .. } => *stage,
            Self::NotFound { .. } => None,
        }
    }

    /// True for [`ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The wrapped provider error, when the failure came from upstream.
    pub fn upstream(&self) -> Option<&IdentityProviderError> {
        match self {
            Self::Upstream { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }

    /// Attribute the failure to the enclosing `operation`, keeping kind and
    /// cause. An upstream failure records its previous operation as the stage.
    pub(crate) fn during(self, operation: DirectoryOperation) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound { operation },
            Self::Upstream {
                operation: inner,
                stage,
                source,
            } => Self::Upstream {
                operation,
                stage: stage.or(Some(inner)),
                source,
            },
        }
    }
}

fn stage_prefix(stage: &Option<DirectoryOperation>) -> String {
    stage.map(|stage| format!("{stage}: ")).unwrap_or_default()
}
