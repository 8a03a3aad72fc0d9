//! Roster document parsing.
//!
//! A roster is a versioned JSON document listing the users served by
//! [`RosterIdentityProvider`](super::RosterIdentityProvider):
//!
//! ```json
//! {
//!   "version": 1,
//!   "users": [
//!     { "id": "a", "displayName": "John Doe", "email": "john@doe.com" }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::UserDto;
use crate::domain::{User, UserValidationError};

/// Current supported roster version.
const SUPPORTED_VERSION: u32 = 1;

/// Errors raised while parsing a roster document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The roster JSON is malformed or missing required fields.
    #[error("invalid roster JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The roster version is not supported.
    #[error("unsupported roster version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the roster.
        actual: u32,
    },

    /// A user entry violates the record invariants.
    #[error("invalid user at index {index}: {source}")]
    InvalidUser {
        /// Index of the entry in the `users` array.
        index: usize,
        /// Validation failure.
        #[source]
        source: UserValidationError,
    },

    /// Two entries share an identifier.
    #[error("duplicate user id at index {index}: {id}")]
    DuplicateUserId {
        /// Index of the second occurrence.
        index: usize,
        /// The repeated identifier.
        id: String,
    },
}

/// Validated roster: users in document order with unique identifiers.
///
/// Emails may repeat; lookups by email resolve to the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    /// Parse and validate a roster from JSON.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let raw: RawRoster = serde_json::from_str(json).map_err(|e| RosterError::Parse {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    /// Build a roster from already validated users.
    pub fn from_users(users: Vec<User>) -> Result<Self, RosterError> {
        ensure_unique_ids(users.iter().map(|user| user.id().as_ref()))?;
        Ok(Self { users })
    }

    fn from_raw(raw: RawRoster) -> Result<Self, RosterError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RosterError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let users = raw
            .users
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                User::try_from(entry).map_err(|source| RosterError::InvalidUser { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_users(users)
    }

    /// Users in document order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users in the roster.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when the roster lists nobody.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn ensure_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), RosterError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(RosterError::DuplicateUserId {
                index,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawRoster {
    version: u32,
    // Entries stay unvalidated here so failures can report their index.
    users: Vec<UserDto>,
}
