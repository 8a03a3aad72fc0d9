//! Domain primitives, ports and the directory service.
//!
//! Purpose: Define the user record handed out by identity providers, the
//! ports that decouple the directory from any concrete provider, and the
//! service that answers lookups over those ports.
//!
//! Public surface:
//! - User (alias to `user::User`): provider-issued identity record.
//! - DirectoryService: facade implementing `ports::UserDirectoryQuery`.
//! - DirectoryError / ErrorKind: provider-agnostic lookup failures.
//! - RequestContext / TraceId: per-request cancellation and correlation.

pub mod directory_service;
pub mod error;
pub mod ports;
pub mod request_context;
pub mod trace_id;
pub mod user;

pub use self::directory_service::DirectoryService;
pub use self::error::{DirectoryError, DirectoryOperation, ErrorKind};
pub use self::request_context::RequestContext;
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserValidationError};

/// Convenient directory result alias.
///
/// # Examples
/// ```
/// use iam_directory::domain::{DirectoryError, DirectoryOperation, DirectoryResult, User};
///
/// fn lookup() -> DirectoryResult<User> {
///     Err(DirectoryError::not_found(DirectoryOperation::UserById))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DirectoryResult<T> = Result<T, DirectoryError>;
