//! Test utilities for the directory crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

pub mod assertions {
    //! Assertions over directory results.

    use std::fmt::Debug;

    use crate::domain::{DirectoryError, ErrorKind};

    /// Outcome a test expects from a directory call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Expected<'a> {
        /// The call succeeds.
        Success,
        /// The call fails with this kind.
        Kind(ErrorKind),
        /// The call fails and the rendered error contains this text.
        MessageContains(&'a str),
    }

    /// Assert that `result` matches `expected`, labelling failures with `case`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iam_directory::domain::{DirectoryError, DirectoryOperation, ErrorKind};
    /// use iam_directory::test_support::assertions::{Expected, assert_directory_error};
    ///
    /// let result: Result<(), DirectoryError> =
    ///     Err(DirectoryError::not_found(DirectoryOperation::UserById));
    /// assert_directory_error(&result, Expected::Kind(ErrorKind::NotFound), "ghost");
    /// ```
    pub fn assert_directory_error<T: Debug>(
        result: &Result<T, DirectoryError>,
        expected: Expected<'_>,
        case: &str,
    ) {
        match (expected, result) {
            (Expected::Success, Ok(_)) => {}
            (Expected::Success, Err(err)) => panic!("{case}: expected success, got {err:?}"),
            (Expected::Kind(kind), Err(err)) => {
                assert_eq!(err.kind(), kind, "{case}: unexpected error kind ({err})");
            }
            (Expected::MessageContains(text), Err(err)) => {
                let rendered = err.to_string();
                assert!(
                    rendered.contains(text),
                    "{case}: expected error containing {text:?}, got {rendered:?}"
                );
            }
            (_, Ok(value)) => panic!("{case}: expected {expected:?}, got success: {value:?}"),
        }
    }
}

pub mod roster_files {
    //! Temporary roster files for loader tests.

    use std::io::{self, Write};

    use serde_json::json;
    use tempfile::NamedTempFile;

    use crate::domain::User;

    /// Write `users` into a fresh version 1 roster file.
    ///
    /// The file is removed when the returned handle drops.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iam_directory::domain::User;
    /// use iam_directory::outbound::roster::load_roster;
    /// use iam_directory::test_support::roster_files::write_roster;
    ///
    /// let file = write_roster(&[User::from_strings("A", "John Doe", "john@doe.com")])?;
    /// let roster = load_roster(file.path()).expect("roster loads");
    /// assert_eq!(roster.len(), 1);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_roster(users: &[User]) -> io::Result<NamedTempFile> {
        let document = json!({ "version": 1, "users": users });
        write_raw_roster(&document.to_string())
    }

    /// Write arbitrary text as a roster file, for malformed-input tests.
    pub fn write_raw_roster(contents: &str) -> io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("directory-roster-")
            .suffix(".json")
            .tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}
