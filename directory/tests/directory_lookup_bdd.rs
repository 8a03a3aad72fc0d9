//! Behaviour tests for directory lookups.
//!
//! These scenarios drive [`DirectoryService`] over a scripted identity
//! provider and check the normalised outcomes callers observe.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::executor::block_on;
use iam_directory::domain::ports::{IdentityProvider, IdentityProviderError, UserDirectoryQuery};
use iam_directory::domain::{DirectoryError, DirectoryService, ErrorKind, RequestContext, User};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Provider double serving a fixed listing or a fixed listing failure.
#[derive(Default)]
struct ScriptedProvider {
    users: Vec<User>,
    list_failure: Option<IdentityProviderError>,
    fetch_calls: AtomicUsize,
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn fetch_user(
        &self,
        _ctx: &RequestContext,
        user_id: &str,
    ) -> Result<User, IdentityProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .iter()
            .find(|user| user.id().as_ref() == user_id)
            .cloned()
            .ok_or_else(|| IdentityProviderError::user_not_found(user_id))
    }

    async fn list_users(&self, _ctx: &RequestContext) -> Result<Vec<User>, IdentityProviderError> {
        match &self.list_failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.users.clone()),
        }
    }
}

#[derive(Default)]
struct DirectoryWorld {
    provider: Arc<ScriptedProvider>,
    result: Option<Result<User, DirectoryError>>,
}

impl DirectoryWorld {
    fn service(&self) -> DirectoryService<ScriptedProvider> {
        DirectoryService::new(Arc::clone(&self.provider))
    }

    fn take_result(&mut self) -> Result<User, DirectoryError> {
        self.result
            .take()
            .expect("lookup result should be captured")
    }
}

#[fixture]
fn world() -> DirectoryWorld {
    DirectoryWorld::default()
}

#[given("a provider listing John with john@doe.com and Jane with jane@smith.com")]
fn a_provider_listing_john_and_jane(world: &mut DirectoryWorld) {
    world.provider = Arc::new(ScriptedProvider {
        users: vec![
            User::from_strings("A", "John Doe", "john@doe.com"),
            User::from_strings("B", "Jane Smith", "jane@smith.com"),
        ],
        ..ScriptedProvider::default()
    });
}

#[given("a provider whose listing fails with {message}")]
fn a_provider_whose_listing_fails_with(world: &mut DirectoryWorld, message: String) {
    world.provider = Arc::new(ScriptedProvider {
        list_failure: Some(IdentityProviderError::connection(message)),
        ..ScriptedProvider::default()
    });
}

#[when("the caller looks up email {email}")]
fn the_caller_looks_up_email(world: &mut DirectoryWorld, email: String) {
    let service = world.service();
    let ctx = RequestContext::new();
    world.result = Some(block_on(service.user_by_email(&ctx, &email)));
}

#[when("the caller looks up id {user_id}")]
fn the_caller_looks_up_id(world: &mut DirectoryWorld, user_id: String) {
    let service = world.service();
    let ctx = RequestContext::new();
    world.result = Some(block_on(service.user_by_id(&ctx, &user_id)));
}

#[then("the lookup returns the user with id {user_id}")]
fn the_lookup_returns_the_user_with_id(world: &mut DirectoryWorld, user_id: String) {
    let user = world.take_result().expect("lookup should succeed");
    assert_eq!(user.id().as_ref(), user_id);
}

#[then("the lookup fails with not found")]
fn the_lookup_fails_with_not_found(world: &mut DirectoryWorld) {
    let err = world.take_result().expect_err("lookup should fail");
    assert_eq!(err.kind(), ErrorKind::NotFound, "unexpected error: {err}");
}

#[then("the lookup fails upstream with {message}")]
fn the_lookup_fails_upstream_with(world: &mut DirectoryWorld, message: String) {
    let err = world.take_result().expect_err("lookup should fail");
    assert_eq!(err.kind(), ErrorKind::Upstream, "unexpected error: {err}");
    assert_eq!(
        err.upstream(),
        Some(&IdentityProviderError::connection(message))
    );
}

#[then("the provider was never asked for a single user")]
fn the_provider_was_never_asked_for_a_single_user(world: &mut DirectoryWorld) {
    assert_eq!(world.provider.fetch_calls.load(Ordering::SeqCst), 0);
}

#[scenario(
    path = "tests/features/directory_lookup.feature",
    name = "Email lookup returns the matching user"
)]
fn email_lookup_returns_the_matching_user(world: DirectoryWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/directory_lookup.feature",
    name = "Email lookup without a match is not found"
)]
fn email_lookup_without_a_match_is_not_found(world: DirectoryWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/directory_lookup.feature",
    name = "Identifier lookup returns the provider record"
)]
fn identifier_lookup_returns_the_provider_record(world: DirectoryWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/directory_lookup.feature",
    name = "Unknown identifiers are reported as not found"
)]
fn unknown_identifiers_are_reported_as_not_found(world: DirectoryWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/directory_lookup.feature",
    name = "Listing failures surface as upstream errors"
)]
fn listing_failures_surface_as_upstream_errors(world: DirectoryWorld) {
    let _ = world;
}
