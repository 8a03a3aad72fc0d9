//! Port-level checks that do not depend on a particular adapter.

use std::sync::{Arc, Mutex};

use super::*;
use crate::domain::{RequestContext, TraceId, User};
use async_trait::async_trait;
use futures::executor::block_on;
use rstest::{fixture, rstest};

/// Provider double that records the trace id of every call it receives.
#[derive(Default)]
struct RecordingProvider {
    seen: Mutex<Vec<TraceId>>,
}

impl RecordingProvider {
    fn record(&self, ctx: &RequestContext) {
        self.seen.lock().expect("recording lock").push(ctx.trace_id());
    }

    fn seen(&self) -> Vec<TraceId> {
        self.seen.lock().expect("recording lock").clone()
    }
}

#[async_trait]
impl IdentityProvider for RecordingProvider {
    async fn fetch_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<User, IdentityProviderError> {
        self.record(ctx);
        Err(IdentityProviderError::user_not_found(user_id))
    }

    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, IdentityProviderError> {
        self.record(ctx);
        Ok(Vec::new())
    }
}

#[fixture]
fn provider() -> Arc<RecordingProvider> {
    Arc::new(RecordingProvider::default())
}

#[rstest]
fn providers_are_usable_as_trait_objects(provider: Arc<RecordingProvider>) {
    let erased: Arc<dyn IdentityProvider> = provider.clone();
    let ctx = RequestContext::new();

    block_on(async {
        let users = erased.list_users(&ctx).await.expect("list succeeds");
        assert!(users.is_empty());
        let err = erased.fetch_user(&ctx, "ghost").await.expect_err("missing");
        assert_eq!(err, IdentityProviderError::user_not_found("ghost"));
    });

    assert_eq!(provider.seen(), vec![ctx.trace_id(), ctx.trace_id()]);
}

#[rstest]
#[case(IdentityProviderError::user_not_found("ghost"), "user ghost is not found")]
#[case(
    IdentityProviderError::invalid_request("user id must not be empty"),
    "identity provider rejected request: user id must not be empty"
)]
#[case(
    IdentityProviderError::connection("connection refused"),
    "identity provider connection failed: connection refused"
)]
#[case(
    IdentityProviderError::query("timeout"),
    "identity provider query failed: timeout"
)]
#[case(IdentityProviderError::cancelled(), "identity provider call cancelled")]
fn provider_errors_render_stable_messages(
    #[case] err: IdentityProviderError,
    #[case] expected: &str,
) {
    assert_eq!(err.to_string(), expected);
}
