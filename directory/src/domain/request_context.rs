//! Caller-supplied context threaded through every directory call.
//!
//! The directory never creates its own deadlines. Whatever cancellation the
//! caller wires into the token is what identity providers observe, and the
//! same context value is handed to the provider on every hop.

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use super::TraceId;

/// Cancellation and correlation state for one directory request.
///
/// # Examples
/// ```
/// use iam_directory::domain::RequestContext;
///
/// let ctx = RequestContext::new();
/// assert!(!ctx.is_cancelled());
/// ctx.cancellation_token().cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    trace_id: TraceId,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Fresh context with a generated trace id and an unlinked token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Context observing an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            trace_id: TraceId::generate(),
            cancellation,
        }
    }

    /// Replace the trace id, e.g. with one propagated from an inbound request.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = trace_id;
        self
    }

    /// Correlation identifier for logs.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// The caller's cancellation token.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// True once the caller has cancelled the request.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves when the caller cancels the request.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancellation.cancelled()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
