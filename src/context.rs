//! Cooperative cancellation and deadlines for API calls.
//!
//! Every network operation takes a [`Context`]. The client races the
//! in-flight HTTP call against the context's cancellation token and
//! deadline; whichever fires first wins and the HTTP future is dropped,
//! which aborts the underlying connection.
//!
//! ```ignore
//! use std::time::Duration;
//! use zentral_client::context::Context;
//!
//! let ctx = Context::background().with_timeout(Duration::from_secs(5));
//! let (tags, _resp) = client.tags().list(&ctx, None).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Cancellation handle and optional deadline for one or more API calls.
///
/// Clones share the same cancellation token: cancelling any clone cancels
/// them all. Use [`Context::child`] for a context that can be cancelled
/// independently of its parent.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Context::default()
    }

    /// A context driven by an existing cancellation token.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Context {
            token,
            deadline: None,
        }
    }

    /// Returns a copy of this context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an [`Instant`] leaves the
    /// deadline unchanged.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Returns a copy of this context that expires at `deadline`.
    ///
    /// If the context already has an earlier deadline, that one is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// A context whose token is a child of this one. Cancelling the parent
    /// cancels the child; cancelling the child leaves the parent alone.
    pub fn child(&self) -> Self {
        Context {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels this context and every clone and child of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once [`Context::cancel`] has been called on this context or a
    /// parent.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drives `fut` to completion unless the context is cancelled or its
    /// deadline elapses first. In that case `fut` is dropped.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Error::Cancelled),
            _ = deadline => Err(Error::DeadlineExceeded),
            out = fut => out,
        }
    }
}
