//! # Deferred Removal
//!
//! A removal that waits out a fixed window so the views can render the line
//! as "removing" before it disappears.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  remove_line_with_delay(index)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lines[index].is_removing = true, id captured ──► RemovalScheduled     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  spawned task: select! { sleep(delay), token.cancelled() }             │
//! │       │                                                                 │
//! │       ├── delay elapsed ───► remove line by id ──► Removed / LineGone  │
//! │       │                                                                 │
//! │       └── cancelled ───────► clear is_removing ──► Cancelled / LineGone│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The line is tracked by its `LineId`, so lines removed or added while the
//! timer runs cannot redirect the removal to a different line. Removing the
//! line by any other route cancels its token.

use storefront_core::{CartLine, LineId};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;

/// How a deferred removal ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The window elapsed and the line was removed.
    Removed(CartLine),
    /// The removal was cancelled; the line stays with `is_removing` cleared.
    Cancelled,
    /// The line had already left the cart by another route.
    LineGone,
}

/// Handle to a scheduled removal.
///
/// Dropping the handle does not cancel the removal.
#[derive(Debug)]
pub struct PendingRemoval {
    line_id: LineId,
    token: CancellationToken,
    handle: JoinHandle<RemovalOutcome>,
}

impl PendingRemoval {
    pub(crate) fn new(
        line_id: LineId,
        token: CancellationToken,
        handle: JoinHandle<RemovalOutcome>,
    ) -> Self {
        PendingRemoval {
            line_id,
            token,
            handle,
        }
    }

    /// The line this removal targets.
    pub fn line_id(&self) -> LineId {
        self.line_id
    }

    /// Aborts the removal if it has not fired yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the removal to fire or be cancelled.
    pub async fn completed(self) -> StoreResult<RemovalOutcome> {
        Ok(self.handle.await?)
    }
}

/// Bookkeeping for a live removal, kept in the store next to the cart.
#[derive(Debug, Clone)]
pub(crate) struct RemovalTicket {
    pub(crate) seq: u64,
    pub(crate) token: CancellationToken,
}
