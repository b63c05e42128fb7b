//! # Store Events
//!
//! Change notifications published after every successful mutation. Views
//! subscribe, and on any event re-read whatever derived queries they render.
//! Events say what changed; they are not a replacement for reading state.

use serde::{Deserialize, Serialize};
use storefront_core::LineId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The catalog reached `Ready`.
    CatalogLoaded { products: usize },

    /// The catalog reached `Failed`. Views show "unable to load products".
    CatalogFailed { message: String },

    LineAdded { id: LineId, name: String },

    /// A line's quantity changed in place.
    QuantityChanged { id: LineId, quantity: u32 },

    LineRemoved { id: LineId, name: String },

    /// A deferred removal started; the line now renders as pending.
    RemovalScheduled { id: LineId },

    /// A deferred removal was cancelled; the line renders normally again.
    RemovalCancelled { id: LineId },
}

impl StoreEvent {
    /// The cart line this event concerns, if any.
    pub fn line_id(&self) -> Option<LineId> {
        match self {
            StoreEvent::LineAdded { id, .. }
            | StoreEvent::QuantityChanged { id, .. }
            | StoreEvent::LineRemoved { id, .. }
            | StoreEvent::RemovalScheduled { id }
            | StoreEvent::RemovalCancelled { id } => Some(*id),
            StoreEvent::CatalogLoaded { .. } | StoreEvent::CatalogFailed { .. } => None,
        }
    }
}
