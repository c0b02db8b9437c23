//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`AvatarEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use dressup_core::types::SessionId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

/// An item was put on the avatar (click or drop).
pub const ITEM_APPLIED: &str = "avatar.item_applied";

/// Every slot was cleared.
pub const AVATAR_RESET: &str = "avatar.reset";

/// The body variant was switched.
pub const VARIANT_CHANGED: &str = "avatar.variant_changed";

/// An apply, drop, or variant intent was rejected.
pub const ACTION_FAILED: &str = "avatar.action_failed";

// ---------------------------------------------------------------------------
// AvatarEvent
// ---------------------------------------------------------------------------

/// Something that happened to one styling session.
///
/// Constructed via [`AvatarEvent::new`] and enriched with the builder
/// methods [`with_item`](AvatarEvent::with_item) and
/// [`with_payload`](AvatarEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarEvent {
    /// Dot-separated event name, e.g. `"avatar.item_applied"`.
    pub event_type: String,

    /// Session the event belongs to.
    pub session_id: SessionId,

    /// Catalog item involved, if any.
    pub item_id: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl AvatarEvent {
    /// Create a new event for a session with an empty payload.
    pub fn new(event_type: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            event_type: event_type.into(),
            session_id,
            item_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the catalog item involved.
    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`AvatarEvent`].
///
/// # Usage
///
/// ```rust
/// use dressup_events::bus::{AvatarEvent, EventBus, AVATAR_RESET};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AvatarEvent::new(AVATAR_RESET, uuid::Uuid::nil()));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AvatarEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Fire-and-forget: with no active subscribers the event is dropped.
    pub fn publish(&self, event: AvatarEvent) {
        tracing::trace!(event_type = %event.event_type, session_id = %event.session_id, "Publishing event");
        // SendError only means there are no receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<AvatarEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
