//! Notification delivery.
//!
//! The [`NotificationRouter`] subscribes to the event bus and pushes each
//! rendered notification to the WebSocket clients of the session it
//! belongs to.

pub mod router;

pub use router::NotificationRouter;
