//! Dress-up event bus and notification rendering.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`AvatarEvent`]: the event envelope for one styling session.
//! - [`Notification`]: the transient user-facing message for an event.

pub mod bus;
pub mod notification;

pub use bus::{AvatarEvent, EventBus};
pub use notification::{Notification, NotificationLevel};
