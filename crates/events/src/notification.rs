//! User-facing notifications rendered from avatar events.
//!
//! These are the short transient messages the studio shows after each
//! action ("Item Applied!", "Avatar Reset", ...). Rendering is pure; delivery
//! is up to the subscriber.

use serde::{Deserialize, Serialize};

use crate::bus::{AvatarEvent, ACTION_FAILED, AVATAR_RESET, ITEM_APPLIED, VARIANT_CHANGED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
}

impl Notification {
    /// Render the notification for an event, or `None` for event types that
    /// are not shown to the user.
    pub fn from_event(event: &AvatarEvent) -> Option<Self> {
        let text = |key: &str| event.payload.get(key).and_then(|v| v.as_str());

        let notification = match event.event_type.as_str() {
            ITEM_APPLIED => {
                let name = text("item_name")
                    .or(event.item_id.as_deref())
                    .unwrap_or("Item");
                Self {
                    title: "Item Applied!".to_string(),
                    description: format!("{name} has been added to your avatar"),
                    level: NotificationLevel::Success,
                }
            }
            AVATAR_RESET => Self {
                title: "Avatar Reset".to_string(),
                description: "All items have been removed".to_string(),
                level: NotificationLevel::Info,
            },
            VARIANT_CHANGED => {
                let variant = text("display_name").unwrap_or("another avatar");
                Self {
                    title: "Avatar Changed".to_string(),
                    description: format!("Now styling {variant}"),
                    level: NotificationLevel::Info,
                }
            }
            ACTION_FAILED => Self {
                title: "Couldn't apply that".to_string(),
                description: text("message")
                    .unwrap_or("The item could not be applied")
                    .to_string(),
                level: NotificationLevel::Error,
            },
            _ => return None,
        };

        Some(notification)
    }
}
