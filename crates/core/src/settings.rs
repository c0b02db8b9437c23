//! Per-session dress-up preferences.

use serde::{Deserialize, Serialize};

/// Studio preferences for one styling session.
///
/// Only `enable_drag_drop` affects the engine: with it off, drop intents
/// are refused. The rest are stored for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DressUpSettings {
    pub enable_drag_drop: bool,
    pub enable_animations: bool,
    pub sound_effects: bool,
    pub background_music: bool,
}

impl Default for DressUpSettings {
    fn default() -> Self {
        Self {
            enable_drag_drop: true,
            enable_animations: true,
            sound_effects: false,
            background_music: false,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettings {
    pub enable_drag_drop: Option<bool>,
    pub enable_animations: Option<bool>,
    pub sound_effects: Option<bool>,
    pub background_music: Option<bool>,
}

impl DressUpSettings {
    pub fn merge(&mut self, update: &UpdateSettings) {
        if let Some(v) = update.enable_drag_drop {
            self.enable_drag_drop = v;
        }
        if let Some(v) = update.enable_animations {
            self.enable_animations = v;
        }
        if let Some(v) = update.sound_effects {
            self.sound_effects = v;
        }
        if let Some(v) = update.background_music {
            self.background_music = v;
        }
    }
}
