use crate::config::{default_active_color, default_completed_color};

use meet_tracker_core::BadgeStyle;
use serde::{Deserialize, Serialize};

/// Toolbar badge appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Fixed text for the active badge (e.g. a red dot). Unset shows the count.
    #[serde(default)]
    pub active_glyph: Option<String>,

    /// Background while a meeting is in progress. Empty leaves it unchanged.
    #[serde(default = "default_active_color")]
    pub active_color: String,

    /// Background for the completed count. Empty leaves it unchanged.
    #[serde(default = "default_completed_color")]
    pub completed_color: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            active_glyph: None,
            active_color: default_active_color(),
            completed_color: default_completed_color(),
        }
    }
}

impl BadgeConfig {
    /// The style handed to badge rendering.
    pub fn style(&self) -> BadgeStyle {
        BadgeStyle {
            active_glyph: self.active_glyph.clone().filter(|g| !g.is_empty()),
            active_color: non_empty(&self.active_color),
            completed_color: non_empty(&self.completed_color),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
