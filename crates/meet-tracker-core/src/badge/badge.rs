use crate::{BadgeState, MeetingRecord};

use serde::{Deserialize, Serialize};

/// Badge background while a meeting is in progress.
pub const DEFAULT_ACTIVE_COLOR: &str = "#f14668";

/// Badge background for the completed-meeting count.
pub const DEFAULT_COMPLETED_COLOR: &str = "#48c78e";

/// Signal handed to the badge renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Badge text; empty clears the badge.
    pub text: String,
    /// Background color, when the renderer should change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// How each [`BadgeState`] is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    /// Fixed glyph for the active badge. `None` shows the in-progress count.
    pub active_glyph: Option<String>,
    /// Background while a meeting is in progress.
    pub active_color: Option<String>,
    /// Background for the completed count.
    pub completed_color: Option<String>,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            active_glyph: None,
            active_color: Some(DEFAULT_ACTIVE_COLOR.to_string()),
            completed_color: Some(DEFAULT_COMPLETED_COLOR.to_string()),
        }
    }
}

impl Badge {
    /// The empty badge.
    pub fn cleared() -> Self {
        Self {
            text: String::new(),
            color: None,
        }
    }

    /// Draw `state` with `style`.
    pub fn render(state: BadgeState, style: &BadgeStyle) -> Self {
        match state {
            BadgeState::Active { in_progress } => Self {
                text: style
                    .active_glyph
                    .clone()
                    .unwrap_or_else(|| in_progress.to_string()),
                color: style.active_color.clone(),
            },
            BadgeState::Completed { count } => Self {
                text: count.to_string(),
                color: style.completed_color.clone(),
            },
            BadgeState::Cleared => Self::cleared(),
        }
    }
}

/// Reduce a collection straight to the badge to draw.
pub fn derive_badge(meetings: &[MeetingRecord], style: &BadgeStyle) -> Badge {
    Badge::render(BadgeState::from_meetings(meetings), style)
}
