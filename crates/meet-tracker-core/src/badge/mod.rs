#[allow(clippy::module_inception)]
mod badge;
mod badge_state;

pub use {
    badge::{Badge, BadgeStyle, DEFAULT_ACTIVE_COLOR, DEFAULT_COMPLETED_COLOR, derive_badge},
    badge_state::BadgeState,
};
