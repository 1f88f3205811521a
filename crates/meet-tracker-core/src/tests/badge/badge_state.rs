use crate::{
    Badge, BadgeState, BadgeStyle, DEFAULT_ACTIVE_COLOR, DEFAULT_COMPLETED_COLOR, derive_badge,
    tests::{T0, at, started},
};

/// WHAT: In-progress meetings take priority over completed counts
/// WHY: The user must see that tracking is live
#[test]
fn given_active_and_completed_meetings_when_deriving_then_active_signal() {
    // Given: One in-progress and three completed meetings
    let mut meetings = vec![started("live", "Live", T0)];
    for id in ["a", "b", "c"] {
        meetings.push(started(id, id, T0).ended(at(60), 60));
    }

    // When: Deriving
    let state = BadgeState::from_meetings(&meetings);
    let badge = derive_badge(&meetings, &BadgeStyle::default());

    // Then: Active, never the completed count
    assert_eq!(state, BadgeState::Active { in_progress: 1 });
    assert_eq!(badge.text, "1");
    assert_eq!(badge.color.as_deref(), Some(DEFAULT_ACTIVE_COLOR));
}

/// WHAT: Completed meetings show their count
/// WHY: The badge doubles as a history counter
#[test]
fn given_only_completed_meetings_when_deriving_then_count_shown() {
    // Given: Two completed meetings
    let meetings = vec![
        started("a", "A", T0).ended(at(60), 60),
        started("b", "B", T0).ended(at(60), 60),
    ];

    // When: Deriving
    let badge = derive_badge(&meetings, &BadgeStyle::default());

    // Then: Count with completed color
    assert_eq!(badge.text, "2");
    assert_eq!(badge.color.as_deref(), Some(DEFAULT_COMPLETED_COLOR));
}

/// WHAT: An empty collection clears the badge
/// WHY: Nothing to report means no badge
#[test]
fn given_no_meetings_when_deriving_then_cleared() {
    let badge = derive_badge(&[], &BadgeStyle::default());

    assert_eq!(BadgeState::from_meetings(&[]), BadgeState::Cleared);
    assert_eq!(badge, Badge::cleared());
}

/// WHAT: A configured glyph replaces the active count
/// WHY: Some users prefer a fixed "recording" marker
#[test]
fn given_active_glyph_when_rendering_active_then_glyph_shown() {
    // Given: A style with a glyph and no colors
    let style = BadgeStyle {
        active_glyph: Some("\u{1F534}".to_string()),
        active_color: None,
        completed_color: None,
    };

    // When: Rendering two in-progress meetings
    let badge = Badge::render(BadgeState::Active { in_progress: 2 }, &style);

    // Then: Glyph, no color change
    assert_eq!(badge.text, "\u{1F534}");
    assert_eq!(badge.color, None);
}
