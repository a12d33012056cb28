//! Online meeting link extraction from event bodies.

use regex::Regex;
use std::sync::LazyLock;

/// Provider token that marks a Teams invitation.
const TEAMS_TOKEN: &str = "teams.microsoft.com";

/// Provider token that marks a Zoom invitation.
const ZOOM_TOKEN: &str = "zoom.us";

/// Teams join link.
static TEAMS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://teams\.microsoft\.com/l/meetup-join/[^\s<>"]+"#)
        .expect("Invalid Teams regex")
});

/// Zoom join link on any `*zoom.us` host.
static ZOOM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://[a-z0-9.-]+zoom\.us/[^\s<>"]+"#).expect("Invalid Zoom regex")
});

/// Find the first online meeting link in an event body.
///
/// The body is lower-cased before matching, so the returned link is
/// lower-case too. Only one provider is tried: Teams if its host appears
/// anywhere in the body, otherwise Zoom if its host appears.
pub fn extract_meeting_url(body: &str) -> Option<String> {
    let body = body.to_lowercase();

    let pattern = if body.contains(TEAMS_TOKEN) {
        &*TEAMS_REGEX
    } else if body.contains(ZOOM_TOKEN) {
        &*ZOOM_REGEX
    } else {
        return None;
    };

    pattern.find(&body).map(|m| m.as_str().to_string())
}
