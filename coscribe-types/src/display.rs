//! Presentation helpers shared by the document list and editor header.

use chrono::{DateTime, Utc};

/// Fixed palette for collaborator cursors and avatar rings.
pub const COLLABORATOR_PALETTE: [&str; 8] = [
    "#FF6B6B", "#FFB347", "#FFD93D", "#6BCB77", "#4D96FF", "#9B5DE5", "#F15BB5", "#00BBF9",
];

/// Relative age of `timestamp` against the current instant.
pub fn relative_time(timestamp: DateTime<Utc>) -> String {
    relative_time_at(timestamp, Utc::now())
}

/// Relative age of `timestamp` as seen from `now`.
///
/// The timestamp is rounded to the nearest whole second before
/// bucketing, so sub-second jitter between storage and render never
/// flips a bucket. Bucket boundaries truncate: 6.9 days is "6 days
/// ago". Timestamps at or after `now` render as "just now".
pub fn relative_time_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let rounded_secs = (timestamp.timestamp_millis() as f64 / 1000.0).round();
    let elapsed_secs = now.timestamp_millis() as f64 / 1000.0 - rounded_secs;
    let minutes = elapsed_secs / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if days > 7.0 {
        format!("{} weeks ago", (days / 7.0).floor() as i64)
    } else if days >= 1.0 {
        format!("{} days ago", days.floor() as i64)
    } else if hours >= 1.0 {
        format!("{} hours ago", hours.floor() as i64)
    } else if minutes >= 1.0 {
        format!("{} minutes ago", minutes.floor() as i64)
    } else {
        "just now".to_string()
    }
}

/// Deterministic palette color for an identifier.
///
/// Index is the sum of the identifier's character codes modulo the
/// palette size, so a user keeps the same color across sessions and
/// rooms. The empty string lands on the first entry.
pub fn color_for(identifier: &str) -> &'static str {
    let sum: u64 = identifier.chars().map(|c| c as u64).sum();
    COLLABORATOR_PALETTE[(sum % COLLABORATOR_PALETTE.len() as u64) as usize]
}
