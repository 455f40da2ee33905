//! Target-path projections
//!
//! Alarm sources are identified by a slash-delimited hierarchical target
//! path such as `SYSTEM/DEVICE/POINT/Alarm`. These helpers project the
//! segments a normalized event needs. They are pure string operations;
//! backslash separators are tolerated everywhere via [`normalize_path`].
//!
//! Blank segments count as absent: a projection that lands on an empty or
//! whitespace-only segment returns `None` so callers can fall through to
//! the next derivation source.

/// Normalize path separators (backslashes become slashes)
///
/// Case is preserved; suffix comparisons are done case-insensitively by the
/// classifier, not here.
pub fn normalize_path(s: &str) -> String {
    s.replace('\\', "/")
}

fn segments(target: &str) -> Vec<&str> {
    target.split('/').collect()
}

fn non_blank(segment: &str) -> Option<&str> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// Second-to-last segment, or the last if the path has fewer than two
///
/// For `A/B/C/Alarm` this is `C` - the alarm point, used as the event kind.
pub fn kind_from_path(target: &str) -> Option<&str> {
    let parts = segments(target);
    match parts.len() {
        0 => None,
        1 => non_blank(parts[0]),
        n => non_blank(parts[n - 2]),
    }
}

/// Third-to-last segment, falling back to second-to-last, then last
///
/// For `A/B/C/Alarm` this is `B` - the device, used as the event location
/// when the payload carries none.
pub fn device_from_path(target: &str) -> Option<&str> {
    let parts = segments(target);
    match parts.len() {
        0 => None,
        1 => non_blank(parts[0]),
        2 => non_blank(parts[0]),
        n => non_blank(parts[n - 3]),
    }
}

/// The last up-to-3 segments joined by `/`
///
/// For `A/B/C/Alarm` this is `B/C/Alarm` - a display-friendly short form
/// used as the message when the payload carries none.
pub fn short_from_path(target: &str) -> String {
    let parts = segments(target);
    let n = parts.len();
    if n >= 3 {
        parts[n - 3..].join("/")
    } else {
        target.to_string()
    }
}
