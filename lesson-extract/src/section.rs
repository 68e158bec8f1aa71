//! Section location within a lesson block.
//!
//! Lessons are subdivided by fixed header phrases. The locator returns raw
//! spans (markup intact) because the statement splitter inspects
//! source-specific separators that normalization would destroy.

/// Header phrases that delimit named subsections inside a lesson block.
pub const SECTION_HEADERS: [&str; 5] = [
    "Starter Questions:",
    "Key Points:",
    "Questions:",
    "More to Learn:",
    "Skill Check:",
];

/// Case-insensitive substring search. Markers are ASCII, so matching is done
/// bytewise; any hit is guaranteed to sit on a char boundary.
pub(crate) fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Find a named subsection inside `block`.
///
/// The span starts after the first case-insensitive match of `start_marker`
/// and ends at the nearest following match among `end_markers`, or at the end
/// of the block when no end marker follows. Returns `None` when the start
/// marker is absent.
pub fn locate<'a>(block: &'a str, start_marker: &str, end_markers: &[&str]) -> Option<&'a str> {
    let start = find_ci(block, start_marker)? + start_marker.len();
    let rest = &block[start..];
    let end = end_markers
        .iter()
        .filter_map(|marker| find_ci(rest, marker))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Offset of the earliest recognized section header in `text`, if any.
pub(crate) fn first_header_offset(text: &str) -> Option<usize> {
    SECTION_HEADERS
        .iter()
        .filter_map(|header| find_ci(text, header))
        .min()
}

/// Whether `text` contains any recognized section header phrase.
pub(crate) fn contains_header(text: &str) -> bool {
    first_header_offset(text).is_some()
}
