//! Statement splitting for raw section spans.
//!
//! Source documents follow two different separator conventions depending on
//! their export vintage: newer exports break statements with terminal
//! punctuation followed by a backslash line continuation; older ones rely on
//! bullet glyphs in the rendered text. The splitter tries the conventions in
//! a fixed order and uses the first one that yields anything. Conventions are
//! never merged for one span, since mixing them double-counts content.

use crate::markup::{self, char_len, is_bullet_noise, normalize, strip_bullet_prefix};
use crate::section;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Controls how strictly section boundaries are honored while splitting.
///
/// The lenient mode reproduces the older single-convention pipeline: spans
/// are normalized up front, so only the bullet-glyph convention can apply and
/// the header overrun guard is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Raw spans, full convention cascade, header overrun guard.
    #[default]
    Strict,
    /// Normalize first; bullet-glyph extraction only.
    Lenient,
}

static PUNCT_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?!]\\").unwrap());
static LINE_CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\s*\n").unwrap());
static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2022}\u{25CF}]\s*([^\n\u{2022}\u{25CF}]+)").unwrap());

/// Split a raw section span into discrete statements.
///
/// Output is deduplicated, in source order, with every entry at least ten
/// normalized characters and free of section header phrases.
pub fn split(raw: &str, mode: BoundaryMode) -> Vec<String> {
    let statements = match mode {
        BoundaryMode::Strict => {
            // Guard against the locator having overrun into the next section.
            let span = match section::first_header_offset(raw) {
                Some(offset) => &raw[..offset],
                None => raw,
            };
            let mut found = punctuation_delimited(span);
            if found.is_empty() {
                found = continuation_delimited(span);
            }
            if found.is_empty() {
                found = bullet_items(&normalize(span));
            }
            found
        }
        BoundaryMode::Lenient => bullet_items(&normalize(raw)),
    };
    dedup_filter(statements)
}

/// Convention 1: `?`/`!` immediately followed by a line continuation marks a
/// statement boundary. Needs at least two boundaries to apply, otherwise the
/// span is assumed to follow a different convention.
fn punctuation_delimited(span: &str) -> Vec<String> {
    let marks: Vec<regex::Match> = PUNCT_BREAK.find_iter(span).collect();
    if marks.len() < 2 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut last = 0;
    for mark in &marks {
        let chunk = &span[last..mark.start()];
        let punct = &span[mark.start()..mark.start() + 1];
        let cleaned = normalize(&format!("{chunk}{punct}"));
        let cleaned = strip_bullet_prefix(&cleaned).to_string();
        if char_len(&cleaned) > 10 && !section::contains_header(&cleaned) {
            out.push(cleaned);
        }
        last = mark.end();
    }
    out
}

/// Convention 2: statements separated by bare line continuations, possibly
/// wrapped over several lines; a statement completes when a line ends in
/// terminal punctuation. A trailing partial accumulation is flushed under the
/// same length guard.
fn continuation_delimited(span: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for line in LINE_CONTINUATION.split(span) {
        let line = normalize(line);
        let line = strip_bullet_prefix(&line);
        if char_len(line) < 5 {
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
        if line.ends_with(['.', '?', '!']) {
            if char_len(&current) > 20 && !section::contains_header(&current) {
                out.push(current.clone());
            }
            current.clear();
        }
    }
    if char_len(&current) > 20 && !section::contains_header(&current) {
        out.push(current);
    }
    out
}

/// Convention 3 (fallback): every run of text following a bullet glyph, up to
/// the next glyph or line break. Operates on normalized text.
fn bullet_items(text: &str) -> Vec<String> {
    BULLET_ITEM
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|item| char_len(item) >= 5 && !section::contains_header(item))
        .collect()
}

/// Final pass: drop short or glyph-only entries and deduplicate by a
/// whitespace/bullet-insensitive key, keeping first-seen order.
fn dedup_filter(statements: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for statement in statements {
        let statement = statement.trim().to_string();
        if char_len(&statement) < 10 || is_bullet_noise(&statement) {
            continue;
        }
        let key = normalized_key(&statement);
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        out.push(statement);
    }
    out
}

fn normalized_key(statement: &str) -> String {
    let flattened: String = statement
        .chars()
        .map(|c| {
            if c.is_whitespace() || markup::BULLET_GLYPHS.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect();
    flattened.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_convention_splits_questions() {
        let raw = "What is the heart?\\Why do we breathe?\\";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(statements, vec!["What is the heart?", "Why do we breathe?"]);
    }

    #[test]
    fn single_boundary_is_not_enough_for_punctuation_convention() {
        // One `?\` boundary: falls through to the continuation convention,
        // which keeps the long statement and discards the short question.
        let raw = "What is the heart?\\\nKeep reading about the heart.\\\n";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(statements, vec!["Keep reading about the heart."]);
    }

    #[test]
    fn continuation_convention_accumulates_wrapped_lines() {
        let raw = "The heart pumps blood\\\nthrough the whole body.\\\nBlood carries oxygen to every cell.\\\n";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(
            statements,
            vec![
                "The heart pumps blood through the whole body.",
                "Blood carries oxygen to every cell.",
            ]
        );
    }

    #[test]
    fn continuation_convention_flushes_trailing_partial() {
        let raw = "This statement never quite ends but is long\\\n";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(
            statements,
            vec!["This statement never quite ends but is long"]
        );
    }

    #[test]
    fn bullet_convention_is_the_fallback() {
        // Each bullet line is under the continuation convention's length
        // floor, so only the bullet-glyph convention extracts anything.
        let raw = "\\uc0\\u9679 Heart pumps blood.\\\n\\uc0\\u9679 Lungs take in air.\\\n";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(
            statements,
            vec!["Heart pumps blood.", "Lungs take in air."]
        );
    }

    #[test]
    fn overrun_guard_stops_at_next_header() {
        let raw = "What is the heart?\\What is blood made of?\\Key Points:\\The heart is an organ?\\x?\\";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(
            statements,
            vec!["What is the heart?", "What is blood made of?"]
        );
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let raw = "What is the heart?\\What  is the heart?\\Why do we breathe?\\";
        let statements = split(raw, BoundaryMode::Strict);
        assert_eq!(statements, vec!["What is the heart?", "Why do we breathe?"]);
    }

    #[test]
    fn short_entries_are_dropped() {
        let raw = "Too short?\\Why?\\What should we eat for breakfast?\\";
        let statements = split(raw, BoundaryMode::Strict);
        // "Why?" is under the length floor; "Too short?" is exactly 10 chars
        // and fails the strict >10 guard of the punctuation convention.
        assert_eq!(statements, vec!["What should we eat for breakfast?"]);
    }

    #[test]
    fn lenient_mode_only_reads_bullets() {
        let raw = "What is the heart?\\Why do we breathe?\\";
        assert!(split(raw, BoundaryMode::Lenient).is_empty());

        let bullets = "\\uc0\\u9679 The heart pumps blood.\n\\uc0\\u9679 Veins return it.\n";
        assert_eq!(
            split(bullets, BoundaryMode::Lenient),
            vec!["The heart pumps blood.", "Veins return it."]
        );
    }
}
