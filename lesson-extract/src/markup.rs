//! Markup normalization: rich-text control codes to plain Unicode text.
//!
//! Source documents carry RTF-style markup: control words (`\fs21`,
//! `\fsmilli25995`), grouping braces, numeric character escapes, and
//! backslash line continuations. Normalization resolves the escapes and
//! strips everything else, leaving plain text with single-space runs and at
//! most one blank line in a row.
//!
//! `normalize` is a pure function and idempotent: running it over its own
//! output returns the input unchanged. The splitter relies on that when it
//! re-normalizes statements for comparison.

use once_cell::sync::Lazy;
use regex::Regex;

/// Glyphs that introduce a bullet item in normalized text.
pub(crate) const BULLET_GLYPHS: [char; 2] = ['\u{2022}', '\u{25CF}'];

static CODE_POINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\uc0\\u(\d+)").unwrap());
static LEGACY_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\'(\d+)").unwrap());
static CONTROL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-z]+\d*\s*").unwrap());
static CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\s*\n").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").unwrap());

/// Characters for the legacy numeric escapes still found in older exports.
/// Codes without an entry are dropped.
fn legacy_char(code: &str) -> Option<&'static str> {
    Some(match code {
        "92" => "'",
        "96" => "-",
        "93" | "94" => "\u{201C}",
        "8216" => "\u{2018}",
        "8217" => "\u{2019}",
        "8220" => "\u{201C}",
        "8221" => "\u{201D}",
        "8211" => "\u{2013}",
        "8212" => "\u{2014}",
        "8230" => "...",
        "8594" => "\u{2192}",
        _ => return None,
    })
}

/// Strip markup from `text`, returning plain Unicode.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace('\r', "");
    let text = CODE_POINT.replace_all(&text, |caps: &regex::Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    let text = LEGACY_ESCAPE.replace_all(&text, |caps: &regex::Captures| {
        legacy_char(&caps[1]).unwrap_or("").to_string()
    });
    let text = CONTROL_WORD.replace_all(&text, " ");
    let text = text.replace(['{', '}'], "");
    let text = CONTINUATION.replace_all(&text, " ");
    let text = text.replace('\\', " ");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Strip leading bullet glyphs and whitespace.
pub(crate) fn strip_bullet_prefix(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_whitespace() || BULLET_GLYPHS.contains(&c))
}

/// Whether `text` is nothing but bullet glyphs and whitespace.
pub(crate) fn is_bullet_noise(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || BULLET_GLYPHS.contains(&c))
}

/// Character count; all length thresholds in the pipeline are in characters,
/// not bytes.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to at most `limit` characters.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Split plain text into sentences on terminal punctuation, keeping one
/// terminal mark on each sentence. A run of marks collapses to its first.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '.' | '?' | '!') {
            current.push(c);
            while matches!(chars.peek(), Some('.' | '?' | '!')) {
                chars.next();
            }
            let sentence = current.trim();
            if !sentence.is_empty() {
                out.push(sentence.to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_code_point_escapes() {
        assert_eq!(normalize(r"\uc0\u9679 item"), "\u{25CF} item");
    }

    #[test]
    fn resolves_legacy_escapes() {
        assert_eq!(normalize(r"it\'92s fine"), "it's fine");
        // unknown codes drop
        assert_eq!(normalize(r"a\'55b"), "ab");
    }

    #[test]
    fn strips_control_words_and_braces() {
        assert_eq!(normalize(r"{\fs21 Hello \cf2 world}"), "Hello world");
    }

    #[test]
    fn continuation_becomes_space() {
        assert_eq!(normalize("first\\\nsecond"), "first second");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("a  \t b"), "a b");
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let raw = "{\\fs51 Lesson \\uc0\\u8594  one\\\n two}\n\n\n three";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalizes_a_heading_line() {
        let raw = r"{\fs51\fsmilli25995 \cf2 1 | The Human Heart\fs21 It\'92s \uc0\u8594  vital}";
        insta::assert_snapshot!(normalize(raw), @"1 | The Human Heart It's → vital");
    }

    #[test]
    fn bullet_prefix_is_stripped() {
        assert_eq!(strip_bullet_prefix("\u{2022} item"), "item");
        assert_eq!(strip_bullet_prefix("  \u{25CF}\u{25CF} item"), "item");
        assert!(is_bullet_noise(" \u{2022} \u{25CF} "));
        assert!(!is_bullet_noise("\u{2022} item"));
    }

    #[test]
    fn sentences_keep_terminal_punctuation() {
        let sentences = split_sentences("The heart pumps blood. Why? Because it must!");
        assert_eq!(
            sentences,
            vec!["The heart pumps blood.", "Why?", "Because it must!"]
        );
    }

    #[test]
    fn sentence_tail_without_punctuation_is_kept() {
        let sentences = split_sentences("One sentence. trailing words");
        assert_eq!(sentences, vec!["One sentence.", "trailing words"]);
    }
}
