//! Indentation reconstruction for flat markup.
//!
//! This is a line heuristic with a running depth counter, not a
//! re-serialization. There is no tag stack, so malformed or unusually
//! nested markup can come out mis-indented.

use regex::Regex;
use std::sync::LazyLock;

const INDENT: &str = "  ";

/// `><` tag boundary. Tags separated by whitespace stay on one line.
static RE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"><").unwrap());

/// Something followed by a closing tag at end of line (`<a></a>`, `text</a>`).
static RE_INLINE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".+</\w[^>]*>$").unwrap());

/// Line that starts with a closing tag.
static RE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^</\w").unwrap());

/// Line that starts with a non-self-closing opening tag.
static RE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<\w([^>]*[^/])?>.*$").unwrap());

/// Depth effect of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// Open and close on the same line, or plain content.
    Neutral,
    /// Closing tag: dedent before printing.
    Close,
    /// Opening tag: indent after printing.
    Open,
}

fn classify(line: &str) -> LineKind {
    if RE_INLINE_CLOSE.is_match(line) {
        LineKind::Neutral
    } else if RE_CLOSE.is_match(line) {
        LineKind::Close
    } else if RE_OPEN.is_match(line) {
        LineKind::Open
    } else {
        LineKind::Neutral
    }
}

/// Put every tag on its own line and indent by two spaces per depth.
///
/// Lines are trimmed before being classified, so feeding the output back in
/// yields the same text.
pub fn pretty_print(markup: &str) -> String {
    let split = RE_BOUNDARY.replace_all(markup, ">\n<");

    let mut out = String::with_capacity(split.len() + split.len() / 4);
    let mut depth = 0usize;

    for line in split.lines().map(str::trim) {
        if line.is_empty() {
            out.push('\n');
            continue;
        }

        let kind = classify(line);
        if kind == LineKind::Close {
            depth = depth.saturating_sub(1);
        }

        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push_str(line);
        out.push('\n');

        if kind == LineKind::Open {
            depth += 1;
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("<svg viewBox=\"0 0 24 24\">"), LineKind::Open);
        assert_eq!(classify("<g>"), LineKind::Open);
        assert_eq!(classify("<path d=\"M0 0\" />"), LineKind::Neutral);
        assert_eq!(classify("<path/>"), LineKind::Neutral);
        assert_eq!(classify("</g>"), LineKind::Close);
        assert_eq!(classify("<title>Icon</title>"), LineKind::Neutral);
        assert_eq!(classify("plain text"), LineKind::Neutral);
    }

    #[test]
    fn test_pretty_print_nested() {
        let input = r#"<svg viewBox="0 0 24 24"><g><path d="M0 0"/></g></svg>"#;
        let expected = "<svg viewBox=\"0 0 24 24\">\n  <g>\n    <path d=\"M0 0\"/>\n  </g>\n</svg>";
        assert_eq!(pretty_print(input), expected);
    }

    #[test]
    fn test_pretty_print_same_line_pair() {
        let input = "<svg><title>Home</title><path/></svg>";
        let expected = "<svg>\n  <title>Home</title>\n  <path/>\n</svg>";
        assert_eq!(pretty_print(input), expected);
    }

    #[test]
    fn test_pretty_print_depth_never_negative() {
        let input = "</g></g><path/>";
        assert_eq!(pretty_print(input), "</g>\n</g>\n<path/>");
    }

    #[test]
    fn test_pretty_print_idempotent() {
        let input = r#"<svg width="24"><g fill="none"><circle r="2"/><path d="M1 1"/></g></svg>"#;
        let once = pretty_print(input);
        let twice = pretty_print(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pretty_print_splits_only_adjacent_tags() {
        let input = "<svg> <path/></svg>";
        assert_eq!(pretty_print(input), "<svg> <path/>\n</svg>");
    }

    #[test]
    fn test_pretty_print_reindents_wrapped_input() {
        let input = "<svg>\n<g>\n        <path/>\n</g>\n</svg>";
        assert_eq!(pretty_print(input), "<svg>\n  <g>\n    <path/>\n  </g>\n</svg>");
    }
}
