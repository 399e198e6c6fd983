//! Hardcoded color → `currentColor`.

use regex::RegexBuilder;
use std::borrow::Cow;

/// Token that makes an icon inherit the surrounding text color.
pub const CURRENT_COLOR: &str = "currentColor";

/// Replace every literal occurrence of `color` with `currentColor`.
///
/// Matching is case-insensitive so `#2b2b2b` and `#2B2B2B` are the same color.
pub fn replace_color<'a>(svg: &'a str, color: &str) -> Cow<'a, str> {
    let color = color.trim();
    if color.is_empty() {
        return Cow::Borrowed(svg);
    }

    match RegexBuilder::new(&regex::escape(color))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(svg, CURRENT_COLOR),
        // Only an absurdly long colour exceeds the size limit
        Err(_) => Cow::Borrowed(svg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_color() {
        let svg = r##"<path fill="#2B2B2B" stroke="#2b2b2b"/>"##;
        assert_eq!(
            replace_color(svg, "#2B2B2B"),
            r#"<path fill="currentColor" stroke="currentColor"/>"#
        );
    }

    #[test]
    fn test_replace_color_is_literal() {
        // `.` must not act as a wildcard
        let svg = r#"<path opacity="0x5" fill="0.5"/>"#;
        assert_eq!(
            replace_color(svg, "0.5"),
            r#"<path opacity="0x5" fill="currentColor"/>"#
        );
    }

    #[test]
    fn test_replace_empty_color_is_noop() {
        let svg = "<svg/>";
        assert!(matches!(replace_color(svg, "  "), Cow::Borrowed(_)));
    }
}
