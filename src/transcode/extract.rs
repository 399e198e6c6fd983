//! Locate embedded SVG inside component source.

use regex::Regex;
use std::{ops::Range, sync::LazyLock};

/// First `<svg ...>...</svg>` span, lazily matched.
static RE_SVG_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<svg\b.*?</svg>").unwrap());

/// An SVG-shaped substring and its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgSpan<'a> {
    pub range: Range<usize>,
    pub text: &'a str,
}

impl SvgSpan<'_> {
    /// Return `source` with this span replaced by `replacement`.
    pub fn splice(&self, source: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(source.len() - self.text.len() + replacement.len());
        out.push_str(&source[..self.range.start]);
        out.push_str(replacement);
        out.push_str(&source[self.range.end..]);
        out
    }
}

/// Find the first SVG span in `source`.
pub fn find_svg_span(source: &str) -> Option<SvgSpan<'_>> {
    RE_SVG_SPAN.find(source).map(|m| SvgSpan {
        range: m.range(),
        text: m.as_str(),
    })
}
