//! SVG ⇄ component source transcoding.
//!
//! Everything here is pure and total: malformed input produces best-effort
//! output, never an error. The transforms work on flat text with regexes
//! rather than a tag tree.
//!
//! # Modules
//!
//! - [`attr`]: attribute name → prop name (`class` → `className`, dash → camel)
//! - [`style`]: `style="a:b"` → `style={{ a: 'b' }}`
//! - [`forward`]: SVG → component source pipeline
//! - [`reverse`]: component markup → SVG
//! - [`pretty`]: indentation reconstruction
//! - [`color`]: hardcoded color → `currentColor`
//! - [`extract`]: locating SVG spans inside component files
//!
//! # Pipeline
//!
//! ```text
//! forward:  strip decls → rename attrs → style objects → self-close → collapse → wrap
//! reverse:  className → class → unwrap {literals} → drop fragments → pretty print
//! ```

pub mod attr;
pub mod color;
pub mod extract;
pub mod forward;
pub mod pretty;
pub mod reverse;
pub mod style;

pub use color::replace_color;
pub use extract::{SvgSpan, find_svg_span};

/// True iff the trimmed text starts with `<svg`.
///
/// This is the only SVG validation performed anywhere; it does not parse XML.
#[inline]
pub fn looks_like_svg(text: &str) -> bool {
    text.trim().starts_with("<svg")
}

/// Bidirectional transform between SVG markup and component source.
///
/// Callers depend on this seam rather than on the regex pipeline, so a
/// structural implementation can replace [`RegexTranscoder`] later.
pub trait Transcoder {
    /// Convert SVG into single-line component markup, without the wrapper.
    fn svg_to_markup(&self, svg: &str) -> String;

    /// Convert component source (or a markup fragment) back into SVG.
    fn component_source_to_svg(&self, source: &str) -> String;

    /// Convert SVG into a complete component definition.
    fn svg_to_component_source(&self, svg: &str) -> String {
        forward::wrap_component(&self.svg_to_markup(svg))
    }
}

/// Text-based transcoder built on regex substitutions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTranscoder;

impl Transcoder for RegexTranscoder {
    fn svg_to_markup(&self, svg: &str) -> String {
        forward::svg_to_markup(svg)
    }

    fn component_source_to_svg(&self, source: &str) -> String {
        reverse::markup_to_svg(source)
    }
}

/// Convert SVG markup into component source.
#[inline]
pub fn svg_to_component_source(svg: &str) -> String {
    RegexTranscoder.svg_to_component_source(svg)
}

/// Convert component source back into SVG markup.
#[inline]
pub fn component_source_to_svg(source: &str) -> String {
    RegexTranscoder.component_source_to_svg(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: &str = r#"<?xml version="1.0"?>
<svg class="icon" width="24" height="24" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">
    <path d="M12 2L2 22h20z" stroke-width="2" stroke-linecap="round"></path>
    <circle cx="12" cy="12" r="3" style="fill: red; fill-opacity:0.5"></circle>
</svg>
"#;

    #[test]
    fn test_looks_like_svg() {
        assert!(looks_like_svg("<svg/>"));
        assert!(looks_like_svg("  \n<svg viewBox=\"0 0 1 1\">"));
        assert!(!looks_like_svg("<?xml version=\"1.0\"?><svg/>"));
        assert!(!looks_like_svg("<div/>"));
        assert!(!looks_like_svg(""));
    }

    #[test]
    fn test_svg_to_component_source() {
        let out = svg_to_component_source(ICON);
        let expected = concat!(
            "const Icon = () => (\n",
            "  <svg className=\"icon\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" ",
            "xmlns=\"http://www.w3.org/2000/svg\"> ",
            "<path d=\"M12 2L2 22h20z\" strokeWidth=\"2\" strokeLinecap=\"round\" /> ",
            "<circle cx=\"12\" cy=\"12\" r=\"3\" style={{ fill: 'red', fillOpacity: '0.5' }} /> ",
            "</svg>\n",
            ");\n\nexport default Icon;\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_round_trip_preserves_attribute_values() {
        let svg = component_source_to_svg(&svg_to_component_source(ICON));
        for value in [
            "icon",
            "24",
            "0 0 24 24",
            "http://www.w3.org/2000/svg",
            "M12 2L2 22h20z",
            "round",
            "red",
            "0.5",
        ] {
            assert!(svg.contains(value), "lost value {value:?} in:\n{svg}");
        }
        assert!(svg.contains(r#"class="icon""#));
    }

    #[test]
    fn test_component_source_to_svg_splits_tags() {
        let svg = component_source_to_svg(r#"<svg className="a"><path d={"M0 0"} /></svg>"#);
        assert_eq!(svg, "<svg class=\"a\">\n  <path d=\"M0 0\" />\n</svg>");
    }

    #[test]
    fn test_transcoder_never_fails_on_garbage() {
        for input in ["", "<", "</>", "<<svg", "style=\"", "={", "<a></b>"] {
            let _ = svg_to_component_source(input);
            let _ = component_source_to_svg(input);
        }
    }
}
