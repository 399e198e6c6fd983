//! SVG markup → component source.

use super::{attr::rename_attributes, style::convert_style_attributes};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Name of the generated component.
pub const COMPONENT_NAME: &str = "Icon";

static RE_XML_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\?xml.*?\?>").unwrap());
static RE_DOCTYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!DOCTYPE.*?>").unwrap());

/// `<tag attrs></tag>` with nothing in between.
///
/// Open and close names are compared in the replacer since the regex
/// engine has no backreferences.
static RE_EMPTY_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+)([^>]*)></(\w+)>").unwrap());

static RE_LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n]+").unwrap());
static RE_SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Drop `<?xml ...?>` and `<!DOCTYPE ...>` declarations.
pub fn strip_declarations(svg: &str) -> String {
    let svg = RE_XML_DECL.replace_all(svg, "");
    RE_DOCTYPE.replace_all(&svg, "").into_owned()
}

/// Turn `<path d=""></path>` into `<path d="" />`.
///
/// Single pass over flat text: nested elements sharing a tag name are not
/// handled.
pub fn self_close_empty_elements(markup: &str) -> String {
    RE_EMPTY_PAIR
        .replace_all(markup, |caps: &Captures| {
            if caps[1] == caps[3] {
                format!("<{}{} />", &caps[1], &caps[2])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Collapse line breaks and space runs into single spaces.
///
/// Leading and trailing whitespace is dropped so a file ending in a newline
/// does not leave a stray space inside the component wrapper.
pub fn collapse_whitespace(markup: &str) -> String {
    let single_line = RE_LINE_BREAKS.replace_all(markup, " ");
    RE_SPACE_RUNS
        .replace_all(&single_line, " ")
        .trim()
        .to_string()
}

/// Normalize SVG into single-line component markup without the wrapper.
///
/// Steps run in a fixed order; later steps rely on earlier normalization
/// (`className` must exist before camelCasing so it is left alone).
pub fn svg_to_markup(svg: &str) -> String {
    let markup = strip_declarations(svg);
    let markup = rename_attributes(&markup);
    let markup = convert_style_attributes(&markup);
    let markup = self_close_empty_elements(&markup);
    collapse_whitespace(&markup)
}

/// Wrap normalized markup in a component definition with a default export.
pub fn wrap_component(markup: &str) -> String {
    format!(
        "const {COMPONENT_NAME} = () => (\n  {markup}\n);\n\nexport default {COMPONENT_NAME};\n"
    )
}
