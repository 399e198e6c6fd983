//! Component markup → SVG markup.
//!
//! Only literal brace values (`{24}`, `{'x'}`, `{"x"}`) can be restored.
//! Arbitrary expressions pass through untouched.

use super::pretty::pretty_print;
use regex::Regex;
use std::sync::LazyLock;

static RE_CLASS_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bclassName=").unwrap());
static RE_NUMBER_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=\{(\d+)\}").unwrap());
static RE_STRING_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"=\{['"]([^'"]+)['"]\}"#).unwrap());
static RE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<>|</>").unwrap());

/// `={123}` → `="123"`, `={'x'}` / `={"x"}` → `="x"`.
pub fn unwrap_brace_values(markup: &str) -> String {
    let markup = RE_NUMBER_VALUE.replace_all(markup, r#"="$1""#);
    RE_STRING_VALUE
        .replace_all(&markup, r#"="$1""#)
        .into_owned()
}

/// Undo the component-specific syntax, without re-indenting.
pub fn markup_to_svg_flat(source: &str) -> String {
    let svg = RE_CLASS_NAME.replace_all(source, "class=");
    let svg = unwrap_brace_values(&svg);
    RE_FRAGMENT.replace_all(&svg, "").into_owned()
}

/// Undo the component-specific syntax and re-indent for readability.
pub fn markup_to_svg(source: &str) -> String {
    pretty_print(&markup_to_svg_flat(source))
}
