//! Attribute name mapping between SVG and component props.
//!
//! - `class` → `className`
//! - dash-case → camelCase (`stroke-width` → `strokeWidth`)
//!
//! Only the name token in front of `=` is rewritten. Quoted values are
//! carried through verbatim, so `href="a?b-c=d"` keeps its query string.

use regex::{Captures, Regex};
use std::{borrow::Cow, sync::LazyLock};

/// `name=` optionally followed by a quoted value. Names start with a letter
/// and may carry digits (`x1`, `y2`).
///
/// The value is consumed together with the name so that `=` signs inside
/// values are never treated as attribute boundaries.
static RE_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)=("[^"]*"|'[^']*')?"#).unwrap());

static RE_DASH_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-([a-z])").unwrap());

/// Convert dash-case to camelCase.
///
/// Idempotent: an already camelCased name is returned unchanged.
///
/// # Examples
///
/// - `stroke-width` -> `strokeWidth`
/// - `fill-rule` -> `fillRule`
/// - `viewBox` -> `viewBox`
pub fn to_camel_case(name: &str) -> Cow<'_, str> {
    RE_DASH_LETTER.replace_all(name, |caps: &Captures| caps[1].to_ascii_uppercase())
}

/// Map an SVG attribute name to its component prop name.
#[inline]
pub fn attribute_to_prop(name: &str) -> Cow<'_, str> {
    if name == "class" {
        return Cow::Borrowed("className");
    }
    to_camel_case(name)
}

/// Rewrite every attribute name in `markup` to its prop name.
pub fn rename_attributes(markup: &str) -> String {
    RE_ATTRIBUTE
        .replace_all(markup, |caps: &Captures| {
            let value = caps.get(2).map_or("", |m| m.as_str());
            format!("{}={}", attribute_to_prop(&caps[1]), value)
        })
        .into_owned()
}
