//! Inline `style="..."` → style object literal.
//!
//! Parsing is lenient: segments without a key or value are dropped, values
//! are opaque strings with no unit or type checks.

use super::attr::to_camel_case;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"style="([^"]*)""#).unwrap());

/// Ordered `(property, value)` pairs parsed from a style attribute.
///
/// Property keys are already camelCased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations(Vec<(String, String)>);

impl StyleDeclarations {
    /// Parse a raw style attribute value such as `fill:red; stroke-width: 2`.
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .split(';')
            .filter_map(|segment| {
                let (key, value) = segment.split_once(':')?;
                let (key, value) = (key.trim(), value.trim());
                if key.is_empty() || value.is_empty() {
                    return None;
                }
                Some((to_camel_case(key).into_owned(), value.to_string()))
            })
            .collect();
        Self(pairs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as the inner part of an object literal: `color: 'red', margin: '0'`.
    pub fn to_object_body(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}: '{value}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Replace every `style="..."` attribute with `style={{ ... }}`.
pub fn convert_style_attributes(markup: &str) -> String {
    RE_STYLE_ATTR
        .replace_all(markup, |caps: &Captures| {
            let declarations = StyleDeclarations::parse(&caps[1]);
            format!("style={{{{ {} }}}}", declarations.to_object_body())
        })
        .into_owned()
}
