//! SVG optimization using usvg.
//!
//! usvg parses the markup into a normalized render tree and writes it back,
//! which drops editor metadata, comments, unused defs, and resolves styles.
//! Rule-set keys it can honor are mapped onto its write options.

use std::borrow::Cow;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use super::RuleSet;

/// Upper bound on passes when `multipass` is on.
const MAX_PASSES: usize = 10;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Rule that, when off, keeps `viewBox` on the root element.
const REMOVE_VIEW_BOX: &str = "removeViewBox";

/// usvg resolves `currentColor` to a concrete colour, which breaks icons
/// meant to inherit the text colour. It is swapped for one of these before
/// parsing and swapped back afterwards. usvg writes colours as lowercase hex.
const CURRENT_COLOR_STAND_INS: &[&str] = &["#010203", "#fe0dc1", "#0c0ffe", "#c1d2e3"];

static RE_CURRENT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)currentcolor").unwrap());

/// Replace every `currentColor` with a colour the markup does not use.
///
/// Returns the stand-in to restore, or `None` when nothing was replaced.
/// Markup already using every stand-in is passed through unchanged.
fn mask_current_color(svg: &str) -> (Cow<'_, str>, Option<&'static str>) {
    if !RE_CURRENT_COLOR.is_match(svg) {
        return (Cow::Borrowed(svg), None);
    }
    let lower = svg.to_ascii_lowercase();
    let Some(stand_in) = CURRENT_COLOR_STAND_INS
        .iter()
        .copied()
        .find(|c| !lower.contains(c))
    else {
        return (Cow::Borrowed(svg), None);
    };
    (RE_CURRENT_COLOR.replace_all(svg, stand_in), Some(stand_in))
}

/// Insert `name="value"` right after `<svg` unless the root tag has `name`.
fn insert_root_attribute<'a>(svg: &'a str, name: &str, value: &str) -> Cow<'a, str> {
    let Some(start) = svg.find("<svg") else {
        return Cow::Borrowed(svg);
    };
    let root_end = svg[start..].find('>').map_or(svg.len(), |i| start + i);
    let prefix = format!("{name}=");
    if svg[start..root_end]
        .split_whitespace()
        .any(|token| token.starts_with(&prefix))
    {
        return Cow::Borrowed(svg);
    }
    let insert_at = start + "<svg".len();
    Cow::Owned(format!(
        "{} {name}=\"{value}\"{}",
        &svg[..insert_at],
        &svg[insert_at..]
    ))
}

/// Add the SVG namespace to the root tag when it is missing.
///
/// Icons pasted from component source often drop `xmlns`, and usvg ignores
/// elements outside the SVG namespace.
fn ensure_namespace(svg: &str) -> Cow<'_, str> {
    insert_root_attribute(svg, "xmlns", SVG_NS)
}

/// Add `viewBox="0 0 w h"` to the root tag when it is missing.
///
/// usvg flattens the viewBox into the tree and writes only `width`/`height`.
fn ensure_view_box(svg: &str, size: (f32, f32)) -> Cow<'_, str> {
    insert_root_attribute(svg, "viewBox", &format!("0 0 {} {}", size.0, size.1))
}

/// Optimized SVG result.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedSvg {
    /// Optimized SVG markup.
    pub data: String,
    /// Dimensions (width, height) in pixels.
    pub size: (f32, f32),
}

impl OptimizedSvg {
    /// Optimizer info attached to a no-output failure.
    pub fn info(&self) -> Value {
        serde_json::json!({ "width": self.size.0, "height": self.size.1 })
    }
}

/// The external optimizer capability.
///
/// Implementations must be callable from the server's dispatcher thread and
/// from the in-process batch client.
pub trait Optimizer: Send + Sync {
    fn optimize(&self, svg: &str, rules: &RuleSet) -> Result<OptimizedSvg>;
}

/// Optimizer backed by a usvg parse/write round trip.
#[derive(Debug, Clone)]
pub struct UsvgOptimizer {
    /// DPI for unit resolution.
    pub dpi: f32,
}

impl Default for UsvgOptimizer {
    fn default() -> Self {
        Self { dpi: 96.0 }
    }
}

impl UsvgOptimizer {
    fn write_options(rules: &RuleSet) -> usvg::WriteOptions {
        let mut options = usvg::WriteOptions {
            indent: usvg::Indent::None,
            ..Default::default()
        };
        if let Some(precision) = rules.float_precision() {
            options.coordinates_precision = precision;
            options.transforms_precision = precision;
        }
        // js2svg: { pretty: true, indent: N }
        if let Some(js2svg) = rules.get("js2svg").and_then(Value::as_object)
            && js2svg.get("pretty").and_then(Value::as_bool) == Some(true)
        {
            let width = js2svg
                .get("indent")
                .and_then(Value::as_u64)
                .and_then(|n| u8::try_from(n).ok())
                .unwrap_or(2);
            options.indent = usvg::Indent::Spaces(width);
        }
        options
    }

    fn single_pass(&self, svg: &str, write: &usvg::WriteOptions) -> Result<(String, (f32, f32))> {
        let options = usvg::Options {
            dpi: self.dpi,
            ..Default::default()
        };
        let svg = ensure_namespace(svg);
        let tree = usvg::Tree::from_str(&svg, &options).context("Failed to parse SVG")?;
        let size = (tree.size().width(), tree.size().height());
        Ok((tree.to_string(write), size))
    }
}

impl Optimizer for UsvgOptimizer {
    fn optimize(&self, svg: &str, rules: &RuleSet) -> Result<OptimizedSvg> {
        let write = Self::write_options(rules);
        let (svg, stand_in) = mask_current_color(svg);
        let (mut data, mut size) = self.single_pass(&svg, &write)?;

        if rules.multipass() {
            for _ in 1..MAX_PASSES {
                let (next, next_size) = self.single_pass(&data, &write)?;
                if next.len() >= data.len() {
                    break;
                }
                data = next;
                size = next_size;
            }
        }

        if let Some(stand_in) = stand_in {
            data = data.replace(stand_in, "currentColor");
        }
        if !rules.is_enabled(REMOVE_VIEW_BOX) {
            data = ensure_view_box(&data, size).into_owned();
        }

        Ok(OptimizedSvg { data, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
        <!-- editor comment -->
        <metadata>exported</metadata>
        <rect x="2" y="2" width="20" height="20" fill="red"/>
    </svg>"#;

    #[test]
    fn test_usvg_optimizer_shrinks_markup() {
        let out = UsvgOptimizer::default()
            .optimize(SQUARE, &RuleSet::baseline())
            .unwrap();
        assert!(!out.data.is_empty());
        assert!(out.data.len() < SQUARE.len());
        assert!(!out.data.contains("editor comment"));
        assert_eq!(out.size, (24.0, 24.0));
    }

    #[test]
    fn test_usvg_optimizer_rejects_non_xml() {
        let err = UsvgOptimizer::default()
            .optimize("<svg", &RuleSet::baseline())
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse SVG"));
    }

    #[test]
    fn test_ensure_namespace() {
        assert_eq!(
            ensure_namespace(r#"<svg width="1"><g/></svg>"#),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1"><g/></svg>"#
        );
        let with_ns = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert!(matches!(ensure_namespace(with_ns), Cow::Borrowed(_)));
        assert!(matches!(ensure_namespace("<path/>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_usvg_optimizer_accepts_missing_namespace() {
        let svg = r#"<svg width="10" height="10" viewBox="0 0 10 10"><rect width="5" height="5"/></svg>"#;
        let out = UsvgOptimizer::default().optimize(svg, &RuleSet::new()).unwrap();
        assert!(out.data.contains("<path") || out.data.contains("<rect"));
        assert_eq!(out.size, (10.0, 10.0));
    }

    #[test]
    fn test_usvg_optimizer_keeps_current_color() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path fill="currentColor" stroke="CurrentColor" d="M2 2h20v20H2z"/></svg>"#;
        let out = UsvgOptimizer::default()
            .optimize(svg, &RuleSet::baseline())
            .unwrap();
        assert_eq!(out.data.matches("currentColor").count(), 2, "{}", out.data);
        assert!(!out.data.contains("#000000"));
        assert!(!out.data.contains("#010203"));
    }

    #[test]
    fn test_mask_current_color_skips_used_stand_ins() {
        let (masked, stand_in) = mask_current_color(r##"<path fill="#010203" stroke="currentColor"/>"##);
        assert_eq!(stand_in, Some("#fe0dc1"));
        assert_eq!(masked, r##"<path fill="#010203" stroke="#fe0dc1"/>"##);

        let (masked, stand_in) = mask_current_color(r##"<path fill="red"/>"##);
        assert_eq!(stand_in, None);
        assert!(matches!(masked, Cow::Borrowed(_)));
    }

    #[test]
    fn test_usvg_optimizer_keeps_view_box_unless_removed() {
        let out = UsvgOptimizer::default()
            .optimize(SQUARE, &RuleSet::baseline())
            .unwrap();
        assert!(out.data.starts_with(r#"<svg viewBox="0 0 24 24""#), "{}", out.data);

        let removing = RuleSet::from_value(json!({ "plugins": ["preset-default"] }));
        let out = UsvgOptimizer::default().optimize(SQUARE, &removing).unwrap();
        assert!(!out.data.contains("viewBox"));
    }

    #[test]
    fn test_ensure_view_box() {
        assert_eq!(
            ensure_view_box(r#"<svg width="16" height="8"><g/></svg>"#, (16.0, 8.0)),
            r#"<svg viewBox="0 0 16 8" width="16" height="8"><g/></svg>"#
        );
        let kept = r#"<svg viewBox="0 0 1 1"/>"#;
        assert!(matches!(ensure_view_box(kept, (1.0, 1.0)), Cow::Borrowed(_)));
    }

    #[test]
    fn test_write_options_from_rules() {
        let rules = RuleSet::from_value(json!({
            "floatPrecision": 3,
            "js2svg": { "pretty": true, "indent": 4 }
        }));
        let options = UsvgOptimizer::write_options(&rules);
        assert_eq!(options.coordinates_precision, 3);
        assert_eq!(options.transforms_precision, 3);
        assert!(matches!(options.indent, usvg::Indent::Spaces(4)));

        let options = UsvgOptimizer::write_options(&RuleSet::baseline());
        assert!(matches!(options.indent, usvg::Indent::None));
    }

    #[test]
    fn test_info_shape() {
        let out = OptimizedSvg {
            data: String::new(),
            size: (16.0, 8.0),
        };
        assert_eq!(out.info(), json!({ "width": 16.0, "height": 8.0 }));
    }
}
