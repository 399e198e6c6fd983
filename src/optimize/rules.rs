//! Optimizer rule sets.
//!
//! A rule set is a JSON object in the optimizer's own vocabulary
//! (`multipass`, `floatPrecision`, `plugins`, ...). It is kept as an ordered
//! map rather than a closed struct so unknown keys travel through untouched.
//!
//! # Merge policy
//!
//! [`RuleSet::merge`] is a **shallow** merge: every top-level key present in
//! the override replaces the baseline's key wholesale. An override carrying
//! `plugins: [C]` therefore replaces the whole plugin pipeline, it does not
//! append to it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Name of the preset plugin that bundles the default cleanup rules.
pub const PRESET_DEFAULT: &str = "preset-default";

/// Cleanup rules the optimizer understands.
///
/// Hand-maintained; it is not discovered from the optimizer at runtime.
pub const PLUGIN_CATALOGUE: &[&str] = &[
    PRESET_DEFAULT,
    "cleanupAttrs",
    "cleanupEnableBackground",
    "cleanupIds",
    "cleanupNumericValues",
    "collapseGroups",
    "convertColors",
    "convertEllipseToCircle",
    "convertPathData",
    "convertShapeToPath",
    "convertTransform",
    "inlineStyles",
    "mergePaths",
    "mergeStyles",
    "minifyStyles",
    "moveElemsAttrsToGroup",
    "moveGroupAttrsToElems",
    "removeComments",
    "removeDesc",
    "removeDimensions",
    "removeDoctype",
    "removeEditorsNSData",
    "removeEmptyAttrs",
    "removeEmptyContainers",
    "removeEmptyText",
    "removeHiddenElems",
    "removeMetadata",
    "removeNonInheritableGroupAttrs",
    "removeTitle",
    "removeUnknownsAndDefaults",
    "removeUnusedNS",
    "removeUselessDefs",
    "removeUselessStrokeAndFill",
    "removeViewBox",
    "removeXMLProcInst",
    "sortAttrs",
    "sortDefsChildren",
];

/// A named collection of optimizer toggles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(Map<String, Value>);

/// One entry of the `plugins` list, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRule {
    pub name: String,
    /// `params.overrides` for presets: rule name → flag or enum value.
    pub overrides: Map<String, Value>,
    /// Remaining `params`, passed through.
    pub params: Map<String, Value>,
}

impl PluginRule {
    /// Whether a rule inside a preset is switched off by an override.
    pub fn disables(&self, rule: &str) -> bool {
        matches!(self.overrides.get(rule), Some(Value::Bool(false)))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self {
                name: name.clone(),
                overrides: Map::new(),
                params: Map::new(),
            }),
            Value::Object(obj) => {
                let name = obj.get("name")?.as_str()?.to_string();
                let mut params = obj
                    .get("params")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                let overrides = match params.remove("overrides") {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                Some(Self {
                    name,
                    overrides,
                    params,
                })
            }
            _ => None,
        }
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline used when a request carries no override.
    ///
    /// Multipass preset with viewBox, title and desc preserved.
    pub fn baseline() -> Self {
        Self::from_value(json!({
            "multipass": true,
            "plugins": [
                {
                    "name": PRESET_DEFAULT,
                    "params": {
                        "overrides": {
                            "removeViewBox": false,
                            "removeTitle": false,
                            "removeDesc": false
                        }
                    }
                }
            ]
        }))
    }

    /// Build from a JSON value. Non-object values yield an empty rule set.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Effective rule set for a request: `{ ...self, ...overrides }`.
    pub fn merge(&self, overrides: Option<&RuleSet>) -> RuleSet {
        let Some(overrides) = overrides else {
            return self.clone();
        };
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        RuleSet(merged)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `multipass` flag, off when absent.
    pub fn multipass(&self) -> bool {
        self.get("multipass").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Top-level `floatPrecision`, falling back to the preset's params.
    pub fn float_precision(&self) -> Option<u8> {
        let from_value = |v: &Value| v.as_u64().and_then(|n| u8::try_from(n).ok());
        self.get("floatPrecision").and_then(from_value).or_else(|| {
            self.plugins()
                .into_iter()
                .find(|p| p.name == PRESET_DEFAULT)
                .and_then(|p| p.params.get("floatPrecision").and_then(from_value))
        })
    }

    /// Normalized plugin list. Entries that are neither a name nor an
    /// object with a `name` are skipped.
    pub fn plugins(&self) -> Vec<PluginRule> {
        self.get("plugins")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(PluginRule::from_value).collect())
            .unwrap_or_default()
    }

    /// Plugin names in pipeline order.
    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins().into_iter().map(|p| p.name).collect()
    }

    /// Whether `rule` runs under this rule set.
    ///
    /// A rule is enabled when listed directly, or when the preset is listed
    /// and does not override it to `false`.
    pub fn is_enabled(&self, rule: &str) -> bool {
        self.plugins().iter().any(|p| {
            p.name == rule || (p.name == PRESET_DEFAULT && !p.disables(rule))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(value: Value) -> RuleSet {
        RuleSet::from_value(value)
    }

    #[test]
    fn test_merge_without_override_is_baseline() {
        let base = RuleSet::baseline();
        assert_eq!(base.merge(None), base);
    }

    #[test]
    fn test_merge_replaces_plugins_wholesale() {
        let base = rules(json!({ "multipass": true, "plugins": ["A", "B"] }));
        let over = rules(json!({ "plugins": ["C"] }));
        let merged = base.merge(Some(&over));
        assert_eq!(merged.plugin_names(), vec!["C"]);
        // untouched keys survive
        assert!(merged.multipass());
    }

    #[test]
    fn test_merge_is_shallow_for_nested_objects() {
        let base = RuleSet::baseline();
        let over = rules(json!({
            "plugins": [{ "name": "preset-default", "params": { "overrides": { "removeTitle": true } } }]
        }));
        let merged = base.merge(Some(&over));
        let preset = &merged.plugins()[0];
        // baseline overrides are gone, not merged
        assert!(!preset.overrides.contains_key("removeViewBox"));
        assert_eq!(preset.overrides.get("removeTitle"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_merge_override_can_disable_multipass() {
        let merged = RuleSet::baseline().merge(Some(&rules(json!({ "multipass": false }))));
        assert!(!merged.multipass());
        assert_eq!(merged.plugin_names(), vec![PRESET_DEFAULT]);
    }

    #[test]
    fn test_plugins_normalization() {
        let set = rules(json!({
            "plugins": [
                "removeComments",
                { "name": "sortAttrs", "params": { "order": ["id"] } },
                { "params": {} },
                42
            ]
        }));
        let plugins = set.plugins();
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].name, "removeComments");
        assert_eq!(plugins[1].name, "sortAttrs");
        assert!(plugins[1].params.contains_key("order"));
    }

    #[test]
    fn test_is_enabled() {
        let base = RuleSet::baseline();
        assert!(base.is_enabled("removeComments"));
        assert!(!base.is_enabled("removeViewBox"));

        let explicit = rules(json!({ "plugins": ["removeViewBox"] }));
        assert!(explicit.is_enabled("removeViewBox"));
        assert!(!explicit.is_enabled("removeComments"));
    }

    #[test]
    fn test_float_precision() {
        assert_eq!(rules(json!({ "floatPrecision": 2 })).float_precision(), Some(2));
        let preset = rules(json!({
            "plugins": [{ "name": "preset-default", "params": { "floatPrecision": 4 } }]
        }));
        assert_eq!(preset.float_precision(), Some(4));
        assert_eq!(RuleSet::baseline().float_precision(), None);
        assert_eq!(rules(json!({ "floatPrecision": 900 })).float_precision(), None);
    }

    #[test]
    fn test_catalogue_has_no_duplicates() {
        let mut names = PLUGIN_CATALOGUE.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PLUGIN_CATALOGUE.len());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let set: RuleSet = toml::from_str(
            "multipass = true\n[[plugins]]\nname = \"preset-default\"\n[plugins.params.overrides]\nremoveViewBox = false\n",
        )
        .unwrap();
        assert!(set.multipass());
        assert!(!set.is_enabled("removeViewBox"));
    }
}
