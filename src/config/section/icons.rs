//! `[icons]` section configuration.
//!
//! Where generated components go and how they are post-processed.
//!
//! # Example
//!
//! ```toml
//! [icons]
//! auto_export = true          # Append an export line to the directory's index.ts
//!
//! [icons.paths]               # Icon type → directory (relative to project root)
//! Outline = "src/components/Common/Icon/icons/outline"
//! Fill = "src/components/Common/Icon/icons/fill"
//!
//! [icons.replace_color]
//! color = "#2B2B2B"           # Literal colour rewritten to currentColor
//! types = ["Fill", "Outline"] # Icon types the rewrite applies to
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Fallback parent for types without a configured path.
const DEFAULT_ICON_ROOT: &str = "src/components/Common/Icon/icons";

/// Icon types created out of the box.
pub const DEFAULT_ICON_TYPES: &[&str] = &["Outline", "Fill", "Color", "3D"];

/// Icon output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Icon type → output directory.
    pub paths: BTreeMap<String, PathBuf>,

    /// Register each new icon in the directory's `index.ts`.
    pub auto_export: bool,

    /// Colour rewrite applied before conversion.
    pub replace_color: ReplaceColorConfig,
}

impl IconsConfig {
    pub const FIELD_PATHS: FieldPath = FieldPath::new("icons.paths");

    /// Output directory for `icon_type`, relative to the project root.
    ///
    /// Type names match case-insensitively. Unknown types fall back to
    /// `src/components/Common/Icon/icons/<type>`.
    pub fn dir_for(&self, icon_type: &str) -> PathBuf {
        self.paths
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(icon_type))
            .map(|(_, dir)| dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ICON_ROOT).join(icon_type.to_lowercase()))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (name, dir) in &self.paths {
            if dir.as_os_str().is_empty() {
                diag.error_with_hint(
                    Self::FIELD_PATHS,
                    format!("path for icon type `{name}` is empty"),
                    "remove the entry to use the default directory",
                );
            }
        }
        self.replace_color.validate(diag);
    }
}

impl Default for IconsConfig {
    fn default() -> Self {
        let paths = DEFAULT_ICON_TYPES
            .iter()
            .map(|name| {
                let dir = PathBuf::from(DEFAULT_ICON_ROOT).join(name.to_lowercase());
                (name.to_string(), dir)
            })
            .collect();
        Self {
            paths,
            auto_export: true,
            replace_color: ReplaceColorConfig::default(),
        }
    }
}

/// Hardcoded colour → `currentColor` rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceColorConfig {
    pub color: String,
    pub types: Vec<String>,
}

impl ReplaceColorConfig {
    pub const FIELD_COLOR: FieldPath = FieldPath::new("icons.replace_color.color");

    /// Whether icons of `icon_type` get the rewrite.
    pub fn applies_to(&self, icon_type: &str) -> bool {
        !self.color.is_empty() && self.types.iter().any(|t| t.eq_ignore_ascii_case(icon_type))
    }

    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.color.trim().is_empty() && !self.types.is_empty() {
            diag.error_with_hint(
                Self::FIELD_COLOR,
                "colour is empty but types are listed",
                "set a colour such as \"#2B2B2B\" or clear `types`",
            );
        }
    }
}

impl Default for ReplaceColorConfig {
    fn default() -> Self {
        Self {
            color: "#2B2B2B".to_string(),
            types: vec!["Fill".to_string(), "Outline".to_string()],
        }
    }
}
