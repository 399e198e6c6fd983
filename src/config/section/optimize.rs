//! `[optimize]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [optimize]
//! url = "http://localhost:3600/api/optimize"   # Optimization server endpoint
//! enabled = true                               # Optimize before converting
//!
//! [optimize.rules]                             # Override sent with each request
//! multipass = true
//! floatPrecision = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::optimize::RuleSet;

pub const DEFAULT_OPTIMIZE_URL: &str = "http://localhost:3600/api/optimize";

/// Optimization client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    /// Optimize endpoint of a running server.
    pub url: String,

    /// Run markup through the optimizer during `convert`.
    pub enabled: bool,

    /// Rule-set override, shallow-merged over the server baseline.
    pub rules: RuleSet,
}

impl OptimizeConfig {
    pub const FIELD_URL: FieldPath = FieldPath::new("optimize.url");

    /// Override to send, `None` when no rules are configured.
    pub fn overrides(&self) -> Option<&RuleSet> {
        (!self.rules.is_empty()).then_some(&self.rules)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => diag.error_with_hint(
                Self::FIELD_URL,
                format!("unsupported scheme `{}`", url.scheme()),
                format!("use an http URL such as \"{DEFAULT_OPTIMIZE_URL}\""),
            ),
            Err(e) => diag.error_with_hint(
                Self::FIELD_URL,
                format!("invalid URL `{}`: {e}", self.url),
                format!("use an http URL such as \"{DEFAULT_OPTIMIZE_URL}\""),
            ),
        }
    }
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPTIMIZE_URL.to_string(),
            enabled: true,
            rules: RuleSet::new(),
        }
    }
}
