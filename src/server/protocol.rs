//! JSON bodies exchanged with the optimization server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::optimize::{OptimizationOutcome, RuleSet};

/// Message returned by `GET /health`.
pub const HEALTH_MESSAGE: &str = "SVG Optimization Server is running";

/// `POST /api/optimize` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RuleSet>,
}

/// One entry of a batch request.
///
/// Entries are read from raw JSON so that a malformed one fails alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchFile {
    pub name: String,
    /// `None` when absent or not a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BatchFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Some(content.into()),
        }
    }

    /// Read an entry of any shape. A missing or null name becomes empty,
    /// other non-string names keep their JSON text.
    pub fn from_value(value: &Value) -> Self {
        let name = match value.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let content = value
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { name, content }
    }
}

/// `POST /api/optimize/batch` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// `None` when the field is absent, which is rejected with 400.
    /// Entries stay raw until [`BatchFile::from_value`].
    #[serde(default)]
    pub svg_files: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RuleSet>,
}

/// Per-item batch result: the item name beside a flattened outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: OptimizationOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<BatchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: HEALTH_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsResponse {
    pub success: bool,
    pub plugins: Vec<String>,
}

/// Body of every non-optimizer error (404, 400 on malformed JSON, 413).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
