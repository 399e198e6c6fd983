//! Result of one optimize attempt, in its wire shape.

use super::OptimizeError;
use serde::{Deserialize, Serialize};

/// `(original - optimized) / original * 100`, rounded to two decimals.
///
/// Zero when `original` is zero. Not clamped: an optimizer that enlarges
/// the markup yields a negative value.
pub fn reduction_percentage(original: usize, optimized: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let pct = (original as f64 - optimized as f64) / original as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Outcome of optimizing a single markup string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutcome {
    pub success: bool,
    /// Optimized markup on success, optimizer diagnostics on a no-output failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_percentage: Option<f64>,
}

impl OptimizationOutcome {
    /// Successful outcome; sizes are UTF-8 byte lengths.
    pub fn optimized(original: &str, optimized: String) -> Self {
        let original_size = original.len();
        let optimized_size = optimized.len();
        Self {
            success: true,
            data: Some(optimized),
            error: None,
            original_size: Some(original_size),
            optimized_size: Some(optimized_size),
            reduction_percentage: Some(reduction_percentage(original_size, optimized_size)),
        }
    }

    pub fn failed(error: &OptimizeError) -> Self {
        Self {
            success: false,
            data: error.diagnostic().map(str::to_string),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Optimized markup, only when the attempt succeeded.
    pub fn markup(&self) -> Option<&str> {
        if self.success { self.data.as_deref() } else { None }
    }
}

impl From<Result<OptimizationOutcome, OptimizeError>> for OptimizationOutcome {
    fn from(result: Result<OptimizationOutcome, OptimizeError>) -> Self {
        result.unwrap_or_else(|e| Self::failed(&e))
    }
}
