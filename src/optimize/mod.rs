//! SVG optimization core.
//!
//! Shared by the HTTP service and the in-process batch client:
//!
//! - [`rules`]: rule sets and the shallow merge policy
//! - [`optimizer`]: the optimizer capability and its usvg implementation
//! - [`outcome`]: wire-shaped result and reduction math
//! - [`error`]: error kinds

mod error;
mod optimizer;
mod outcome;
mod rules;

pub use error::OptimizeError;
pub use optimizer::{OptimizedSvg, Optimizer, UsvgOptimizer};
pub use outcome::{OptimizationOutcome, reduction_percentage};
pub use rules::{PLUGIN_CATALOGUE, PRESET_DEFAULT, PluginRule, RuleSet};

use crate::transcode::looks_like_svg;

/// Optimize one markup string under `baseline` merged with `overrides`.
///
/// Missing, empty, or non-SVG-shaped markup is rejected before the optimizer
/// is invoked.
pub fn optimize_markup(
    optimizer: &dyn Optimizer,
    baseline: &RuleSet,
    markup: Option<&str>,
    overrides: Option<&RuleSet>,
) -> Result<OptimizationOutcome, OptimizeError> {
    let markup = match markup {
        Some(m) if !m.is_empty() => m,
        _ => return Err(OptimizeError::missing_markup()),
    };
    if !looks_like_svg(markup) {
        return Err(OptimizeError::not_svg());
    }

    let rules = baseline.merge(overrides);
    let optimized = optimizer
        .optimize(markup, &rules)
        .map_err(|e| OptimizeError::failure(format!("Failed to optimize SVG: {e:#}")))?;

    if optimized.data.trim().is_empty() {
        return Err(OptimizeError::OptimizerFailure {
            message: "Failed to optimize SVG".to_string(),
            diagnostic: Some(optimized.info().to_string()),
        });
    }

    Ok(OptimizationOutcome::optimized(markup, optimized.data))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Optimizer doubles shared by service, server, and batch tests.

    use super::*;
    use anyhow::bail;

    /// Collapses whitespace runs; fails on markup containing `boom`, yields
    /// nothing for markup containing `void`, and panics on `panic`.
    pub struct StubOptimizer;

    impl Optimizer for StubOptimizer {
        fn optimize(&self, svg: &str, _rules: &RuleSet) -> anyhow::Result<OptimizedSvg> {
            if svg.contains("panic") {
                panic!("stub optimizer panicked");
            }
            if svg.contains("boom") {
                bail!("stub optimizer exploded");
            }
            let data = if svg.contains("void") {
                String::new()
            } else {
                svg.split_whitespace().collect::<Vec<_>>().join(" ")
            };
            Ok(OptimizedSvg {
                data,
                size: (24.0, 24.0),
            })
        }
    }
}
