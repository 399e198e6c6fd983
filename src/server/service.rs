//! Transport-independent optimization operations.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::protocol::{BatchFile, BatchResult, HealthResponse};
use crate::optimize::{
    OptimizationOutcome, OptimizeError, Optimizer, PLUGIN_CATALOGUE, RuleSet, UsvgOptimizer,
    optimize_markup,
};

/// Health, optimize-one, optimize-batch, and plugin listing.
///
/// Holds no per-request state; every call merges its own rule set.
#[derive(Clone)]
pub struct OptimizationService {
    optimizer: Arc<dyn Optimizer>,
    baseline: RuleSet,
}

impl OptimizationService {
    pub fn new(optimizer: Arc<dyn Optimizer>, baseline: RuleSet) -> Self {
        Self {
            optimizer,
            baseline,
        }
    }

    /// Service backed by [`UsvgOptimizer`].
    pub fn with_usvg(baseline: RuleSet) -> Self {
        Self::new(Arc::new(UsvgOptimizer::default()), baseline)
    }

    pub fn baseline(&self) -> &RuleSet {
        &self.baseline
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse::ok()
    }

    /// Optimize one markup string. A panicking optimizer is reported as
    /// an [`OptimizeError::OptimizerFailure`].
    pub fn optimize(
        &self,
        markup: Option<&str>,
        overrides: Option<&RuleSet>,
    ) -> Result<OptimizationOutcome, OptimizeError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            optimize_markup(self.optimizer.as_ref(), &self.baseline, markup, overrides)
        }))
        .unwrap_or_else(|payload| Err(OptimizeError::failure(panic_message(payload.as_ref()))))
    }

    /// One result per item, in input order. Items never affect each other.
    pub fn optimize_batch(
        &self,
        files: &[BatchFile],
        overrides: Option<&RuleSet>,
    ) -> Vec<BatchResult> {
        files
            .iter()
            .map(|file| BatchResult {
                name: file.name.clone(),
                outcome: self.optimize(file.content.as_deref(), overrides).into(),
            })
            .collect()
    }

    pub fn plugins(&self) -> &'static [&'static str] {
        PLUGIN_CATALOGUE
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("optimizer panicked: {detail}")
}
