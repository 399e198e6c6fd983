//! Batch optimization of component sources.
//!
//! For each item, strictly in order:
//!
//! 1. find the first embedded `<svg>…</svg>` span (none: skipped)
//! 2. reverse-transcode it to SVG and submit it to the optimizer
//! 3. on success, splice the optimized markup back in place of the span
//!    and persist; on failure, leave the source untouched
//!
//! A failing item never stops the run. A [`CancelToken`] is checked before
//! each item; an in-flight item always completes.

mod client;
mod store;

pub use client::{HttpClient, LocalClient, OptimizeClient};
pub use store::{FsStore, SOURCE_EXTENSION, SourceStore, collect_sources};

use crate::core::CancelToken;
use crate::optimize::{OptimizeError, RuleSet};
use crate::transcode::{self, find_svg_span};

/// One component source to optimize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub identifier: String,
    pub source: String,
}

impl BatchItem {
    pub fn new(identifier: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemStatus {
    Optimized {
        original_size: usize,
        optimized_size: usize,
        reduction_percentage: f64,
    },
    Failed {
        error: String,
    },
    /// No SVG span found.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub identifier: String,
    pub status: ItemStatus,
}

impl ItemOutcome {
    fn failed(identifier: &str, error: &OptimizeError) -> Self {
        Self {
            identifier: identifier.to_string(),
            status: ItemStatus::Failed {
                error: error.to_string(),
            },
        }
    }
}

/// Totals and per-item outcomes of a run.
///
/// `processed` counts items with an SVG span, whatever their outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub processed: usize,
    pub optimized: usize,
    pub errored: usize,
    pub skipped: usize,
    /// Stopped early by the cancel token.
    pub cancelled: bool,
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    fn record(&mut self, outcome: &ItemOutcome) {
        match outcome.status {
            ItemStatus::Optimized { .. } => {
                self.processed += 1;
                self.optimized += 1;
            }
            ItemStatus::Failed { .. } => {
                self.processed += 1;
                self.errored += 1;
            }
            ItemStatus::Skipped => self.skipped += 1,
        }
        self.items.push(outcome.clone());
    }
}

/// Sequential optimizer over component sources.
pub struct BatchOrchestrator<'a> {
    client: &'a dyn OptimizeClient,
    store: &'a dyn SourceStore,
    rules: Option<&'a RuleSet>,
    cancel: CancelToken,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(client: &'a dyn OptimizeClient, store: &'a dyn SourceStore) -> Self {
        Self {
            client,
            store,
            rules: None,
            cancel: CancelToken::new(),
        }
    }

    /// Rule-set override sent with every item.
    pub fn with_rules(mut self, rules: Option<&'a RuleSet>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Optimize a single item.
    pub fn process(&self, item: &BatchItem) -> ItemOutcome {
        let Some(span) = find_svg_span(&item.source) else {
            return ItemOutcome {
                identifier: item.identifier.clone(),
                status: ItemStatus::Skipped,
            };
        };

        let svg = transcode::component_source_to_svg(span.text);
        let outcome = match self.client.optimize(&svg, self.rules) {
            Ok(outcome) => outcome,
            Err(e) => return ItemOutcome::failed(&item.identifier, &e),
        };
        let Some(optimized) = outcome.markup() else {
            return ItemOutcome::failed(&item.identifier, &OptimizeError::failure("optimizer returned no data"));
        };

        let embedded = transcode::forward::svg_to_markup(optimized);
        let rewritten = span.splice(&item.source, &embedded);
        if let Err(e) = self.store.write(&item.identifier, &rewritten) {
            return ItemOutcome::failed(&item.identifier, &e);
        }

        ItemOutcome {
            identifier: item.identifier.clone(),
            status: ItemStatus::Optimized {
                original_size: outcome.original_size.unwrap_or(svg.len()),
                optimized_size: outcome.optimized_size.unwrap_or(optimized.len()),
                reduction_percentage: outcome.reduction_percentage.unwrap_or_default(),
            },
        }
    }

    /// Begin a run that yields one outcome per [`Iterator::next`].
    pub fn start<'i>(&'i self, items: &'i [BatchItem]) -> BatchRun<'a, 'i> {
        BatchRun {
            orchestrator: self,
            items: items.iter(),
            report: BatchReport::default(),
        }
    }

    /// Run every item, calling `on_item` after each.
    pub fn run(&self, items: &[BatchItem], mut on_item: impl FnMut(&ItemOutcome)) -> BatchReport {
        let mut run = self.start(items);
        for outcome in run.by_ref() {
            on_item(&outcome);
        }
        run.finish()
    }
}

/// An in-progress run. Stops yielding when items run out or the token is
/// cancelled.
pub struct BatchRun<'a, 'i> {
    orchestrator: &'i BatchOrchestrator<'a>,
    items: std::slice::Iter<'i, BatchItem>,
    report: BatchReport,
}

impl BatchRun<'_, '_> {
    pub fn finish(self) -> BatchReport {
        self.report
    }
}

impl Iterator for BatchRun<'_, '_> {
    type Item = ItemOutcome;

    fn next(&mut self) -> Option<ItemOutcome> {
        if self.report.cancelled {
            return None;
        }
        let item = self.items.next()?;
        if self.orchestrator.cancel.is_cancelled() {
            self.report.cancelled = true;
            return None;
        }
        let outcome = self.orchestrator.process(item);
        self.report.record(&outcome);
        Some(outcome)
    }
}
