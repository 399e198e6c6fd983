//! `optimize`: shrink the SVG embedded in component files, in place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::common::display_relative;
use crate::batch::{
    BatchItem, BatchOrchestrator, BatchReport, FsStore, HttpClient, ItemStatus, LocalClient,
    OptimizeClient, collect_sources,
};
use crate::config::AppConfig;
use crate::core::shutdown_token;
use crate::logger::ProgressLine;
use crate::optimize::RuleSet;
use crate::server::OptimizationService;
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Optimize one component file, or every one under a directory.
pub fn optimize_sources(config: &AppConfig, path: &Path, local: bool) -> Result<()> {
    let files = collect_sources(path);
    if files.is_empty() {
        log!("optimize"; "no component files found in {}", path.display());
        return Ok(());
    }
    let items = load_items(&files);

    let client: Box<dyn OptimizeClient> = if local {
        Box::new(LocalClient::new(OptimizationService::with_usvg(
            RuleSet::baseline(),
        )))
    } else {
        let client = HttpClient::new(config.optimize.url.as_str());
        debug!("optimize"; "using server at {}", client.url());
        Box::new(client)
    };
    client.check_health()?;

    log!("optimize"; "optimizing {}", plural_count(items.len(), "file"));
    let store = FsStore;
    let orchestrator = BatchOrchestrator::new(client.as_ref(), &store)
        .with_rules(config.optimize.overrides())
        .with_cancel(shutdown_token());

    let progress = ProgressLine::new("optimize", &[("files", items.len())]);
    let report = orchestrator.run(&items, |outcome| {
        match &outcome.status {
            ItemStatus::Failed { error } => {
                log!("error"; "{}: {}", display_relative(Path::new(&outcome.identifier), &config.root), error);
            }
            ItemStatus::Optimized {
                reduction_percentage,
                ..
            } => {
                debug!("optimize"; "{}: {}% smaller", outcome.identifier, reduction_percentage);
            }
            ItemStatus::Skipped => {
                debug!("optimize"; "{}: no svg, skipped", outcome.identifier);
            }
        }
        progress.inc("files");
    });
    progress.finish();

    log!("optimize"; "{}", summarize(&report));
    if report.cancelled {
        log!("optimize"; "cancelled, {} not processed", plural_count(items.len() - report.items.len(), "file"));
    }
    if report.errored > 0 {
        bail!("{} failed to optimize", plural_count(report.errored, "file"));
    }
    Ok(())
}

/// Read every file into a batch item. Unreadable files are reported and left out.
fn load_items(files: &[PathBuf]) -> Vec<BatchItem> {
    files
        .iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(source) => Some(BatchItem::new(path.to_string_lossy(), source)),
            Err(e) => {
                log!("error"; "failed to read {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

/// One-line summary of a finished run.
fn summarize(report: &BatchReport) -> String {
    let (before, after) = report
        .items
        .iter()
        .filter_map(|item| match item.status {
            ItemStatus::Optimized {
                original_size,
                optimized_size,
                ..
            } => Some((original_size, optimized_size)),
            _ => None,
        })
        .fold((0, 0), |(b, a), (ob, oa)| (b + ob, a + oa));

    let mut summary = format!("optimized {}", plural_count(report.optimized, "file"));
    if report.optimized > 0 {
        let pct = crate::optimize::reduction_percentage(before, after);
        summary.push_str(&format!(" ({before} → {after} bytes, {pct}% smaller)"));
    }
    if report.skipped > 0 {
        summary.push_str(&format!(", skipped {}", report.skipped));
    }
    if report.errored > 0 {
        summary.push_str(&format!(", {} failed", report.errored));
    }
    summary
}
