//! `serve`: run the optimization server until Ctrl+C.

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::core::shutdown_signal;
use crate::log;
use crate::optimize::RuleSet;
use crate::server::{OptimizationServer, OptimizationService};

/// Start the server on the configured address and block until Ctrl+C.
pub fn serve(config: &AppConfig) -> Result<()> {
    let signal = shutdown_signal();

    let service = OptimizationService::with_usvg(RuleSet::baseline());
    let mut server = OptimizationServer::new(service, config.serve.addr());
    server
        .start()
        .with_context(|| format!("failed to start server on {}", config.serve.addr()))?;
    log!("serve"; "press Ctrl+C to stop");

    // A closed channel also means shutdown
    let _ = signal.recv();
    server.stop();
    Ok(())
}
