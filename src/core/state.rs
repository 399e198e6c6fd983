//! Process-wide shutdown state.
//!
//! Ctrl+C cancels the global [`CancelToken`]. Long-running commands opt in to
//! cooperative shutdown by taking the token or a shutdown signal; otherwise
//! the process exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};

use crossbeam::channel::{self, Receiver, Sender};

/// Shared cancellation flag, checked between units of work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Relaxed load: at worst one more item runs before stopping.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancelled by Ctrl+C.
static SHUTDOWN: LazyLock<CancelToken> = LazyLock::new(CancelToken::new);

/// Some command handles Ctrl+C itself.
static COOPERATIVE: AtomicBool = AtomicBool::new(false);

/// Shutdown notification for blocking commands (`serve`).
static SIGNAL: OnceLock<(Sender<()>, Receiver<()>)> = OnceLock::new();

/// Setup the global Ctrl+C handler. Call once at program start.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.cancel();

        if !COOPERATIVE.load(Ordering::SeqCst) {
            std::process::exit(130);
        }
        if let Some((tx, _)) = SIGNAL.get() {
            let _ = tx.send(());
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Token cancelled on Ctrl+C. Taking it makes shutdown cooperative.
pub fn shutdown_token() -> CancelToken {
    COOPERATIVE.store(true, Ordering::SeqCst);
    SHUTDOWN.clone()
}

/// Receiver notified once per Ctrl+C. Taking it makes shutdown cooperative.
pub fn shutdown_signal() -> Receiver<()> {
    COOPERATIVE.store(true, Ordering::SeqCst);
    SIGNAL.get_or_init(channel::unbounded).1.clone()
}
