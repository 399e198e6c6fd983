//! Core types shared across commands.

mod state;

pub use state::{CancelToken, setup_shutdown_handler, shutdown_signal, shutdown_token};
