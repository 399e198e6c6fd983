//! Command-line interface module.

mod args;
pub mod common;
pub mod convert;
pub mod optimize;
pub mod revert;
pub mod serve;

pub use args::{Cli, ClientArgs, Commands};
