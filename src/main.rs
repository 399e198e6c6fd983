//! svg2tsx - Convert SVG icons into React components, and optimize them.

#![allow(dead_code)]

mod batch;
mod cli;
mod config;
mod core;
mod icon;
mod logger;
mod optimize;
mod server;
mod transcode;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = AppConfig::load(&cli)?;

    match &cli.command {
        Commands::Convert {
            input,
            name,
            icon_type,
            stdout,
            ..
        } => cli::convert::convert_icon(&config, input.as_deref(), name, icon_type, *stdout),
        Commands::Revert { input, output } => {
            cli::revert::revert_component(input.as_deref(), output.as_deref())
        }
        Commands::Optimize { path, local, .. } => {
            cli::optimize::optimize_sources(&config, path, *local)
        }
        Commands::Serve { .. } => cli::serve::serve(&config),
    }
}
