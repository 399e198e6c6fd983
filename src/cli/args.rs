//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert SVG icons into React components, and optimize them
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: svg2tsx.toml)
    #[arg(short = 'C', long, global = true, default_value = "svg2tsx.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert an SVG into a component file
    #[command(visible_alias = "c")]
    Convert {
        /// SVG file to convert (default: read stdin)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Component name (PascalCase)
        #[arg(short, long)]
        name: String,

        /// Icon type, selects the output directory (e.g. Outline, Fill)
        #[arg(short = 't', long = "type")]
        icon_type: String,

        /// Print the component instead of writing it
        #[arg(long)]
        stdout: bool,

        #[command(flatten)]
        client: ClientArgs,

        /// Skip the optimization server
        #[arg(long)]
        no_optimize: bool,
    },

    /// Convert a component file back into SVG
    #[command(visible_alias = "r")]
    Revert {
        /// Component file (default: read stdin)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Write the SVG to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Optimize the SVG embedded in component files
    #[command(visible_alias = "o")]
    Optimize {
        /// A component file, or a directory searched recursively
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        path: PathBuf,

        /// Optimize in-process instead of through the server
        #[arg(short, long)]
        local: bool,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Start the SVG optimization server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Optimization client arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// Optimize endpoint of the server (overrides `[optimize] url`)
    #[arg(short, long, value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,
}
